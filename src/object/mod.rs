//! Object utility functions
//!
//! Structural transforms over JSON objects (`serde_json::Map`) plus
//! dotted-path access in [`path`]. Every transform returns a new map and
//! leaves its input untouched.

pub mod path;

use serde_json::{Map, Value};

pub use path::{get, get_as, get_or, has, path_segments, set, PathNode, MAX_SET_INDEX};

/// Map over all the entries to create a new object
///
/// When two entries map to the same key, the later one wins.
///
/// # Example
///
/// ```rust
/// use utilkit::object::map_entries;
/// use serde_json::json;
///
/// let products = json!({ "banana": 1.5, "apple": 2.5 });
/// let doubled = map_entries(products.as_object().unwrap(), |key, value| {
///     (key.to_uppercase(), json!(value.as_f64().unwrap_or(0.0) * 2.0))
/// });
/// assert_eq!(doubled["BANANA"], json!(3.0));
/// assert_eq!(doubled["APPLE"], json!(5.0));
/// ```
pub fn map_entries<F>(obj: &Map<String, Value>, to_entry: F) -> Map<String, Value>
where
    F: Fn(&str, &Value) -> (String, Value),
{
    obj.iter().map(|(key, value)| to_entry(key, value)).collect()
}

/// Map over all the keys of an object to return a new object
///
/// # Example
///
/// ```rust
/// use utilkit::object::map_keys;
/// use serde_json::json;
///
/// let obj = json!({ "a": 1, "b": 2 });
/// let renamed = map_keys(obj.as_object().unwrap(), |key, value| format!("{key}{value}"));
/// assert_eq!(renamed["a1"], json!(1));
/// assert_eq!(renamed["b2"], json!(2));
/// ```
pub fn map_keys<F>(obj: &Map<String, Value>, map_func: F) -> Map<String, Value>
where
    F: Fn(&str, &Value) -> String,
{
    obj.iter()
        .map(|(key, value)| (map_func(key, value), value.clone()))
        .collect()
}

/// Map over all the values of an object to return a new object
///
/// # Example
///
/// ```rust
/// use utilkit::object::map_values;
/// use serde_json::json;
///
/// let obj = json!({ "a": 1, "b": 2 });
/// let doubled = map_values(obj.as_object().unwrap(), |value, _key| {
///     json!(value.as_i64().unwrap_or(0) * 2)
/// });
/// assert_eq!(serde_json::Value::Object(doubled), json!({ "a": 2, "b": 4 }));
/// ```
pub fn map_values<F>(obj: &Map<String, Value>, map_func: F) -> Map<String, Value>
where
    F: Fn(&Value, &str) -> Value,
{
    obj.iter()
        .map(|(key, value)| (key.clone(), map_func(value, key)))
        .collect()
}

/// Creates a new object composed of the picked object properties
///
/// Keys that are not present on `obj` are skipped.
///
/// # Arguments
///
/// * `obj` - The source object
/// * `keys` - Property names to copy over
///
/// # Example
///
/// ```rust
/// use utilkit::object::pick;
/// use serde_json::json;
///
/// let obj = json!({ "a": 1, "b": 2, "c": 3 });
/// let picked = pick(obj.as_object().unwrap(), &["a", "c", "z"]);
/// assert_eq!(serde_json::Value::Object(picked), json!({ "a": 1, "c": 3 }));
/// ```
pub fn pick<K: AsRef<str>>(obj: &Map<String, Value>, keys: &[K]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|key| {
            let key = key.as_ref();
            obj.get(key).map(|value| (key.to_string(), value.clone()))
        })
        .collect()
}

/// Creates a new object composed of the properties that satisfy the predicate
///
/// # Example
///
/// ```rust
/// use utilkit::object::pick_by;
/// use serde_json::json;
///
/// let obj = json!({ "a": 1, "b": "pick", "c": 3 });
/// let strings = pick_by(obj.as_object().unwrap(), |value, _key| value.is_string());
/// assert_eq!(serde_json::Value::Object(strings), json!({ "b": "pick" }));
/// ```
pub fn pick_by<F>(obj: &Map<String, Value>, should_pick: F) -> Map<String, Value>
where
    F: Fn(&Value, &str) -> bool,
{
    obj.iter()
        .filter(|(key, value)| should_pick(value, key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Creates a new object without the given properties
///
/// # Example
///
/// ```rust
/// use utilkit::object::omit;
/// use serde_json::json;
///
/// let obj = json!({ "a": 1, "b": 2, "c": 3 });
/// let rest = omit(obj.as_object().unwrap(), &["a", "c"]);
/// assert_eq!(serde_json::Value::Object(rest), json!({ "b": 2 }));
/// ```
pub fn omit<K: AsRef<str>>(obj: &Map<String, Value>, keys: &[K]) -> Map<String, Value> {
    pick_by(obj, |_, key| !keys.iter().any(|omitted| omitted.as_ref() == key))
}

/// Creates a new object without the properties that satisfy the predicate
pub fn omit_by<F>(obj: &Map<String, Value>, should_omit: F) -> Map<String, Value>
where
    F: Fn(&Value, &str) -> bool,
{
    pick_by(obj, |value, key| !should_omit(value, key))
}
