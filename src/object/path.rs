//! Dotted-path access for nested values
//!
//! Paths use dot and bracket notation: `"user.posts[0].title"`,
//! `"matrix[1][2]"`, `"headers['content-type']"`. A path is tokenized
//! once into access keys and then folded over the value.

use crate::types::Dynamic;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// A value that can be walked one key at a time
///
/// Implemented for [`serde_json::Value`] and [`Dynamic`].
pub trait PathNode {
    /// Traversal stops at null (and undefined) values
    fn is_nullish(&self) -> bool;

    /// A resolved undefined value is replaced by the default
    fn is_undefined(&self) -> bool {
        false
    }

    /// Look up `key` as an object key or a numeric array index
    fn child(&self, key: &str) -> Option<&Self>;
}

impl PathNode for Value {
    fn is_nullish(&self) -> bool {
        self.is_null()
    }

    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Value::Object(fields) => fields.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

impl PathNode for Dynamic {
    fn is_nullish(&self) -> bool {
        matches!(self, Dynamic::Null | Dynamic::Undefined)
    }

    fn is_undefined(&self) -> bool {
        matches!(self, Dynamic::Undefined)
    }

    fn child(&self, key: &str) -> Option<&Self> {
        match self {
            Dynamic::Object(fields) | Dynamic::Instance { fields, .. } => fields.get(key),
            Dynamic::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

/// Split a path into access keys
///
/// Delimiters are `.`, `[` and `]`. Empty segments are dropped and
/// surrounding quotes are stripped, so `a[0]`, `a['0']` and `a.0` all
/// produce `["a", "0"]`.
///
/// # Example
///
/// ```rust
/// use utilkit::object::path_segments;
///
/// let keys: Vec<&str> = path_segments("a.b[0][\"c\"]").collect();
/// assert_eq!(keys, vec!["a", "b", "0", "c"]);
/// ```
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['.', '[', ']'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.trim_matches(|c: char| c == '\'' || c == '"'))
}

/// Get a nested value by path, or `default` when it cannot be reached
///
/// Traversal stops at the first null or undefined value. A resolved value
/// is returned even when it is falsy (`0`, `false`, `""`, `null`); only a
/// missing/undefined result falls back to `default`.
///
/// # Arguments
///
/// * `root` - A JSON value or [`Dynamic`] to walk
/// * `path` - Dotted keys with optional indices, like `"friends[0].name"`
/// * `default` - Returned when the path does not resolve
///
/// # Returns
///
/// The value at `path`, else `default`.
///
/// # Example
///
/// ```rust
/// use utilkit::object::get;
/// use serde_json::json;
///
/// let data = json!({ "friends": [{ "name": "Jane" }] });
/// assert_eq!(get(&data, "friends[0].name", None), Some(&json!("Jane")));
///
/// let fallback = json!("fallback");
/// assert_eq!(get(&json!({}), "a.b.c", Some(&fallback)), Some(&fallback));
/// ```
pub fn get<'a, N>(root: &'a N, path: &str, default: Option<&'a N>) -> Option<&'a N>
where
    N: PathNode + ?Sized,
{
    let resolved = path_segments(path).try_fold(root, |current, key| {
        if current.is_nullish() {
            None
        } else {
            current.child(key)
        }
    });

    match resolved {
        Some(value) if !value.is_undefined() => Some(value),
        _ => default,
    }
}

/// [`get`] with a mandatory default
pub fn get_or<'a, N>(root: &'a N, path: &str, default: &'a N) -> &'a N
where
    N: PathNode + ?Sized,
{
    get(root, path, Some(default)).unwrap_or(default)
}

/// Get a nested JSON value by path and deserialize it
///
/// Returns `None` when the path does not resolve or the value does not
/// deserialize into `T`.
///
/// # Example
///
/// ```rust
/// use utilkit::object::get_as;
/// use serde_json::json;
///
/// let data = json!({ "user": { "age": 30, "tags": ["a", "b"] } });
/// assert_eq!(get_as::<u32>(&data, "user.age"), Some(30));
/// assert_eq!(get_as::<Vec<String>>(&data, "user.tags"), Some(vec!["a".into(), "b".into()]));
/// assert_eq!(get_as::<String>(&data, "user.age"), None);
/// ```
pub fn get_as<T: DeserializeOwned>(root: &Value, path: &str) -> Option<T> {
    get(root, path, None).and_then(|value| T::deserialize(value).ok())
}

/// Check if a path resolves to a defined value
pub fn has<N>(root: &N, path: &str) -> bool
where
    N: PathNode + ?Sized,
{
    get(root, path, None).is_some()
}

/// Largest array index [`set`] will pad up to
pub const MAX_SET_INDEX: usize = 1 << 20;

/// Set a nested JSON value by path
///
/// Missing intermediate containers are created: an array when the next
/// key is numeric, an object otherwise. Arrays are padded with `null` up
/// to the written index. Non-container values on the way are replaced.
///
/// # Arguments
///
/// * `target` - The value to write into
/// * `path` - Dot/bracket path, e.g. `"user.tags[1]"`
/// * `value` - The value to store at `path`
///
/// # Returns
///
/// `true` when the value was written. An empty path, or one holding a
/// numeric key above [`MAX_SET_INDEX`], leaves `target` untouched and
/// returns `false`.
///
/// # Example
///
/// ```rust
/// use utilkit::object::set;
/// use serde_json::json;
///
/// let mut data = json!({});
/// assert!(set(&mut data, "user.tags[1]", json!("rust")));
/// assert_eq!(data, json!({ "user": { "tags": [null, "rust"] } }));
/// ```
pub fn set(target: &mut Value, path: &str, value: Value) -> bool {
    let segments: Vec<&str> = path_segments(path).collect();
    if segments.is_empty() {
        return false;
    }

    // Checked up front so a rejected path writes nothing
    let oversized = segments
        .iter()
        .filter_map(|segment| segment.parse::<usize>().ok())
        .any(|index| index > MAX_SET_INDEX);
    if oversized {
        warn!("Refusing to set path `{}`: index above {}", path, MAX_SET_INDEX);
        return false;
    }

    set_segments(target, &segments, value);
    true
}

fn set_segments(target: &mut Value, segments: &[&str], value: Value) {
    match segments.split_first() {
        None => *target = value,
        Some((key, rest)) => {
            if let Some(slot) = slot_mut(target, key) {
                set_segments(slot, rest, value);
            }
        }
    }
}

fn slot_mut<'a>(target: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match key.parse::<usize>() {
        // Numeric keys index arrays; existing objects keep string keys
        Ok(index) if !target.is_object() => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            let items = target.as_array_mut()?;
            let len = index.checked_add(1)?;
            if items.len() < len {
                items.resize(len, Value::Null);
            }
            items.get_mut(index)
        }
        _ => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            let fields = target.as_object_mut()?;
            Some(fields.entry(key).or_insert(Value::Null))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_segments() {
        let keys: Vec<&str> = path_segments("a.b[0].c").collect();
        assert_eq!(keys, vec!["a", "b", "0", "c"]);

        let keys: Vec<&str> = path_segments("a['0']").collect();
        assert_eq!(keys, vec!["a", "0"]);

        let keys: Vec<&str> = path_segments("..a..[[1]]..").collect();
        assert_eq!(keys, vec!["a", "1"]);

        assert_eq!(path_segments("").count(), 0);
    }

    #[test]
    fn test_get() {
        let data = json!({
            "user": {
                "name": "John",
                "age": 30,
                "active": true,
                "tags": ["developer", "rust"]
            },
            "friends": [{ "name": "Jane" }]
        });

        assert_eq!(get(&data, "friends[0].name", None), Some(&json!("Jane")));
        assert_eq!(get(&data, "friends['0'].name", None), Some(&json!("Jane")));
        assert_eq!(get(&data, "friends.0.name", None), Some(&json!("Jane")));
        assert_eq!(get(&data, "user[\"name\"]", None), Some(&json!("John")));
        assert_eq!(get(&data, "user.tags[1]", None), Some(&json!("rust")));
        assert_eq!(get(&data, "user.tags[2]", None), None);
        assert_eq!(get(&data, "user.nonexistent", None), None);
        assert_eq!(get(&data, "", None), Some(&data));
    }

    #[test]
    fn test_get_default() {
        let fallback = json!("fallback");
        assert_eq!(get(&json!({}), "a.b.c", Some(&fallback)), Some(&fallback));
        assert_eq!(get_or(&json!({}), "a.b.c", &fallback), &fallback);

        // Scalars cannot be indexed
        let data = json!({ "a": 5 });
        assert_eq!(get(&data, "a.b", Some(&fallback)), Some(&fallback));
    }

    #[test]
    fn test_get_falsy_values() {
        let data = json!({ "zero": 0, "no": false, "empty": "", "nothing": null });
        let fallback = json!("fallback");

        assert_eq!(get(&data, "zero", Some(&fallback)), Some(&json!(0)));
        assert_eq!(get(&data, "no", Some(&fallback)), Some(&json!(false)));
        assert_eq!(get(&data, "empty", Some(&fallback)), Some(&json!("")));
        assert_eq!(get(&data, "nothing", Some(&fallback)), Some(&Value::Null));

        // Stops at null instead of indexing into it
        assert_eq!(get(&data, "nothing.deeper", Some(&fallback)), Some(&fallback));
    }

    #[test]
    fn test_get_dynamic() {
        let data = Dynamic::object([
            ("missing", Dynamic::Undefined),
            ("list", Dynamic::from(vec![10, 20])),
            ("date", Dynamic::instance("Date", [("year", 2024)])),
        ]);
        let fallback = Dynamic::from("fallback");

        assert_eq!(get(&data, "list[1]", None), Some(&Dynamic::from(20)));
        assert_eq!(get(&data, "date.year", None), Some(&Dynamic::from(2024)));
        assert_eq!(get(&data, "missing", Some(&fallback)), Some(&fallback));
        assert_eq!(get(&data, "missing.x", Some(&fallback)), Some(&fallback));
    }

    #[test]
    fn test_get_as() {
        let data = json!({ "user": { "name": "John", "age": 30, "active": true } });

        assert_eq!(get_as::<String>(&data, "user.name"), Some("John".to_string()));
        assert_eq!(get_as::<f64>(&data, "user.age"), Some(30.0));
        assert_eq!(get_as::<bool>(&data, "user.active"), Some(true));
        assert_eq!(get_as::<String>(&data, "user.nonexistent"), None);
    }

    #[test]
    fn test_has() {
        let data = json!({
            "user": {
                "profile": { "name": "John", "nickname": null },
                "posts": [{ "title": "First Post" }]
            }
        });

        assert!(has(&data, "user.profile.name"));
        assert!(has(&data, "user.profile.nickname"));
        assert!(has(&data, "user.posts[0].title"));
        assert!(!has(&data, "user.profile.age"));
        assert!(!has(&data, "user.posts[1]"));
        assert!(!has(&data, "nonexistent"));
    }

    #[test]
    fn test_set() {
        let mut data = json!({});

        set(&mut data, "user.name", json!("John"));
        assert_eq!(data["user"]["name"], "John");

        set(&mut data, "user.tags[0]", json!("developer"));
        set(&mut data, "user.tags[1]", json!("rust"));
        assert_eq!(data["user"]["tags"], json!(["developer", "rust"]));

        set(&mut data, "matrix[1][1]", json!(5));
        assert_eq!(data["matrix"], json!([null, [null, 5]]));

        // Existing objects keep numeric-looking keys as strings
        set(&mut data, "user.0", json!("zero"));
        assert_eq!(data["user"]["0"], "zero");

        // Scalars on the way are replaced by containers
        set(&mut data, "user.name.first", json!("John"));
        assert_eq!(data["user"]["name"], json!({ "first": "John" }));

        let before = data.clone();
        assert!(!set(&mut data, "", json!(1)));
        assert_eq!(data, before);
    }

    #[test]
    fn test_set_rejects_huge_indices() {
        let mut data = json!({ "a": [1] });
        let before = data.clone();

        assert!(!set(&mut data, "a[18446744073709551615]", json!(1)));
        assert!(!set(&mut data, "b[4000000000].c", json!(1)));
        assert_eq!(data, before);

        assert!(set(&mut data, &format!("a[{MAX_SET_INDEX}]"), json!(2)));
        let items = data["a"].as_array().unwrap();
        assert_eq!(items.len(), MAX_SET_INDEX + 1);
        assert_eq!(items[MAX_SET_INDEX], json!(2));
    }
}
