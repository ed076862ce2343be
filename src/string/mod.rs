//! String utility functions
//!
//! General helpers live here; casing, byte sizes and durations have their
//! own submodules.

pub mod bytes;
pub mod case;
pub mod ms;

use rand::seq::SliceRandom;

pub use case::{camel_case, capital_case, kebab_case, pascal_case, snake_case};

/// URL-safe alphabet used by [`random_str`] when none is given
pub const URL_ALPHABET: &str = "useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Default length used by [`random_str`] callers that have no preference
pub const DEFAULT_RANDOM_SIZE: usize = 16;

/// Capitalize the first letter of a string and lowercase the rest
///
/// # Example
///
/// ```rust
/// use utilkit::string::capitalize;
///
/// assert_eq!(capitalize("hELLO wORLD"), "Hello world");
/// ```
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Generate a random string
///
/// Characters are drawn uniformly from `alphabet`, which defaults to
/// [`URL_ALPHABET`]. An empty alphabet yields an empty string.
///
/// # Example
///
/// ```rust
/// use utilkit::string::random_str;
///
/// let id = random_str(16, None);
/// assert_eq!(id.chars().count(), 16);
///
/// let hex = random_str(8, Some("0123456789abcdef"));
/// assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn random_str(size: usize, alphabet: Option<&str>) -> String {
    let charset: Vec<char> = alphabet.unwrap_or(URL_ALPHABET).chars().collect();
    let mut rng = rand::thread_rng();

    (0..size)
        .filter_map(|_| charset.choose(&mut rng).copied())
        .collect()
}

/// Ensures the given string starts with the given prefix
///
/// # Example
///
/// ```rust
/// use utilkit::string::ensure_starts_with;
///
/// assert_eq!(ensure_starts_with("/", "users"), "/users");
/// assert_eq!(ensure_starts_with("/", "/users"), "/users");
/// ```
pub fn ensure_starts_with(prefix: &str, input: &str) -> String {
    if input.starts_with(prefix) {
        input.to_string()
    } else {
        format!("{prefix}{input}")
    }
}

/// Remove the prefix from the string, if present
pub fn remove_prefix<'a>(prefix: &str, input: &'a str) -> &'a str {
    input.strip_prefix(prefix).unwrap_or(input)
}

/// Remove the suffix from the string, if present
pub fn remove_suffix<'a>(suffix: &str, input: &'a str) -> &'a str {
    input.strip_suffix(suffix).unwrap_or(input)
}
