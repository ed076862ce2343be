//! Case conversion
//!
//! Word boundaries are detected on separators (`-`, `_`, whitespace) and on
//! lower-to-upper transitions, so every function accepts input in any of
//! the other cases.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase};

/// Convert string to camelCase
pub fn camel_case(value: &str) -> String {
    value.to_lower_camel_case()
}

/// Convert string to snake_case
pub fn snake_case(value: &str) -> String {
    value.to_snake_case()
}

/// Convert string to kebab-case
pub fn kebab_case(value: &str) -> String {
    value.to_kebab_case()
}

/// Convert string to PascalCase
pub fn pascal_case(value: &str) -> String {
    value.to_upper_camel_case()
}

/// Convert string to Capital Case
pub fn capital_case(value: &str) -> String {
    value.to_title_case()
}
