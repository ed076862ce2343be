//! Runtime type predicates
//!
//! Every predicate is a total function from a [`Dynamic`] to `bool`. The
//! same checks are available under short names through the namespace
//! re-exports at the bottom of this module, so callers can write either
//! `is_plain_object(&v)` or `is::plain_object(&v)`.
//!
//! Truthiness is shared with native Rust values through the [`Truthy`]
//! trait.

use crate::types::Dynamic;
use num_bigint::BigInt;
use num_traits::Zero;

pub fn is_boolean(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Bool(_))
}

/// Big integers are not numbers here, only [`Dynamic::Number`] is.
pub fn is_number(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Number(_))
}

pub fn is_string(value: &Dynamic) -> bool {
    matches!(value, Dynamic::String(_))
}

/// True for every callable, constructors included
pub fn is_function(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Function(_))
}

/// Keep in mind arrays and functions are objects.
/// So maybe you want to use [`is_plain_object`] instead.
pub fn is_object(value: &Dynamic) -> bool {
    matches!(
        value,
        Dynamic::Object(_) | Dynamic::Instance { .. } | Dynamic::Array(_) | Dynamic::Function(_)
    )
}

/// True only for structural records without a custom type tag
///
/// Arrays and tagged instances are objects but not plain ones.
pub fn is_plain_object(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Object(_))
}

pub fn is_undefined(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Undefined)
}

pub fn is_null(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Null)
}

pub fn is_null_or_undefined(value: &Dynamic) -> bool {
    is_null(value) || is_undefined(value)
}

/// Returns false if the value is false, 0, NaN, '', null, or undefined.
pub fn is_truthy<T: Truthy + ?Sized>(value: &T) -> bool {
    value.is_truthy()
}

/// Returns true if the value is false, 0, NaN, '', null, or undefined.
pub fn is_falsy<T: Truthy + ?Sized>(value: &T) -> bool {
    !value.is_truthy()
}

pub fn is_array(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Array(_))
}

/// True when `value` is an array whose every element passes `assertion`
///
/// An empty array always passes.
pub fn is_array_of<F>(value: &Dynamic, assertion: F) -> bool
where
    F: Fn(&Dynamic) -> bool,
{
    match value {
        Dynamic::Array(items) => items.iter().all(assertion),
        _ => false,
    }
}

/// True for callables registered as constructors
pub fn is_class(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Function(callable) if callable.is_constructor())
}

pub fn is_positive_number(value: &Dynamic) -> bool {
    matches!(value, Dynamic::Number(n) if *n > 0.0)
}

/// Boolean coercion with the usual falsy set
///
/// Falsy values are `false`, zero (including `-0.0` and big-integer
/// zero), `NaN`, the empty string, `None`, `Null` and `Undefined`.
/// Everything else is truthy, including empty arrays and objects.
pub trait Truthy {
    fn is_truthy(&self) -> bool;

    fn is_falsy(&self) -> bool {
        !self.is_truthy()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_integer {
    ($($ty:ty),*) => {
        $(
            impl Truthy for $ty {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

truthy_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for BigInt {
    fn is_truthy(&self) -> bool {
        !self.is_zero()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthy for Dynamic {
    fn is_truthy(&self) -> bool {
        match self {
            Dynamic::Undefined | Dynamic::Null => false,
            Dynamic::Bool(b) => *b,
            Dynamic::Number(n) => n.is_truthy(),
            Dynamic::BigInt(n) => n.is_truthy(),
            Dynamic::String(s) => s.is_truthy(),
            Dynamic::Array(_)
            | Dynamic::Object(_)
            | Dynamic::Instance { .. }
            | Dynamic::Function(_) => true,
        }
    }
}

impl Truthy for serde_json::Value {
    fn is_truthy(&self) -> bool {
        use serde_json::Value;

        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n.is_truthy()),
            Value::String(s) => s.is_truthy(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

// Short names for `is::boolean(&value)` style call sites
pub use self::{
    is_array as array, is_array_of as array_of, is_boolean as boolean, is_class as class,
    is_falsy as falsy, is_function as function, is_null as null,
    is_null_or_undefined as null_or_undefined, is_number as number, is_object as object,
    is_plain_object as plain_object, is_positive_number as positive_number,
    is_string as string, is_truthy as truthy, is_undefined as undefined,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Callable;
    use serde_json::json;

    fn samples() -> Vec<Dynamic> {
        vec![
            Dynamic::Undefined,
            Dynamic::Null,
            Dynamic::from(true),
            Dynamic::from(42),
            Dynamic::from(BigInt::from(7)),
            Dynamic::from("text"),
            Dynamic::from(vec![1, 2, 3]),
            Dynamic::object([("a", 1)]),
            Dynamic::instance("Map", [("size", 0)]),
            Dynamic::from(Callable::function(|_| Dynamic::Undefined)),
            Dynamic::from(Callable::class("User", |_| Dynamic::object([("id", 1)]))),
        ]
    }

    #[test]
    fn test_primitive_predicates() {
        assert!(is_boolean(&Dynamic::from(false)));
        assert!(!is_boolean(&Dynamic::from(0)));

        assert!(is_number(&Dynamic::from(0)));
        assert!(is_number(&Dynamic::Number(f64::NAN)));
        assert!(!is_number(&Dynamic::from(BigInt::from(1))));
        assert!(!is_number(&Dynamic::from("1")));

        assert!(is_string(&Dynamic::from("")));
        assert!(!is_string(&Dynamic::Null));

        assert!(is_undefined(&Dynamic::Undefined));
        assert!(!is_undefined(&Dynamic::Null));
        assert!(is_null(&Dynamic::Null));
        assert!(!is_null(&Dynamic::Undefined));
        assert!(is_null_or_undefined(&Dynamic::Null));
        assert!(is_null_or_undefined(&Dynamic::Undefined));
        assert!(!is_null_or_undefined(&Dynamic::from(0)));
    }

    #[test]
    fn test_object_predicates() {
        let objects: Vec<bool> = samples().iter().map(is_object).collect();
        assert_eq!(
            objects,
            vec![false, false, false, false, false, false, true, true, true, true, true]
        );

        let plain: Vec<bool> = samples().iter().map(is_plain_object).collect();
        assert_eq!(
            plain,
            vec![false, false, false, false, false, false, false, true, false, false, false]
        );
    }

    #[test]
    fn test_function_and_class() {
        let func = Dynamic::from(Callable::function(|_| Dynamic::Null));
        let class = Dynamic::from(Callable::class("User", |_| Dynamic::Null));

        assert!(is_function(&func));
        assert!(is_function(&class));
        assert!(!is_class(&func));
        assert!(is_class(&class));
        assert!(!is_class(&Dynamic::object([("prototype", 1)])));
    }

    #[test]
    fn test_arrays() {
        let numbers = Dynamic::from(vec![1, 2, 3]);
        let mixed = Dynamic::Array(vec![Dynamic::from(1), Dynamic::from("2")]);

        assert!(is_array(&numbers));
        assert!(!is_array(&Dynamic::object([("0", 1)])));
        assert!(is_array_of(&numbers, is_number));
        assert!(!is_array_of(&mixed, is_number));
        assert!(is_array_of(&Dynamic::Array(vec![]), is_string));
        assert!(!is_array_of(&Dynamic::from("abc"), is_string));
    }

    #[test]
    fn test_positive_number() {
        assert!(is_positive_number(&Dynamic::from(0.1)));
        assert!(!is_positive_number(&Dynamic::from(0)));
        assert!(!is_positive_number(&Dynamic::from(-3)));
        assert!(!is_positive_number(&Dynamic::Number(f64::NAN)));
        assert!(!is_positive_number(&Dynamic::from("5")));
    }

    #[test]
    fn test_dynamic_truthiness() {
        let falsy = [
            Dynamic::from(false),
            Dynamic::from(0),
            Dynamic::Number(-0.0),
            Dynamic::Number(f64::NAN),
            Dynamic::from(BigInt::from(0)),
            Dynamic::from(""),
            Dynamic::Null,
            Dynamic::Undefined,
        ];
        for value in &falsy {
            assert!(is_falsy(value), "{value:?} should be falsy");
            assert!(!is_truthy(value), "{value:?} should not be truthy");
        }

        let truthy = [
            Dynamic::from(true),
            Dynamic::from(-1),
            Dynamic::from("0"),
            Dynamic::from(BigInt::from(-2)),
            Dynamic::Array(vec![]),
            Dynamic::object(Vec::<(String, Dynamic)>::new()),
        ];
        for value in &truthy {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
    }

    #[test]
    fn test_native_truthiness() {
        assert!(is_truthy(&1u8));
        assert!(is_falsy(&0i64));
        assert!(is_falsy(&f64::NAN));
        assert!(is_falsy(""));
        assert!(is_truthy("a"));
        assert!(is_falsy(&String::new()));
        assert!(is_falsy(&None::<i32>));
        assert!(is_falsy(&Some(0)));
        assert!(is_truthy(&Some("x")));
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(0)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_namespace_aliases() {
        let value = Dynamic::object([("a", 1)]);
        assert!(crate::is::plain_object(&value));
        assert!(crate::is::object(&value));
        assert!(!crate::is::array(&value));
        assert!(crate::is::truthy(&value));
        assert!(crate::is::null(&Dynamic::Null));
    }
}
