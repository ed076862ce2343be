//! Array utility functions
//!
//! Normalizing scalar-or-list inputs, deduplication and chunking.

pub mod chunkify;

use crate::types::OneOrMany;
use std::collections::HashSet;
use std::hash::Hash;

pub use chunkify::{chunkify, chunkify_slice, Chunkify, SliceChunks};

/// Converts a value to a vector. If the value is already a list, it is returned as is
///
/// # Example
///
/// ```rust
/// use utilkit::array::to_array;
/// use utilkit::types::OneOrMany;
///
/// assert_eq!(to_array(OneOrMany::One(1)), vec![1]);
/// assert_eq!(to_array(vec![1, 2]), vec![1, 2]);
/// ```
pub fn to_array<T>(value: impl Into<OneOrMany<T>>) -> Vec<T> {
    value.into().into_vec()
}

/// Creates a duplicate-free version of a slice
///
/// The first occurrence of each element wins and order is preserved.
///
/// # Arguments
///
/// * `arr` - The slice to deduplicate
///
/// # Returns
///
/// A new vector holding each distinct element once.
///
/// # Example
///
/// ```rust
/// use utilkit::array::uniq;
///
/// let data = vec![1, 2, 2, 3, 1, 4];
/// assert_eq!(uniq(&data), vec![1, 2, 3, 4]);
/// ```
pub fn uniq<T: Clone + Eq + Hash>(arr: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for item in arr {
        if seen.insert(item) {
            result.push(item.clone());
        }
    }

    result
}

/// Returns the elements of `arr` that are unique by the key `mapper` returns
///
/// For every key the first element that produced it is kept.
///
/// # Arguments
///
/// * `arr` - The slice to deduplicate
/// * `mapper` - Computes the key two elements are compared by
///
/// # Example
///
/// ```rust
/// use utilkit::array::uniq_by;
///
/// let words = vec!["apple", "avocado", "banana", "blueberry", "cherry"];
/// let firsts = uniq_by(&words, |w| w.chars().next());
/// assert_eq!(firsts, vec!["apple", "banana", "cherry"]);
/// ```
pub fn uniq_by<T, U, F>(arr: &[T], mapper: F) -> Vec<T>
where
    T: Clone,
    U: Eq + Hash,
    F: Fn(&T) -> U,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for item in arr {
        if seen.insert(mapper(item)) {
            result.push(item.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_array() {
        assert_eq!(to_array(OneOrMany::One("a")), vec!["a"]);
        assert_eq!(to_array(vec!["a", "b"]), vec!["a", "b"]);
        assert!(to_array(Vec::<i32>::new()).is_empty());
    }

    #[test]
    fn test_uniq() {
        let data = vec![1, 2, 2, 3, 1, 4];
        assert_eq!(uniq(&data), vec![1, 2, 3, 4]);

        // Already unique
        assert_eq!(uniq(&[1, 2, 3]), vec![1, 2, 3]);

        // Empty
        let data: Vec<i32> = vec![];
        assert!(uniq(&data).is_empty());

        let words = vec!["b", "a", "b"];
        assert_eq!(uniq(&words), vec!["b", "a"]);
    }

    #[test]
    fn test_uniq_by() {
        #[derive(Debug, Clone, PartialEq)]
        struct User {
            id: u32,
            name: &'static str,
        }

        let users = vec![
            User { id: 1, name: "Jane" },
            User { id: 2, name: "John" },
            User { id: 1, name: "Jane (duplicate)" },
        ];

        let unique = uniq_by(&users, |u| u.id);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "Jane");
        assert_eq!(unique[1].name, "John");

        let empty: Vec<User> = vec![];
        assert!(uniq_by(&empty, |u| u.id).is_empty());
    }
}
