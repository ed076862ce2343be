//! utilkit
//!
//! Small, stateless helpers shared across services: runtime type
//! predicates, array and object transforms, string formatting (casing,
//! byte sizes, durations), function wrappers and pluggable logger
//! adapters.
//!
//! # Features
//!
//! - **Predicates**: `is::*` checks over a dynamic [`Dynamic`] value, plus a
//!   [`Truthy`] trait for native values
//! - **Arrays**: [`uniq`], [`uniq_by`], [`to_array`] and a lazy
//!   [`chunkify`] iterator
//! - **Objects**: entry/key/value mapping, `pick`/`omit` and dotted-path
//!   access like `"friends[0].name"`
//! - **Strings**: case conversion, random ids, human readable byte sizes
//!   and durations
//! - **Functions**: [`once`], [`invoke`], [`try_async`], [`sleep`]
//! - **Logging**: console, silent, recording and `tracing` backed loggers
//!
//! # Quick Start
//!
//! ```rust
//! use utilkit::{chunkify, object, string::bytes};
//! use serde_json::json;
//!
//! let groups: Vec<Vec<i32>> = chunkify(vec![1, 2, 3, 4, 5], 2).unwrap().collect();
//! assert_eq!(groups, vec![vec![1, 2], vec![3, 4], vec![5]]);
//!
//! let user = json!({ "friends": [{ "name": "Jane" }] });
//! assert_eq!(object::get(&user, "friends[0].name", None), Some(&json!("Jane")));
//!
//! assert_eq!(bytes::parse("1.5kb").unwrap(), 1536);
//! ```

/// Crate version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod error;
pub mod types;

// Helper modules
pub mod array;
pub mod functions;
pub mod is;
pub mod object;
pub mod string;

// Logging
pub mod logger;

// Re-exports for convenience
pub use error::{Result, UtilError};
pub use types::{Callable, CallableKind, Dynamic, Fields, OneOrMany, TypeTag};

pub use array::{chunkify, chunkify_slice, to_array, uniq, uniq_by};
pub use functions::{
    async_noop, batch_invoke, invoke, noop, once, sleep, try_async, try_async_narrow, Once,
};
pub use is::Truthy;
pub use logger::{
    ConsoleLogger, Level, LogRecord, Logger, LoggerConfig, NoopLogger, TestLogger, TracingLogger,
};
pub use string::{
    camel_case, capital_case, capitalize, ensure_starts_with, kebab_case, pascal_case,
    random_str, remove_prefix, remove_suffix, snake_case,
};
