//! Function helpers
//!
//! Call-at-most-once wrappers, optional invocation and a pair-returning
//! async catch.

use crate::error::Result;
use crate::string::ms::{self, MsInput};
use std::fmt;
use std::future::Future;
use tracing::debug;

/// Wrapper restricting a function to a single invocation
///
/// Created by [`once`]. The first [`Once::call`] runs the function; every
/// later call ignores its arguments and returns a clone of the first
/// result.
pub struct Once<F, T> {
    func: F,
    result: Option<T>,
}

impl<F, T: Clone> Once<F, T> {
    /// Invoke the wrapped function, or replay its first result
    pub fn call<A>(&mut self, args: A) -> T
    where
        F: FnMut(A) -> T,
    {
        let func = &mut self.func;
        self.result.get_or_insert_with(|| func(args)).clone()
    }

    /// Whether the wrapped function has already run
    pub fn has_run(&self) -> bool {
        self.result.is_some()
    }
}

impl<F, T: fmt::Debug> fmt::Debug for Once<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once")
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

/// Creates a function that is restricted to invoking `func` once
///
/// # Example
///
/// ```rust
/// use utilkit::functions::once;
///
/// let mut init = once(|name: &str| format!("hello {name}"));
/// assert_eq!(init.call("world"), "hello world");
/// assert_eq!(init.call("again"), "hello world");
/// ```
pub fn once<F, T>(func: F) -> Once<F, T> {
    Once { func, result: None }
}

/// A no-operation function that does nothing
pub fn noop() {}

/// An asynchronous no-operation function that does nothing
pub async fn async_noop() {}

/// Call the function if there is one
///
/// # Example
///
/// ```rust
/// use utilkit::functions::invoke;
///
/// assert_eq!(invoke(Some(|| 42)), Some(42));
/// assert_eq!(invoke(None::<fn() -> i32>), None);
/// ```
pub fn invoke<F, T>(func: Option<F>) -> Option<T>
where
    F: FnOnce() -> T,
{
    func.map(|f| f())
}

/// Call every present function in order, discarding results
pub fn batch_invoke<I, F>(functions: I)
where
    I: IntoIterator<Item = Option<F>>,
    F: FnOnce(),
{
    functions.into_iter().flatten().for_each(|f| f());
}

/// Await the operation and split its outcome into a pair
///
/// Returns `(Some(value), None)` on success and `(None, Some(error))` on
/// failure. Panics are not caught.
///
/// # Example
///
/// ```rust
/// use utilkit::functions::try_async;
///
/// # tokio_test::block_on(async {
/// let (value, error) = try_async(|| async { "42".parse::<i32>() }).await;
/// assert_eq!(value, Some(42));
/// assert!(error.is_none());
/// # });
/// ```
pub async fn try_async<F, Fut, T, E>(operation: F) -> (Option<T>, Option<E>)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    match operation().await {
        Ok(value) => (Some(value), None),
        Err(error) => (None, Some(error)),
    }
}

/// Like [`try_async`], but only errors of kind `E` are captured
///
/// Failures that downcast to `E` land in the pair. Anything else is
/// returned as `Err` for the caller to propagate.
///
/// # Errors
///
/// Returns the original error when it is not an `E`.
pub async fn try_async_narrow<E, F, Fut, T>(
    operation: F,
) -> anyhow::Result<(Option<T>, Option<E>)>
where
    E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    match operation().await {
        Ok(value) => Ok((Some(value), None)),
        Err(error) => match error.downcast::<E>() {
            Ok(caught) => Ok((None, Some(caught))),
            Err(other) => {
                debug!("Re-raising uncaught error: {}", other);
                Err(other)
            }
        },
    }
}

/// Suspend for the given milliseconds or duration expression
///
/// # Errors
///
/// Returns [`crate::UtilError::InvalidDuration`] when the duration cannot
/// be parsed or is negative.
///
/// # Example
///
/// ```rust
/// use utilkit::functions::sleep;
///
/// # tokio_test::block_on(async {
/// sleep("5ms").await.unwrap();
/// sleep(1u32).await.unwrap();
/// # });
/// ```
pub async fn sleep<'a>(duration: impl Into<MsInput<'a>>) -> Result<()> {
    let duration = ms::to_duration(duration)?;
    tokio::time::sleep(duration).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UtilError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn test_once_runs_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let mut double = once(move |n: i32| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
            n * 2
        });
        assert!(!double.has_run());

        assert_eq!(double.call(1), 2);
        assert_eq!(double.call(5), 2);
        assert_eq!(double.call(10), 2);
        assert!(double.has_run());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_once_without_arguments() {
        let mut init = once(|()| vec![1, 2, 3]);
        let first = init.call(());
        let second = init.call(());
        assert_eq!(first, second);
    }

    #[test]
    fn test_invoke() {
        assert_eq!(invoke(Some(|| "called")), Some("called"));
        assert_eq!(invoke::<fn() -> u8, u8>(None), None);
    }

    #[test]
    fn test_batch_invoke() {
        let counter = Arc::new(AtomicU32::new(0));
        let make = |step: u32| {
            let counter = counter.clone();
            move || {
                counter.fetch_add(step, Ordering::SeqCst);
            }
        };

        batch_invoke(vec![Some(make(1)), None, Some(make(10)), None]);
        assert_eq!(counter.load(Ordering::SeqCst), 11);

        batch_invoke(Vec::<Option<fn()>>::new());
    }

    #[test]
    fn test_noops() {
        noop();
        tokio_test::block_on(async_noop());
    }

    #[tokio::test]
    async fn test_try_async_success() {
        let (value, error) = try_async(|| async { Ok::<_, UtilError>("success") }).await;
        assert_eq!(value, Some("success"));
        assert_eq!(error, None);
    }

    #[tokio::test]
    async fn test_try_async_failure() {
        let (value, error) =
            try_async(|| async { Err::<(), _>(UtilError::custom("HTTP error: 500")) }).await;
        assert_eq!(value, None);
        assert_eq!(error, Some(UtilError::custom("HTTP error: 500")));
    }

    #[tokio::test]
    async fn test_try_async_narrow_catches_matching_kind() {
        let (value, error) = try_async_narrow::<UtilError, _, _, ()>(|| async {
            Err::<(), anyhow::Error>(UtilError::invalid_argument("bad").into())
        })
        .await
        .unwrap();

        assert!(value.is_none());
        assert_eq!(error, Some(UtilError::invalid_argument("bad")));
    }

    #[tokio::test]
    async fn test_try_async_narrow_reraises_other_kinds() {
        let result = try_async_narrow::<UtilError, _, _, ()>(|| async {
            Err::<(), _>(anyhow::anyhow!("not a util error"))
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "not a util error");
    }

    #[tokio::test]
    async fn test_try_async_narrow_success() {
        let (value, error) =
            try_async_narrow::<UtilError, _, _, _>(|| async { Ok::<_, anyhow::Error>(7) })
                .await
                .unwrap();
        assert_eq!(value, Some(7));
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn test_sleep() {
        let start = Instant::now();
        sleep("20ms").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));

        sleep(0u32).await.unwrap();
    }

    #[tokio::test]
    async fn test_sleep_invalid() {
        let err = sleep("later").await.unwrap_err();
        assert!(matches!(err, UtilError::InvalidDuration(_)));
        assert!(sleep(-5.0).await.is_err());
    }
}
