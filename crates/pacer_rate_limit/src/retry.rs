//! Retry executor with bounded exponential backoff.

use pacer_core::RequestOptions;
use pacer_error::RetryableError;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::jitter};
use tracing::warn;

/// Invoke an async operation with bounded exponential-backoff retry.
///
/// The operation runs up to `max_retries + 1` times. The first attempt is
/// never delayed; each failed attempt is classified through
/// [`RetryableError`], and only transient errors consume retry budget —
/// a permanent classification returns the failure immediately regardless of
/// remaining budget. Delays follow [`RequestOptions::backoff_delays`]:
/// doubling from `initial_delay_ms` up to the `max_delay_ms` ceiling.
/// `skip_retries` (and `max_retries == 0`) force exactly one attempt.
///
/// The final error is returned unmodified; callers cannot distinguish
/// "failed after retries" from "failed immediately" except by latency.
/// Only the calling task suspends during backoff sleeps.
///
/// # Example
///
/// ```
/// use pacer_core::RequestOptions;
/// use pacer_error::ApiError;
/// use pacer_rate_limit::retry_with_backoff;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let options = RequestOptions::default();
/// let result: Result<u32, ApiError> = retry_with_backoff(&options, || async {
///     Ok(42)
/// })
/// .await;
/// assert_eq!(result.unwrap(), 42);
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, R, E>(options: &RequestOptions, operation: F) -> Result<R, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: RetryableError + Display,
{
    let schedule: Vec<Duration> = if options.jitter {
        options.backoff_delays().into_iter().map(jitter).collect()
    } else {
        options.backoff_delays()
    };

    Retry::spawn(schedule, || async {
        let result = operation().await;

        // Convert to RetryError based on classification
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_retryable() {
                    warn!("Transient error, will retry if budget remains: {}", e);
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                } else {
                    warn!("Permanent error, failing immediately: {}", e);
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}
