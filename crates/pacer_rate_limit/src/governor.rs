//! The request governor: the single seam every outbound call routes through.

use crate::{LimitProfile, RateLimiter, retry_with_backoff};
use pacer_core::{RequestOptions, ScopedRequest, scope_set};
use pacer_error::RetryableError;
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

/// Composes rate-limit acquisition and retry around outbound API calls.
///
/// Every API-call function routes through [`RequestGovernor::request_with_handling`]:
/// the governor derives the scope set from the call's params, blocks until
/// the rate limiter admits the call (unless `skip_rate_limit`), then invokes
/// the underlying call through the retry executor with the resolved options.
/// The underlying outcome is returned unchanged — the governor decides
/// whether to retry, never what the final error looks like.
///
/// The governor holds no shared state of its own; the limiter's bucket map
/// is the only shared mutable state. Construct one instance at the
/// application root and hand it to call sites — tests inject a fresh
/// instance (or call [`RequestGovernor::reset_all`]) instead of relying on
/// ambient globals.
///
/// # Example
///
/// ```
/// use pacer_core::{ChatRef, RequestOptions, ScopedRequest};
/// use pacer_error::ApiError;
/// use pacer_rate_limit::{RequestGovernor, TelegramLimits};
///
/// struct SendMessage {
///     chat_id: i64,
///     text: String,
/// }
///
/// impl ScopedRequest for SendMessage {
///     fn chat(&self) -> Option<ChatRef> {
///         Some(ChatRef::from_id(self.chat_id))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), ApiError> {
/// let governor = RequestGovernor::new(TelegramLimits);
/// let params = SendMessage { chat_id: 42, text: "hello".to_string() };
///
/// let message_id: u64 = governor
///     .request_with_handling(&params, &RequestOptions::default(), || async {
///         // the underlying HTTP call goes here
///         Ok::<u64, ApiError>(7)
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RequestGovernor<T: LimitProfile> {
    limiter: RateLimiter<T>,
}

impl<T: LimitProfile> RequestGovernor<T> {
    /// Create a governor enforcing the given limit profile.
    pub fn new(profile: T) -> Self {
        Self {
            limiter: RateLimiter::new(profile),
        }
    }

    /// Get a reference to the underlying rate limiter.
    pub fn limiter(&self) -> &RateLimiter<T> {
        &self.limiter
    }

    /// Run an outbound call under rate limiting and retry.
    ///
    /// 1. Derives the scope set from `params` (global, plus the chat scope
    ///    when the params name one).
    /// 2. Unless `options.skip_rate_limit`, blocks until every scope admits
    ///    the call.
    /// 3. Invokes `call` through the retry executor with `options`.
    ///
    /// The result is the executor's final outcome, unmodified.
    pub async fn request_with_handling<P, F, Fut, R, E>(
        &self,
        params: &P,
        options: &RequestOptions,
        call: F,
    ) -> Result<R, E>
    where
        P: ScopedRequest,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: RetryableError + Display,
    {
        if options.skip_rate_limit {
            debug!("rate limiting bypassed for this call");
        } else {
            let scopes = scope_set(params.chat());
            let waited = self.limiter.acquire(&scopes).await;
            if !waited.is_zero() {
                debug!(
                    waited_ms = waited.as_millis() as u64,
                    "rate limiter delayed call"
                );
            }
        }

        retry_with_backoff(options, call).await
    }

    /// Invoke a call directly, bypassing both rate limiting and retries.
    ///
    /// The opt-out path for callers that explicitly want a bare invocation
    /// through the same seam, without duplicating call-site logic.
    pub async fn call_direct<F, Fut, R, E>(&self, call: F) -> Result<R, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        call().await
    }

    /// Clear all rate-limit bucket state.
    ///
    /// Administrative hook for test harnesses that need isolation between
    /// test cases sharing a process.
    pub async fn reset_all(&self) {
        self.limiter.reset_all().await;
    }
}
