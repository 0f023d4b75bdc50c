//! Sliding-window rate limiter with joint admission across scopes.
//!
//! This module provides the `RateLimiter` struct which tracks admitted
//! requests per scope in a sliding-window log (a timestamp deque per bucket)
//! and delays callers until every scope in their set has capacity.
//!
//! Admission is all-or-none: a caller's timestamps are recorded in every
//! scope of its set only once all of them have capacity, so a request
//! waiting on one scope never consumes quota in another. A single mutex
//! around the bucket map serializes check-and-record against concurrent
//! callers; callers waiting for capacity sleep outside the lock.

use crate::LimitProfile;
use pacer_core::Scope;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

/// Slack added to each capacity wait so the freed slot is observed on the
/// first re-check rather than racing the window edge.
const WAIT_MARGIN: Duration = Duration::from_millis(5);

/// Rate limiter that enforces per-scope sliding-window limits.
///
/// The limiter takes ownership of a value implementing [`LimitProfile`] and
/// uses it to configure limits per scope kind. Buckets are created lazily on
/// first reference to a scope, pruned of stale timestamps on each access,
/// and live until [`RateLimiter::reset_all`].
///
/// This component never fails — it only delays. Network and provider errors
/// are not its concern.
///
/// # Example
///
/// ```
/// use pacer_core::{ChatRef, scope_set};
/// use pacer_rate_limit::{RateLimiter, TelegramLimits};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let limiter = RateLimiter::new(TelegramLimits);
/// let scopes = scope_set(Some(ChatRef::from_id(42)));
///
/// let waited = limiter.acquire(&scopes).await;
/// assert_eq!(waited.as_millis(), 0);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RateLimiter<T: LimitProfile> {
    inner: T,

    // Scope -> timestamps of requests admitted within the trailing window.
    buckets: Arc<Mutex<HashMap<Scope, VecDeque<Instant>>>>,
}

impl<T: LimitProfile> RateLimiter<T> {
    /// Create a new rate limiter from a limit profile.
    ///
    /// Takes ownership of the profile. Scopes the profile leaves unlimited
    /// are never tracked.
    pub fn new(profile: T) -> Self {
        debug!(profile = profile.name(), "Creating rate limiter");
        Self {
            inner: profile,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get a reference to the inner limit profile.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Block until every scope in the set admits one request.
    ///
    /// Atomically checks all scopes and, when all have capacity, records the
    /// admission timestamp in each of their buckets. If any scope is at
    /// capacity the caller sleeps until the most-constraining scope's oldest
    /// timestamp leaves its window, then re-checks all scopes — waiting on
    /// one scope never skips the check of the others. Only the calling task
    /// suspends; other callers proceed independently.
    ///
    /// Returns how long the caller waited before admission.
    pub async fn acquire(&self, scopes: &[Scope]) -> Duration {
        let start = Instant::now();
        loop {
            let wait = {
                let mut buckets = self.buckets.lock().await;
                match self.check_and_record(&mut buckets, scopes) {
                    None => {
                        let waited = start.elapsed();
                        if !waited.is_zero() {
                            debug!(waited_ms = waited.as_millis() as u64, "admitted after wait");
                        }
                        return waited;
                    }
                    Some(free_at) => free_at.saturating_duration_since(Instant::now()) + WAIT_MARGIN,
                }
            };
            trace!(wait_ms = wait.as_millis() as u64, "scope at capacity, waiting");
            sleep(wait).await;
        }
    }

    /// Try to admit one request without waiting.
    ///
    /// Returns true and records timestamps if every scope has capacity;
    /// returns false and records nothing otherwise.
    pub async fn try_acquire(&self, scopes: &[Scope]) -> bool {
        let mut buckets = self.buckets.lock().await;
        self.check_and_record(&mut buckets, scopes).is_none()
    }

    /// Clear every bucket across all scopes.
    ///
    /// Intended for test isolation between otherwise-independent test cases
    /// sharing a process. Safe to call at any time; in-flight waiters simply
    /// observe empty buckets on their next re-check.
    pub async fn reset_all(&self) {
        self.buckets.lock().await.clear();
        debug!("cleared all rate-limit buckets");
    }

    /// Check all scopes and record the admission if all have capacity.
    ///
    /// Returns `None` on admission, or the instant at which the
    /// most-constraining full scope frees a slot. Must run under the bucket
    /// map lock so check-and-record is atomic relative to other callers.
    fn check_and_record(
        &self,
        buckets: &mut HashMap<Scope, VecDeque<Instant>>,
        scopes: &[Scope],
    ) -> Option<Instant> {
        let now = Instant::now();
        let mut blocked_until: Option<Instant> = None;

        for scope in scopes {
            let Some(limits) = self.inner.limits_for(scope) else {
                continue;
            };
            let bucket = buckets.entry(*scope).or_default();
            prune(bucket, now, limits.window());
            if bucket.len() as u32 >= limits.max_requests {
                if let Some(oldest) = bucket.front() {
                    let free_at = *oldest + limits.window();
                    blocked_until =
                        Some(blocked_until.map_or(free_at, |until| until.max(free_at)));
                }
            }
        }

        if blocked_until.is_none() {
            for scope in scopes {
                if self.inner.limits_for(scope).is_some() {
                    if let Some(bucket) = buckets.get_mut(scope) {
                        bucket.push_back(now);
                    }
                }
            }
        }

        blocked_until
    }
}

/// Drop timestamps that have aged out of the trailing window.
fn prune(bucket: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(front) = bucket.front() {
        if now.duration_since(*front) >= window {
            bucket.pop_front();
        } else {
            break;
        }
    }
}
