//! Per-call retry and rate-limit options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-call configuration for the request governor.
///
/// Immutable for the lifetime of one call. Unset fields fall back to the
/// defaults below.
///
/// # Examples
///
/// ```
/// use pacer_core::RequestOptions;
///
/// let options = RequestOptions {
///     max_retries: 2,
///     initial_delay_ms: 100,
///     ..Default::default()
/// };
///
/// assert_eq!(options.max_delay_ms, 30_000);
/// assert!(!options.skip_rate_limit);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Maximum number of retries after the first attempt
    pub max_retries: usize,
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Ceiling on the backoff delay, in milliseconds
    pub max_delay_ms: u64,
    /// Bypass the rate limiter entirely for this call
    pub skip_rate_limit: bool,
    /// Make exactly one attempt regardless of error classification
    pub skip_retries: bool,
    /// Apply random jitter to backoff delays. Never changes attempt counts.
    pub jitter: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1_000,
            max_delay_ms: 30_000,
            skip_rate_limit: false,
            skip_retries: false,
            jitter: false,
        }
    }
}

impl RequestOptions {
    /// The exact backoff schedule the retry executor will use.
    ///
    /// One entry per permitted retry: the first delay is `initial_delay_ms`,
    /// each subsequent delay doubles, and every delay is capped at
    /// `max_delay_ms`. The first attempt is never delayed, so an empty
    /// schedule means a single attempt. `skip_retries` empties the schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use pacer_core::RequestOptions;
    /// use std::time::Duration;
    ///
    /// let options = RequestOptions {
    ///     max_retries: 3,
    ///     initial_delay_ms: 100,
    ///     max_delay_ms: 250,
    ///     ..Default::default()
    /// };
    ///
    /// assert_eq!(
    ///     options.backoff_delays(),
    ///     vec![
    ///         Duration::from_millis(100),
    ///         Duration::from_millis(200),
    ///         Duration::from_millis(250),
    ///     ],
    /// );
    /// ```
    pub fn backoff_delays(&self) -> Vec<Duration> {
        if self.skip_retries {
            return Vec::new();
        }
        let cap = self.max_delay_ms;
        std::iter::successors(Some(self.initial_delay_ms.min(cap)), move |delay| {
            Some(delay.saturating_mul(2).min(cap))
        })
        .take(self.max_retries)
        .map(Duration::from_millis)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let options = RequestOptions::default();
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.initial_delay_ms, 1_000);
        assert_eq!(options.max_delay_ms, 30_000);
        assert!(!options.skip_rate_limit);
        assert!(!options.skip_retries);
    }

    #[test]
    fn schedule_doubles_and_caps() {
        let options = RequestOptions {
            max_retries: 5,
            initial_delay_ms: 1_000,
            max_delay_ms: 3_000,
            ..Default::default()
        };
        let delays = options.backoff_delays();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(1_000),
                Duration::from_millis(2_000),
                Duration::from_millis(3_000),
                Duration::from_millis(3_000),
                Duration::from_millis(3_000),
            ],
        );
        // Non-decreasing, each at most double the previous.
        for pair in delays.windows(2) {
            assert!(pair[1] >= pair[0]);
            assert!(pair[1] <= pair[0] * 2);
        }
    }

    #[test]
    fn zero_retries_yields_empty_schedule() {
        let options = RequestOptions {
            max_retries: 0,
            ..Default::default()
        };
        assert!(options.backoff_delays().is_empty());
    }

    #[test]
    fn skip_retries_yields_empty_schedule() {
        let options = RequestOptions {
            skip_retries: true,
            ..Default::default()
        };
        assert!(options.backoff_delays().is_empty());
    }
}
