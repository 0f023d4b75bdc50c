//! Tests for the retry executor.

use pacer_core::RequestOptions;
use pacer_error::RetryableError;
use pacer_rate_limit::retry_with_backoff;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallError {
    Transient,
    Permanent,
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Transient => write!(f, "transient failure"),
            CallError::Permanent => write!(f, "permanent failure"),
        }
    }
}

impl RetryableError for CallError {
    fn is_retryable(&self) -> bool {
        matches!(self, CallError::Transient)
    }
}

fn fast_options(max_retries: usize) -> RequestOptions {
    RequestOptions {
        max_retries,
        initial_delay_ms: 10,
        max_delay_ms: 40,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_success_after_transient_failures() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let result = retry_with_backoff(&fast_options(3), || {
        let counter = counter_clone.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(CallError::Transient)
            } else {
                Ok(42)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(42));
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_exhausted_budget_returns_final_failure() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let result: Result<u32, _> = retry_with_backoff(&fast_options(2), || {
        let counter = counter_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CallError::Transient)
        }
    })
    .await;

    assert_eq!(result, Err(CallError::Transient));
    // Initial attempt + 2 retries.
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_permanent_error_short_circuits() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let result: Result<u32, _> = retry_with_backoff(&fast_options(5), || {
        let counter = counter_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CallError::Permanent)
        }
    })
    .await;

    assert_eq!(result, Err(CallError::Permanent));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_skip_retries_forces_single_attempt() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();
    let options = RequestOptions {
        skip_retries: true,
        ..fast_options(5)
    };

    let result: Result<u32, _> = retry_with_backoff(&options, || {
        let counter = counter_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CallError::Transient)
        }
    })
    .await;

    assert_eq!(result, Err(CallError::Transient));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_zero_max_retries_means_one_attempt() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let result: Result<u32, _> = retry_with_backoff(&fast_options(0), || {
        let counter = counter_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CallError::Transient)
        }
    })
    .await;

    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_first_attempt_is_never_delayed() {
    let start = Instant::now();
    let result = retry_with_backoff(&RequestOptions::default(), || async { Ok::<_, CallError>(1) })
        .await;
    assert_eq!(result, Ok(1));
    assert!(start.elapsed().is_zero());
}

// Growth doubles but respects the ceiling: 100ms then 200ms, not 100+100+100.
#[tokio::test(start_paused = true)]
async fn test_backoff_grows_to_the_cap() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();
    let options = RequestOptions {
        max_retries: 2,
        initial_delay_ms: 100,
        max_delay_ms: 200,
        ..Default::default()
    };

    let start = Instant::now();
    let result: Result<u32, _> = retry_with_backoff(&options, || {
        let counter = counter_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CallError::Transient)
        }
    })
    .await;
    let elapsed = start.elapsed();

    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    assert!(
        elapsed >= Duration::from_millis(300),
        "expected at least 100ms + 200ms of backoff, got {:?}",
        elapsed
    );
    assert!(elapsed < Duration::from_millis(400));
}
