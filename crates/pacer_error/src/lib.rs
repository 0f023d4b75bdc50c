//! Error types for the pacer request governor.
//!
//! This crate provides the foundation error types used throughout the pacer
//! workspace, including the transient/permanent classification that drives
//! retry decisions.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use pacer_error::{ApiError, ApiErrorKind, RetryableError};
//!
//! let err = ApiError::new(ApiErrorKind::HttpStatus {
//!     status_code: 503,
//!     message: "Service Unavailable".to_string(),
//! });
//! assert!(err.is_retryable());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;

pub use api::{ApiError, ApiErrorKind, ErrorClass, RetryableError};
pub use config::ConfigError;
pub use error::{PacerError, PacerErrorKind, PacerResult};
