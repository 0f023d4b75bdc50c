//! Rate limiting and retry for outbound API calls.
//!
//! This crate sits between every API-call function and the network. It
//! enforces provider-imposed rate limits across overlapping scopes (global,
//! per-conversation, per-group) with a sliding-window log, retries transient
//! failures with exponential backoff, and surfaces permanent failures
//! immediately.
//!
//! The public entry point is [`RequestGovernor`], which composes the
//! [`RateLimiter`] and the retry executor around any call site. Limits come
//! from a [`LimitProfile`]; the built-in [`TelegramLimits`] profile carries
//! the Telegram Bot API's published values, and [`PacerConfig`] loads
//! profiles from TOML.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod governor;
mod limiter;
mod limits;
mod retry;

pub use config::{LimitsConfig, PacerConfig};
pub use governor::RequestGovernor;
pub use limiter::RateLimiter;
pub use limits::{LimitProfile, ScopeLimits, TelegramLimits};
pub use retry::retry_with_backoff;
