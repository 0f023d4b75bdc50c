//! Pacer - Outbound-Request Governor
//!
//! Pacer sits between API-call functions and the network. It enforces
//! provider-imposed rate limits across overlapping scopes (global,
//! per-conversation, per-group), retries transient failures with exponential
//! backoff, and surfaces permanent failures immediately.
//!
//! # Features
//!
//! - **Sliding-window rate limiting**: all-or-none admission across every
//!   scope that applies to a call
//! - **Retry with backoff**: transient/permanent classification drives a
//!   bounded exponential-backoff loop
//! - **Profiles**: built-in Telegram limits, TOML-configurable overrides
//! - **One seam**: every call site routes through `RequestGovernor`
//!
//! # Quick Start
//!
//! ```rust
//! use pacer::{ApiError, ChatRef, RequestGovernor, RequestOptions, ScopedRequest, TelegramLimits};
//!
//! struct SendMessage {
//!     chat_id: i64,
//!     text: String,
//! }
//!
//! impl ScopedRequest for SendMessage {
//!     fn chat(&self) -> Option<ChatRef> {
//!         Some(ChatRef::from_id(self.chat_id))
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ApiError> {
//!     let governor = RequestGovernor::new(TelegramLimits);
//!     let params = SendMessage { chat_id: 42, text: "hello".to_string() };
//!
//!     let message_id: u64 = governor
//!         .request_with_handling(&params, &RequestOptions::default(), || async {
//!             // the underlying HTTP call goes here
//!             Ok::<u64, ApiError>(7)
//!         })
//!         .await?;
//!     assert_eq!(message_id, 7);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Pacer is organized as a workspace with focused crates:
//!
//! - `pacer_core` - Scopes, chat identifiers, per-call options
//! - `pacer_error` - Error types and transient/permanent classification
//! - `pacer_rate_limit` - Limiter, retry executor, and the governor
//!
//! This crate (`pacer`) re-exports everything for convenience.

#![forbid(unsafe_code)]

// Re-export the workspace crates
pub use pacer_core::*;
pub use pacer_error::*;
pub use pacer_rate_limit::*;
