//! Core data types for the pacer request governor.
//!
//! This crate provides the foundation data types shared across the pacer
//! workspace: rate-limit scopes, chat identifiers, and per-call retry
//! options.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod options;
mod scope;
mod telemetry;

pub use options::RequestOptions;
pub use scope::{ChatId, ChatRef, Scope, ScopedRequest, scope_set};
pub use telemetry::init_telemetry;
