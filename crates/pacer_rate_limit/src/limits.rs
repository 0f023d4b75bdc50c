//! Limit profiles describing per-scope rate constraints.

use pacer_core::Scope;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate constraint for one scope: at most `max_requests` admissions within
/// any trailing window of `window_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeLimits {
    /// Maximum requests admitted within the window. Zero means unlimited.
    pub max_requests: u32,
    /// Window length in milliseconds
    pub window_ms: u64,
}

impl ScopeLimits {
    /// Create a new scope limit.
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self {
            max_requests,
            window_ms,
        }
    }

    /// The window as a [`Duration`].
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Represents the rate limits a provider imposes across scopes.
///
/// Providers constrain outbound traffic along several axes at once: a global
/// ceiling for the whole bot, a per-conversation limit, and a distinct
/// per-group limit. This trait provides a common interface for querying
/// those constraints.
///
/// All methods return `Option<ScopeLimits>` where `None` indicates the scope
/// is unlimited.
///
/// # Example
///
/// ```
/// use pacer_rate_limit::{LimitProfile, ScopeLimits};
///
/// struct Lenient;
///
/// impl LimitProfile for Lenient {
///     fn global(&self) -> Option<ScopeLimits> { Some(ScopeLimits::new(100, 1_000)) }
///     fn per_conversation(&self) -> Option<ScopeLimits> { None }
///     fn per_group(&self) -> Option<ScopeLimits> { None }
///     fn name(&self) -> &str { "Lenient" }
/// }
/// ```
pub trait LimitProfile: Send + Sync {
    /// Limit shared by every call from this process.
    ///
    /// Returns `None` if there is no global limit.
    fn global(&self) -> Option<ScopeLimits>;

    /// Limit applied per distinct conversation.
    ///
    /// Returns `None` if there is no per-conversation limit.
    fn per_conversation(&self) -> Option<ScopeLimits>;

    /// Limit applied per distinct group chat.
    ///
    /// Returns `None` if there is no per-group limit.
    fn per_group(&self) -> Option<ScopeLimits>;

    /// Name of the profile (e.g., "Telegram").
    fn name(&self) -> &str;

    /// The effective limit for a scope.
    ///
    /// A configured limit of `max_requests == 0` is treated the same as no
    /// limit at all.
    fn limits_for(&self, scope: &Scope) -> Option<ScopeLimits> {
        let limits = match scope {
            Scope::Global => self.global(),
            Scope::Conversation(_) => self.per_conversation(),
            Scope::Group(_) => self.per_group(),
        };
        limits.filter(|l| l.max_requests > 0)
    }
}

/// Telegram Bot API rate limits.
///
/// Based on the published Bot API guidance: roughly 30 messages per second
/// overall, one message per second to any single chat, and 20 messages per
/// minute to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TelegramLimits;

impl LimitProfile for TelegramLimits {
    fn global(&self) -> Option<ScopeLimits> {
        Some(ScopeLimits::new(30, 1_000))
    }

    fn per_conversation(&self) -> Option<ScopeLimits> {
        Some(ScopeLimits::new(1, 1_000))
    }

    fn per_group(&self) -> Option<ScopeLimits> {
        Some(ScopeLimits::new(20, 60_000))
    }

    fn name(&self) -> &str {
        "Telegram"
    }
}
