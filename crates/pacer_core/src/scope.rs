//! Rate-limit scopes and chat identifiers.

use serde::{Deserialize, Serialize};

/// Unique identifier for a chat (conversation or group).
///
/// # Examples
///
/// ```
/// use pacer_core::ChatId;
///
/// let id = ChatId::new(42);
/// assert_eq!(id.get(), 42);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ChatId(i64);

impl ChatId {
    /// Create a new chat identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

/// Reference to the chat a call targets, carrying its kind.
///
/// Group chats have different provider limits than direct conversations, so
/// the two are tracked disjointly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ChatRef {
    /// A one-on-one conversation
    #[display("conversation {}", _0)]
    Direct(ChatId),
    /// A group-type chat
    #[display("group {}", _0)]
    Group(ChatId),
}

impl ChatRef {
    /// Build a chat reference from a raw identifier.
    ///
    /// Follows the Telegram convention: negative identifiers denote groups
    /// and supergroups, positive identifiers denote direct conversations.
    ///
    /// # Examples
    ///
    /// ```
    /// use pacer_core::{ChatId, ChatRef};
    ///
    /// assert_eq!(ChatRef::from_id(42), ChatRef::Direct(ChatId::new(42)));
    /// assert_eq!(ChatRef::from_id(-100), ChatRef::Group(ChatId::new(-100)));
    /// ```
    pub fn from_id(id: i64) -> Self {
        if id < 0 {
            ChatRef::Group(ChatId::new(id))
        } else {
            ChatRef::Direct(ChatId::new(id))
        }
    }

    /// The chat-specific rate-limit scope for this reference.
    pub fn scope(&self) -> Scope {
        match self {
            ChatRef::Direct(id) => Scope::Conversation(*id),
            ChatRef::Group(id) => Scope::Group(*id),
        }
    }
}

/// A rate-limit bucket identifier.
///
/// Several scopes may apply to a single outbound call at once — typically
/// [`Scope::Global`] plus either [`Scope::Conversation`] or [`Scope::Group`],
/// never both. Each scope is tracked in its own bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Scope {
    /// One bucket shared by every call from this process
    #[display("global")]
    Global,
    /// One bucket per distinct conversation
    #[display("conversation {}", _0)]
    Conversation(ChatId),
    /// One bucket per distinct group chat, tracked separately from
    /// conversations because group limits differ
    #[display("group {}", _0)]
    Group(ChatId),
}

/// Resolve the scope set for a call.
///
/// Every call is subject to the global scope; calls that target a chat are
/// additionally subject to that chat's scope.
///
/// # Examples
///
/// ```
/// use pacer_core::{ChatRef, Scope, scope_set};
///
/// assert_eq!(scope_set(None), vec![Scope::Global]);
///
/// let scopes = scope_set(Some(ChatRef::from_id(7)));
/// assert_eq!(scopes.len(), 2);
/// assert_eq!(scopes[0], Scope::Global);
/// ```
pub fn scope_set(chat: Option<ChatRef>) -> Vec<Scope> {
    match chat {
        Some(chat) => vec![Scope::Global, chat.scope()],
        None => vec![Scope::Global],
    }
}

/// Request parameters that can name the chat they target.
///
/// The governor inspects params through this trait to derive the scope set
/// for a call. Params with no identifiable chat return `None` and are
/// limited by the global scope only.
///
/// # Examples
///
/// ```
/// use pacer_core::{ChatRef, ScopedRequest};
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
/// ```
pub trait ScopedRequest {
    /// The chat this request targets, if any.
    fn chat(&self) -> Option<ChatRef>;
}
