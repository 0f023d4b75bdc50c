//! Outbound API call error types and retry classification.

/// Verdict of the error classifier.
///
/// Every failed outbound call is sorted into one of two classes:
/// - [`ErrorClass::Transient`] — worth retrying after a backoff delay
/// - [`ErrorClass::Permanent`] — retrying cannot change the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorClass {
    /// Temporary unavailability; the call may succeed if retried.
    #[display("transient")]
    Transient,
    /// The failure will not resolve on retry; surface it immediately.
    #[display("permanent")]
    Permanent,
}

/// API error conditions for outbound provider calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ApiErrorKind {
    /// The request timed out before the provider answered
    #[display("Request timed out")]
    Timeout,
    /// A connection to the provider could not be established or was dropped
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// The provider answered with a non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message or provider-reported description
        message: String,
    },
    /// The provider reported a domain error in its response body
    #[display("Provider error: {}", _0)]
    Provider(String),
    /// The response body could not be decoded
    #[display("Response decode error: {}", _0)]
    Decode(String),
    /// The request could not be built or sent
    #[display("Request error: {}", _0)]
    Request(String),
}

impl ApiErrorKind {
    /// Classify this error as transient or permanent.
    ///
    /// Transient errors are the HTTP-layer signals of temporary
    /// unavailability: timeouts, connection failures, status codes
    /// 429/502/503/504, and provider descriptions that spell out
    /// "Bad Gateway" or "Service Unavailable".
    ///
    /// Everything else — notably provider domain errors such as
    /// "chat not found" or "message to edit not found", malformed requests,
    /// and authentication failures — classifies as permanent. Unrecognized
    /// shapes deliberately default to permanent: failing fast on an unknown
    /// error beats retrying it indefinitely. Keep the transient list in sync
    /// with the provider's actual error vocabulary, or real transient errors
    /// will surface as fatal.
    pub fn classify(&self) -> ErrorClass {
        match self {
            ApiErrorKind::Timeout => ErrorClass::Transient,
            ApiErrorKind::Connection(_) => ErrorClass::Transient,
            ApiErrorKind::HttpStatus {
                status_code,
                message,
            } => {
                if matches!(*status_code, 429 | 502 | 503 | 504) || transient_description(message)
                {
                    ErrorClass::Transient
                } else {
                    ErrorClass::Permanent
                }
            }
            ApiErrorKind::Provider(message) if transient_description(message) => {
                ErrorClass::Transient
            }
            _ => ErrorClass::Permanent,
        }
    }

    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        self.classify() == ErrorClass::Transient
    }
}

/// Provider descriptions that indicate temporary unavailability.
fn transient_description(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("bad gateway") || lower.contains("service unavailable")
}

/// API error with source location tracking.
///
/// # Examples
///
/// ```
/// use pacer_error::{ApiError, ApiErrorKind, ErrorClass};
///
/// let err = ApiError::new(ApiErrorKind::Provider("chat not found".to_string()));
/// assert_eq!(err.classify(), ErrorClass::Permanent);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("API Error: {} at line {} in {}", kind, line, file)]
pub struct ApiError {
    /// The kind of error that occurred
    pub kind: ApiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ApiError {
    /// Create a new ApiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// Telegram-style APIs report failures as JSON bodies of the form
    /// `{"ok": false, "description": "..."}`. When the body parses and
    /// carries a `description`, that text becomes the error message so the
    /// classifier can inspect it; otherwise the raw body is used.
    ///
    /// # Examples
    ///
    /// ```
    /// use pacer_error::{ApiError, ErrorClass};
    ///
    /// let body = r#"{"ok": false, "error_code": 502, "description": "Bad Gateway"}"#;
    /// let err = ApiError::from_response(502, body);
    /// assert_eq!(err.classify(), ErrorClass::Transient);
    /// ```
    #[track_caller]
    pub fn from_response(status_code: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("description")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string());

        Self::new(ApiErrorKind::HttpStatus {
            status_code,
            message,
        })
    }

    /// Classify this error as transient or permanent.
    pub fn classify(&self) -> ErrorClass {
        self.kind.classify()
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ApiErrorKind::Timeout
        } else if err.is_connect() {
            ApiErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ApiErrorKind::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            // Unknown transport failures fail fast rather than retry.
            ApiErrorKind::Request(err.to_string())
        };
        Self::new(kind)
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ApiErrorKind::Decode(err.to_string()))
    }
}

/// Trait for errors that support retry classification.
///
/// The retry executor is generic over this trait: after each failed attempt
/// it asks the error whether a retry is worthwhile. Transient conditions like
/// 503 (service unavailable), 429 (remote rate limit), or network timeouts
/// should return true. Permanent conditions like 401 (unauthorized) or
/// 400 (bad request) should return false.
///
/// # Examples
///
/// ```
/// use pacer_error::{ApiError, ApiErrorKind, RetryableError};
///
/// let err = ApiError::new(ApiErrorKind::HttpStatus {
///     status_code: 429,
///     message: "Too Many Requests".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ApiError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
