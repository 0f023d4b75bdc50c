//! Top-level error wrapper types.

use crate::{ApiError, ConfigError};

/// Foundation error enum for the pacer workspace.
///
/// # Examples
///
/// ```
/// use pacer_error::{ApiError, ApiErrorKind, PacerError};
///
/// let api_err = ApiError::new(ApiErrorKind::Timeout);
/// let err: PacerError = api_err.into();
/// assert!(format!("{}", err).contains("timed out"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PacerErrorKind {
    /// Outbound API call error
    #[from(ApiError)]
    Api(ApiError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Pacer error with kind discrimination.
///
/// # Examples
///
/// ```
/// use pacer_error::{ConfigError, PacerResult};
///
/// fn might_fail() -> PacerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Pacer Error: {}", _0)]
pub struct PacerError(Box<PacerErrorKind>);

impl PacerError {
    /// Create a new error from a kind.
    pub fn new(kind: PacerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PacerErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PacerErrorKind
impl<T> From<T> for PacerError
where
    T: Into<PacerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for pacer operations.
pub type PacerResult<T> = std::result::Result<T, PacerError>;
