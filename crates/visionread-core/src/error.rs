//! Structured error handling for read operations.

use hipstr::HipStr;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Legacy output for [`ErrorKind::RetriesExhausted`].
pub const RETRIES_EXHAUSTED_SENTINEL: &str = "max retries reached";

/// Legacy output for [`ErrorKind::OperationFailed`].
pub const OPERATION_FAILED_SENTINEL: &str = "error";

/// Categories of errors that can occur in read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The polling budget ran out before the operation reached a terminal state.
    RetriesExhausted,
    /// The remote operation finished in a non-success state.
    OperationFailed,
    /// The service answered with something that could not be interpreted.
    InvalidResponse,
    /// Input validation failed.
    InvalidInput,
    /// Authentication failed.
    Authentication,
    /// Resource not found.
    NotFound,
    /// Rate limit exceeded.
    RateLimited,
    /// Service temporarily unavailable.
    ServiceUnavailable,
    /// External service error.
    ExternalError,
    /// Network-related error occurred.
    NetworkError,
    /// Timeout occurred.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Configuration error.
    Configuration,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Check if this error kind is typically retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::ServiceUnavailable | Self::RateLimited
        )
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<HipStr<'static>>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<HipStr<'static>>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<HipStr<'static>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<HipStr<'static>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Check if this error is retryable based on its kind.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns the plain-string outcome older callers expect for the two
    /// polling failures, and `None` for every other kind.
    #[must_use]
    pub const fn legacy_sentinel(&self) -> Option<&'static str> {
        match self.kind {
            ErrorKind::RetriesExhausted => Some(RETRIES_EXHAUSTED_SENTINEL),
            ErrorKind::OperationFailed => Some(OPERATION_FAILED_SENTINEL),
            _ => None,
        }
    }
}

// Convenience constructors for common error scenarios
impl Error {
    /// Creates a retries exhausted error.
    pub fn retries_exhausted() -> Self {
        Self::new(ErrorKind::RetriesExhausted)
    }

    /// Creates an operation failed error.
    pub fn operation_failed() -> Self {
        Self::new(ErrorKind::OperationFailed)
    }

    /// Creates an invalid response error.
    pub fn invalid_response() -> Self {
        Self::new(ErrorKind::InvalidResponse)
    }

    /// Creates an invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates an authentication error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates a not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a rate limited error.
    pub fn rate_limited() -> Self {
        Self::new(ErrorKind::RateLimited)
    }

    /// Creates a service unavailable error.
    pub fn service_unavailable() -> Self {
        Self::new(ErrorKind::ServiceUnavailable)
    }

    /// Creates an external service error.
    pub fn external_error() -> Self {
        Self::new(ErrorKind::ExternalError)
    }

    /// Creates a network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::Serialization, error).with_message("Invalid JSON payload")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.source.is_none());
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::invalid_response()
            .with_message("missing header")
            .with_context("start analysis");

        assert_eq!(error.kind, ErrorKind::InvalidResponse);
        assert_eq!(error.message.as_deref(), Some("missing header"));
        assert_eq!(error.context.as_deref(), Some("start analysis"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::retries_exhausted().with_message("10 polls");

        let display_str = error.to_string();
        assert!(display_str.contains("retries_exhausted"));
        assert!(display_str.contains("10 polls"));
        assert_eq!(Error::timeout().to_string(), "[timeout]");
    }

    #[test]
    fn test_legacy_sentinel() {
        assert_eq!(
            Error::retries_exhausted().legacy_sentinel(),
            Some("max retries reached")
        );
        assert_eq!(Error::operation_failed().legacy_sentinel(), Some("error"));
        assert_eq!(Error::network_error().legacy_sentinel(), None);
        assert_eq!(Error::invalid_response().legacy_sentinel(), None);
    }

    #[test]
    fn test_from_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(json_error);

        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("retries_exhausted").unwrap(),
            ErrorKind::RetriesExhausted
        );
        assert_eq!(
            ErrorKind::from_str("operation_failed").unwrap(),
            ErrorKind::OperationFailed
        );
        assert!(ErrorKind::from_str("invalid").is_err());
    }

    #[test]
    fn test_retryable() {
        assert!(ErrorKind::NetworkError.is_retryable());
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::ServiceUnavailable.is_retryable());
        assert!(ErrorKind::RateLimited.is_retryable());

        assert!(!ErrorKind::RetriesExhausted.is_retryable());
        assert!(!ErrorKind::OperationFailed.is_retryable());
        assert!(!ErrorKind::Authentication.is_retryable());
        assert!(!ErrorKind::Unknown.is_retryable());
    }
}
