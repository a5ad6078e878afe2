//! Error types for the Azure Read client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for Azure client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Azure client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error code from the Azure error envelope
        code: Option<String>,
        /// Error message from the API
        message: String,
        /// Delay requested through `Retry-After`
        retry_after: Option<Duration>,
    },

    /// A required response header was absent or not valid UTF-8.
    #[error("Missing response header: {name}")]
    MissingHeader {
        /// Header name
        name: &'static str,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },
}

impl Error {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>, code: Option<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Attach a `Retry-After` delay to an API error; other variants are
    /// returned unchanged.
    #[must_use]
    pub fn with_retry_after(self, delay: Option<Duration>) -> Self {
        match self {
            Self::Api {
                status,
                code,
                message,
                ..
            } => Self::Api {
                status,
                code,
                message,
                retry_after: delay,
            },
            other => other,
        }
    }

    /// Get the HTTP status code if this is an HTTP/API error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Reqwest(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<Error> for visionread_core::Error {
    fn from(err: Error) -> Self {
        use visionread_core::Error as CoreError;

        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    CoreError::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    CoreError::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else if e.is_decode() {
                    CoreError::invalid_response()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    CoreError::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => CoreError::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Api {
                status,
                code,
                message,
                retry_after,
            } => {
                let base = match status {
                    400 | 415 => CoreError::invalid_input(),
                    401 | 403 => CoreError::authentication(),
                    404 => CoreError::not_found(),
                    408 | 504 => CoreError::timeout(),
                    429 => CoreError::rate_limited(),
                    500 | 502 | 503 => CoreError::service_unavailable(),
                    _ => CoreError::external_error(),
                };

                let mut context = format!("status {status}");
                if let Some(code) = code {
                    context.push_str(&format!(", code {code}"));
                }
                if let Some(delay) = retry_after {
                    context.push_str(&format!(", retry after {}s", delay.as_secs()));
                }

                base.with_message(message).with_context(context)
            }
            err @ Error::MissingHeader { .. } => CoreError::invalid_response()
                .with_message(err.to_string()),
            Error::Config { message } => CoreError::configuration().with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use visionread_core::ErrorKind;

    use super::*;

    fn kind_for(status: u16) -> ErrorKind {
        visionread_core::Error::from(Error::api(status, "message", None)).kind
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(kind_for(400), ErrorKind::InvalidInput);
        assert_eq!(kind_for(415), ErrorKind::InvalidInput);
        assert_eq!(kind_for(401), ErrorKind::Authentication);
        assert_eq!(kind_for(403), ErrorKind::Authentication);
        assert_eq!(kind_for(404), ErrorKind::NotFound);
        assert_eq!(kind_for(408), ErrorKind::Timeout);
        assert_eq!(kind_for(429), ErrorKind::RateLimited);
        assert_eq!(kind_for(500), ErrorKind::ServiceUnavailable);
        assert_eq!(kind_for(502), ErrorKind::ServiceUnavailable);
        assert_eq!(kind_for(503), ErrorKind::ServiceUnavailable);
        assert_eq!(kind_for(504), ErrorKind::Timeout);
        assert_eq!(kind_for(418), ErrorKind::ExternalError);
    }

    #[test]
    fn test_api_error_context() {
        let error = Error::api(429, "Too many requests", Some("429".into()))
            .with_retry_after(Some(Duration::from_secs(7)));
        let error = visionread_core::Error::from(error);

        assert!(error.is_retryable());
        assert_eq!(error.message.as_deref(), Some("Too many requests"));
        assert_eq!(
            error.context.as_deref(),
            Some("status 429, code 429, retry after 7s")
        );
    }

    #[test]
    fn test_missing_header() {
        let error = visionread_core::Error::from(Error::MissingHeader {
            name: "Operation-Location",
        });
        assert_eq!(error.kind, ErrorKind::InvalidResponse);
        assert!(error.to_string().contains("Operation-Location"));
    }

    #[test]
    fn test_status_code() {
        assert_eq!(Error::api(404, "Not found", None).status_code(), Some(404));
        assert_eq!(Error::config("bad").status_code(), None);
    }
}
