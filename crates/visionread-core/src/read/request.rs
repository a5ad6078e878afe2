//! Analysis request types.

use serde::{Deserialize, Serialize};

/// Language hint sent with every request unless overridden.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Request to analyze the image behind a URI.
///
/// The URI is passed through as-is; whether it resolves to a supported image
/// is decided by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// URI of the image to analyze.
    pub image_uri: String,
    /// BCP-47 language hint for the recognizer.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_owned()
}

impl AnalysisRequest {
    /// Creates a request for the given image URI with the default language.
    pub fn new(image_uri: impl Into<String>) -> Self {
        Self {
            image_uri: image_uri.into(),
            language: default_language(),
        }
    }

    /// Sets the language hint.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl From<&str> for AnalysisRequest {
    fn from(image_uri: &str) -> Self {
        Self::new(image_uri)
    }
}

impl From<String> for AnalysisRequest {
    fn from(image_uri: String) -> Self {
        Self::new(image_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language() {
        let request = AnalysisRequest::new("https://example.com/a.jpg");
        assert_eq!(request.image_uri, "https://example.com/a.jpg");
        assert_eq!(request.language, "en");
    }

    #[test]
    fn test_with_language() {
        let request = AnalysisRequest::from("https://example.com/a.jpg").with_language("de");
        assert_eq!(request.language, "de");
    }

    #[test]
    fn test_deserialize_without_language() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"image_uri":"https://example.com/a.jpg"}"#).unwrap();
        assert_eq!(request.language, DEFAULT_LANGUAGE);
    }
}
