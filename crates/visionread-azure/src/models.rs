//! Wire types of the Read API v3.2.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use visionread_core::{OperationResult, OperationStatus, Page, TextLine, Word};

/// Body of the analyze request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnalyzeBody<'a> {
    pub url: &'a str,
}

/// Body of the analyze-results response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReadOperationResult {
    pub status: OperationStatus,
    #[serde(default)]
    pub created_date_time: Option<Timestamp>,
    #[serde(default)]
    pub last_updated_date_time: Option<Timestamp>,
    #[serde(default)]
    pub analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResult {
    #[serde(default)]
    pub read_results: Vec<ReadResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReadResult {
    pub page: u32,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Line {
    pub text: String,
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    #[serde(default)]
    pub words: Vec<LineWord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineWord {
    pub text: String,
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    #[serde(default)]
    pub confidence: f32,
}

/// Azure error envelope: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ReadOperationResult> for OperationResult {
    fn from(value: ReadOperationResult) -> Self {
        let pages = value
            .analyze_result
            .map(|result| result.read_results.into_iter().map(Page::from).collect())
            .unwrap_or_default();

        Self {
            status: value.status,
            created_at: value.created_date_time,
            last_updated_at: value.last_updated_date_time,
            pages,
        }
    }
}

impl From<ReadResult> for Page {
    fn from(value: ReadResult) -> Self {
        Self {
            page: value.page,
            angle: value.angle,
            width: value.width,
            height: value.height,
            unit: value.unit,
            lines: value.lines.into_iter().map(TextLine::from).collect(),
        }
    }
}

impl From<Line> for TextLine {
    fn from(value: Line) -> Self {
        Self {
            text: value.text,
            bounding_box: value.bounding_box,
            words: value.words.into_iter().map(Word::from).collect(),
        }
    }
}

impl From<LineWord> for Word {
    fn from(value: LineWord) -> Self {
        Self {
            text: value.text,
            bounding_box: value.bounding_box,
            confidence: value.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCEEDED: &str = r#"{
        "status": "succeeded",
        "createdDateTime": "2024-12-05T10:15:30Z",
        "lastUpdatedDateTime": "2024-12-05T10:15:31Z",
        "analyzeResult": {
            "version": "3.2.0",
            "modelVersion": "2022-04-30",
            "readResults": [
                {
                    "page": 1,
                    "angle": 0.12,
                    "width": 1024,
                    "height": 683,
                    "unit": "pixel",
                    "lines": [
                        {
                            "boundingBox": [10, 20, 110, 20, 110, 40, 10, 40],
                            "text": "LUFTHANSA",
                            "appearance": {"style": {"name": "other", "confidence": 0.9}},
                            "words": [
                                {"boundingBox": [10, 20, 110, 20, 110, 40, 10, 40], "text": "LUFTHANSA", "confidence": 0.998}
                            ]
                        },
                        {
                            "boundingBox": [12, 50, 90, 50, 90, 64, 12, 64],
                            "text": "D-AIMA",
                            "words": []
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_deserialize_succeeded() {
        let wire: ReadOperationResult = serde_json::from_str(SUCCEEDED).unwrap();
        let result = OperationResult::from(wire);

        assert_eq!(result.status, OperationStatus::Succeeded);
        assert!(result.created_at.is_some());
        assert_eq!(result.pages.len(), 1);

        let page = &result.pages[0];
        assert_eq!(page.page, 1);
        assert_eq!(page.unit.as_deref(), Some("pixel"));
        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.lines[0].bounding_box.len(), 8);
        assert_eq!(page.lines[0].words[0].text, "LUFTHANSA");
        assert_eq!(result.text().as_deref(), Some("LUFTHANSA D-AIMA"));
    }

    #[test]
    fn test_deserialize_running() {
        let json = r#"{"status": "running", "createdDateTime": "2024-12-05T10:15:30Z", "lastUpdatedDateTime": "2024-12-05T10:15:30Z"}"#;
        let result = OperationResult::from(serde_json::from_str::<ReadOperationResult>(json).unwrap());

        assert_eq!(result.status, OperationStatus::Running);
        assert!(result.pages.is_empty());
    }

    #[test]
    fn test_deserialize_not_started() {
        let json = r#"{"status": "notStarted"}"#;
        let result: ReadOperationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.status, OperationStatus::NotStarted);
    }

    #[test]
    fn test_deserialize_unknown_status() {
        let json = r#"{"status": "exploded"}"#;
        assert!(serde_json::from_str::<ReadOperationResult>(json).is_err());
    }

    #[test]
    fn test_deserialize_error_envelope() {
        let json = r#"{"error": {"code": "InvalidImageUrl", "message": "Image URL is badly formatted."}}"#;
        let envelope: ApiErrorEnvelope = serde_json::from_str(json).unwrap();

        assert_eq!(envelope.error.code.as_deref(), Some("InvalidImageUrl"));
        assert_eq!(
            envelope.error.message.as_deref(),
            Some("Image URL is badly formatted.")
        );
    }

    #[test]
    fn test_serialize_analyze_body() {
        let body = AnalyzeBody {
            url: "https://example.com/a.jpg",
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"url":"https://example.com/a.jpg"}"#
        );
    }
}
