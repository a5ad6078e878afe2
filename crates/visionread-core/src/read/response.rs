//! Read operation results.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::OperationStatus;

/// Snapshot of a remote read operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Current status of the operation.
    pub status: OperationStatus,
    /// When the operation was created, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// When the operation last changed, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<Timestamp>,
    /// Recognized pages in document order; empty until the operation succeeds.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl OperationResult {
    /// Creates a result with the given status and no pages.
    pub fn new(status: OperationStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Creates a succeeded result holding the given pages.
    pub fn succeeded(pages: Vec<Page>) -> Self {
        Self {
            status: OperationStatus::Succeeded,
            pages,
            ..Default::default()
        }
    }

    /// Sets the creation and last update timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, created_at: Timestamp, last_updated_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self.last_updated_at = Some(last_updated_at);
        self
    }

    /// Returns the first recognized page, if any.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Returns the first page's lines joined with single spaces.
    pub fn text(&self) -> Option<String> {
        self.first_page().map(Page::text)
    }
}

/// A single recognized page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// One-based page number.
    pub page: u32,
    /// Detected text angle in degrees.
    #[serde(default)]
    pub angle: f64,
    /// Page width in `unit`.
    #[serde(default)]
    pub width: f64,
    /// Page height in `unit`.
    #[serde(default)]
    pub height: f64,
    /// Measurement unit reported by the service (`pixel`, `inch`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Lines in reading order.
    #[serde(default)]
    pub lines: Vec<TextLine>,
}

impl Page {
    /// Creates a page from its lines.
    pub fn new(page: u32, lines: Vec<TextLine>) -> Self {
        Self {
            page,
            lines,
            ..Default::default()
        }
    }

    /// Joins the text of every line with a single space.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A recognized line of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Line text.
    pub text: String,
    /// Quadrilateral as eight numbers: x/y of the four corners, clockwise
    /// from top-left.
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    /// Words making up the line.
    #[serde(default)]
    pub words: Vec<Word>,
}

impl TextLine {
    /// Creates a line with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A recognized word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Word text.
    pub text: String,
    /// Quadrilateral in the same layout as [`TextLine::bounding_box`].
    #[serde(default)]
    pub bounding_box: Vec<f64>,
    /// Recognition confidence in `[0, 1]`.
    #[serde(default)]
    pub confidence: f32,
}
