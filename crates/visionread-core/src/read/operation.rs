//! Operation identity and status.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Length of the operation id carried at the end of the operation-location
/// header (`.../analyzeResults/{uuid}`).
pub const OPERATION_ID_LEN: usize = 36;

/// Raw value of the operation-location header returned when an analysis
/// is started.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationLocation(String);

impl OperationLocation {
    /// Wraps a raw header value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the operation id: exactly the last [`OPERATION_ID_LEN`]
    /// characters of the header value.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse)
    /// when the value is shorter than [`OPERATION_ID_LEN`] characters.
    pub fn operation_id(&self) -> Result<OperationId> {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(OPERATION_ID_LEN - 1)
            .map(|(index, _)| index)
            .ok_or_else(|| {
                Error::invalid_response()
                    .with_message(format!(
                        "operation location is shorter than {OPERATION_ID_LEN} characters"
                    ))
                    .with_context(self.0.clone())
            })?;

        Ok(OperationId(self.0[start..].to_owned()))
    }
}

impl fmt::Display for OperationLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier correlating a started analysis with its result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationId(String);

impl OperationId {
    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Status of a remote read operation.
///
/// Parsing is case-insensitive, so `notStarted`, `notstarted` and
/// `NOTSTARTED` are the same status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OperationStatus {
    /// Accepted but not picked up yet.
    #[default]
    NotStarted,
    /// Being processed.
    Running,
    /// Finished with results.
    Succeeded,
    /// Finished without results.
    Failed,
}

impl OperationStatus {
    /// Returns `true` while the operation may still change state.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::NotStarted | Self::Running)
    }
}

impl TryFrom<String> for OperationStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}
