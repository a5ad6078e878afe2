//! Scripted in-memory provider for testing.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! visionread-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use visionread_core::mock::ScriptedProvider;
//! use visionread_core::{OperationResult, OperationStatus, ReadService};
//!
//! let provider = ScriptedProvider::new(location)
//!     .with_results([OperationResult::new(OperationStatus::Running)]);
//! let service = ReadService::new(provider.clone());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::read::{
    AnalysisRequest, OperationId, OperationLocation, OperationResult, OperationStatus,
    ReadProvider,
};
use crate::{Error, Result};

type ErrorFactory = Arc<dyn Fn() -> Error + Send + Sync>;

#[derive(Default)]
struct ScriptState {
    results: VecDeque<OperationResult>,
    requests: Vec<AnalysisRequest>,
    polled_ids: Vec<OperationId>,
}

/// Provider that replays a fixed script of results.
///
/// Results are handed out in order; once only one is left it is repeated
/// for every further call. Clones share the same script and call log.
#[derive(Clone)]
pub struct ScriptedProvider {
    location: OperationLocation,
    start_error: Option<ErrorFactory>,
    state: Arc<Mutex<ScriptState>>,
}

impl std::fmt::Debug for ScriptedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedProvider")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl ScriptedProvider {
    /// Creates a provider that answers every submission with `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: OperationLocation::new(location),
            start_error: None,
            state: Arc::default(),
        }
    }

    /// Sets the results returned by successive `get_result` calls.
    #[must_use]
    pub fn with_results(self, results: impl IntoIterator<Item = OperationResult>) -> Self {
        self.lock().results = results.into_iter().collect();
        self
    }

    /// Makes every submission fail with the error built by `error`.
    #[must_use]
    pub fn with_start_error(mut self, error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        self.start_error = Some(Arc::new(error));
        self
    }

    /// Number of `start_analysis` calls so far.
    pub fn start_calls(&self) -> usize {
        self.lock().requests.len()
    }

    /// Number of `get_result` calls so far.
    pub fn result_calls(&self) -> usize {
        self.lock().polled_ids.len()
    }

    /// Requests received by `start_analysis`, in order.
    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.lock().requests.clone()
    }

    /// Operation ids passed to `get_result`, in order.
    pub fn polled_ids(&self) -> Vec<OperationId> {
        self.lock().polled_ids.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl ReadProvider for ScriptedProvider {
    async fn start_analysis(&self, request: &AnalysisRequest) -> Result<OperationLocation> {
        self.lock().requests.push(request.clone());

        match &self.start_error {
            Some(error) => Err(error()),
            None => Ok(self.location.clone()),
        }
    }

    async fn get_result(&self, operation_id: &OperationId) -> Result<OperationResult> {
        let mut state = self.lock();
        state.polled_ids.push(operation_id.clone());

        let result = if state.results.len() > 1 {
            state.results.pop_front()
        } else {
            state.results.front().cloned()
        };

        Ok(result.unwrap_or_else(|| OperationResult::new(OperationStatus::NotStarted)))
    }
}
