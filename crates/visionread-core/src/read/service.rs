//! Read service: submission plus bounded polling on top of a provider.

use std::fmt;
use std::sync::Arc;

use tokio::time::Instant;

use super::{
    AnalysisRequest, OperationResult, OperationStatus, PollPolicy, ReadProvider, TRACING_TARGET,
};
use crate::{Error, Result};

/// Polling client around a [`ReadProvider`].
///
/// The provider is injected rather than global, so a service can be built
/// over the Azure client in production and over a scripted provider in
/// tests. Cloning is cheap; the provider is shared behind an `Arc`.
///
/// # Examples
///
/// ```rust,ignore
/// use visionread_core::{PollPolicy, ReadService};
///
/// let service = ReadService::new(provider).with_policy(PollPolicy::default());
/// let text = service.recognize_text("https://example.com/plane.jpg").await?;
/// ```
#[derive(Clone)]
pub struct ReadService {
    provider: Arc<dyn ReadProvider>,
    policy: PollPolicy,
}

impl fmt::Debug for ReadService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ReadService {
    /// Creates a service over the given provider with the default policy.
    pub fn new<P>(provider: P) -> Self
    where
        P: ReadProvider + 'static,
    {
        Self::from_shared(Arc::new(provider))
    }

    /// Creates a service over an already shared provider.
    pub fn from_shared(provider: Arc<dyn ReadProvider>) -> Self {
        Self {
            provider,
            policy: PollPolicy::default(),
        }
    }

    /// Replaces the polling policy.
    #[must_use]
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the polling policy.
    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Recognizes the text in the image and returns the first page's lines
    /// joined with single spaces.
    ///
    /// # Errors
    ///
    /// Besides provider errors, returns
    /// [`ErrorKind::RetriesExhausted`](crate::ErrorKind::RetriesExhausted) when
    /// the operation is still pending after the retry budget,
    /// [`ErrorKind::OperationFailed`](crate::ErrorKind::OperationFailed) when it
    /// ends in a non-success state, and
    /// [`ErrorKind::InvalidResponse`](crate::ErrorKind::InvalidResponse) when a
    /// succeeded operation carries no pages.
    pub async fn recognize_text(&self, request: impl Into<AnalysisRequest>) -> Result<String> {
        let result = self.analyze(request).await?;

        result.text().ok_or_else(|| {
            Error::invalid_response().with_message("succeeded operation returned no pages")
        })
    }

    /// Starts an analysis and polls it until it succeeds, fails, or the
    /// retry budget runs out. Returns the full succeeded result.
    ///
    /// Exactly one operation is started per call; the submission itself is
    /// never retried.
    pub async fn analyze(&self, request: impl Into<AnalysisRequest>) -> Result<OperationResult> {
        let request = request.into();
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            image_uri = %request.image_uri,
            language = %request.language,
            max_retries = self.policy.max_retries,
            max_wait_secs = self.policy.max_wait().as_secs(),
            "Starting read analysis"
        );

        let location = self.provider.start_analysis(&request).await?;
        let operation_id = location.operation_id()?;

        tracing::debug!(
            target: TRACING_TARGET,
            operation_id = %operation_id,
            "Read analysis accepted"
        );

        let mut result = self.provider.get_result(&operation_id).await?;
        let mut attempt = 0;

        while self.policy.should_continue_polling(result.status, attempt) {
            tokio::time::sleep(self.policy.interval()).await;
            result = self.provider.get_result(&operation_id).await?;
            attempt += 1;

            tracing::trace!(
                target: TRACING_TARGET,
                operation_id = %operation_id,
                attempt,
                status = %result.status,
                "Polled read operation"
            );
        }

        let elapsed_ms = started_at.elapsed().as_millis();

        match result.status {
            OperationStatus::Succeeded => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    operation_id = %operation_id,
                    polls = attempt,
                    pages = result.pages.len(),
                    lines = result.first_page().map_or(0, |page| page.lines.len()),
                    elapsed_ms,
                    "Read operation succeeded"
                );
                Ok(result)
            }
            status if status.is_pending() => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    operation_id = %operation_id,
                    polls = attempt,
                    status = %status,
                    elapsed_ms,
                    "Read operation did not finish within the retry budget"
                );
                Err(Error::retries_exhausted()
                    .with_message(format!("operation still {status} after {attempt} polls"))
                    .with_context(operation_id.to_string()))
            }
            status => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    operation_id = %operation_id,
                    polls = attempt,
                    status = %status,
                    elapsed_ms,
                    "Read operation failed"
                );
                Err(Error::operation_failed()
                    .with_message(format!("operation ended with status {status}"))
                    .with_context(operation_id.to_string()))
            }
        }
    }
}
