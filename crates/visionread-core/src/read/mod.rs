//! Asynchronous read (OCR) operations.
//!
//! A read operation is started remotely, identified by an operation id taken
//! from the `Operation-Location` header, and then polled until it reaches a
//! terminal state. [`ReadProvider`] abstracts the two remote calls and
//! [`ReadService`] drives the polling loop on top of any provider.

mod operation;
mod policy;
mod request;
mod response;
mod service;

pub use operation::{OPERATION_ID_LEN, OperationId, OperationLocation, OperationStatus};
pub use policy::{DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_SECS, PollPolicy};
pub use request::{AnalysisRequest, DEFAULT_LANGUAGE};
pub use response::{OperationResult, Page, TextLine, Word};
pub use service::ReadService;

use crate::Result;

/// Tracing target for read operations.
pub const TRACING_TARGET: &str = "visionread_core::read";

/// Core trait for remote read operations.
///
/// Implement this trait to plug a concrete OCR backend into [`ReadService`].
#[async_trait::async_trait]
pub trait ReadProvider: Send + Sync {
    /// Starts an analysis of the image referenced by the request.
    ///
    /// Returns the raw operation-location header value; the service derives
    /// the [`OperationId`] from it.
    async fn start_analysis(&self, request: &AnalysisRequest) -> Result<OperationLocation>;

    /// Fetches the current state of a previously started operation.
    async fn get_result(&self, operation_id: &OperationId) -> Result<OperationResult>;
}
