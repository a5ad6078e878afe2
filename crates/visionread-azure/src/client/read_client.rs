//! Azure Read API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Response};
use visionread_core::{
    AnalysisRequest, OperationId, OperationLocation, OperationResult, ReadProvider, ReadService,
};

use super::AzureConfig;
use crate::models::{AnalyzeBody, ApiErrorEnvelope, ReadOperationResult};
use crate::{Error, Result, TRACING_TARGET};

/// Response header carrying the URL of the started operation.
pub const OPERATION_LOCATION: &str = "Operation-Location";

/// Request header carrying the subscription key.
const SUBSCRIPTION_KEY: &str = "Ocp-Apim-Subscription-Key";

/// Inner client that holds the HTTP client and configuration.
struct AzureReadClientInner {
    http: Client,
    config: AzureConfig,
}

/// Reqwest-based client for the Azure Computer Vision Read API.
///
/// This client implements the [`ReadProvider`] trait; wrap it in a
/// [`ReadService`] (see [`AzureReadClient::into_service`]) to get the
/// polling behavior.
///
/// # Examples
///
/// ```rust,ignore
/// use visionread_azure::{AzureConfig, AzureReadClient};
///
/// let config = AzureConfig::new("https://my-resource.cognitiveservices.azure.com/", key)?;
/// let client = AzureReadClient::new(config)?;
///
/// let text = client
///     .into_service()
///     .recognize_text("https://example.com/plane.jpg")
///     .await?;
/// ```
#[derive(Clone)]
pub struct AzureReadClient {
    inner: Arc<AzureReadClientInner>,
}

impl std::fmt::Debug for AzureReadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureReadClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl AzureReadClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: AzureConfig) -> Result<Self> {
        config.validate()?;

        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %config.endpoint,
            timeout_ms = timeout.as_millis(),
            "Creating Azure read client"
        );

        let mut key = HeaderValue::from_str(&config.key)
            .map_err(|e| Error::config(format!("Invalid key: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(SUBSCRIPTION_KEY, key);

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .default_headers(headers)
            .build()?;

        let inner = AzureReadClientInner { http, config };
        let client = Self {
            inner: Arc::new(inner),
        };

        tracing::info!(
            target: TRACING_TARGET,
            "Azure read client created successfully"
        );

        Ok(client)
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &AzureConfig {
        &self.inner.config
    }

    /// Converts this client into a [`ReadService`] with the default polling policy.
    pub fn into_service(self) -> ReadService {
        ReadService::new(self)
    }

    /// Submits the image and returns the operation-location header.
    async fn submit(&self, request: &AnalysisRequest) -> Result<OperationLocation> {
        let mut url = self.inner.config.read_url(&["analyze"])?;
        url.query_pairs_mut()
            .append_pair("language", &request.language);

        tracing::debug!(
            target: TRACING_TARGET,
            url = %url,
            image_uri = %request.image_uri,
            "Submitting image for analysis"
        );

        let response = self
            .inner
            .http
            .post(url)
            .json(&AnalyzeBody {
                url: &request.image_uri,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let location = response
            .headers()
            .get(OPERATION_LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(OperationLocation::new)
            .ok_or(Error::MissingHeader {
                name: OPERATION_LOCATION,
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            operation_location = %location,
            "Analysis accepted"
        );

        Ok(location)
    }

    /// Fetches the current state of an operation.
    async fn fetch(&self, operation_id: &OperationId) -> Result<OperationResult> {
        let url = self
            .inner
            .config
            .read_url(&["analyzeResults", operation_id.as_str()])?;

        let response = self.inner.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let body = response.text().await?;
        let result: ReadOperationResult = serde_json::from_str(&body)?;

        tracing::debug!(
            target: TRACING_TARGET,
            operation_id = %operation_id,
            status = %result.status,
            "Fetched analysis result"
        );

        Ok(result.into())
    }

    /// Converts a non-success response into an [`Error::Api`].
    async fn error_from_response(response: Response) -> Error {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.text().await.unwrap_or_default();
        let (message, code) = match serde_json::from_str::<ApiErrorEnvelope>(&body) {
            Ok(envelope) => (
                envelope
                    .error
                    .message
                    .unwrap_or_else(|| status.to_string()),
                envelope.error.code,
            ),
            Err(_) if !body.trim().is_empty() => (body.chars().take(512).collect(), None),
            Err(_) => (status.to_string(), None),
        };

        tracing::warn!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            code = ?code,
            message = %message,
            "Azure read request failed"
        );

        Error::api(status.as_u16(), message, code).with_retry_after(retry_after)
    }
}

#[async_trait::async_trait]
impl ReadProvider for AzureReadClient {
    async fn start_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> visionread_core::Result<OperationLocation> {
        Ok(self.submit(request).await?)
    }

    async fn get_result(
        &self,
        operation_id: &OperationId,
    ) -> visionread_core::Result<OperationResult> {
        Ok(self.fetch(operation_id).await?)
    }
}
