use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::Result;
use crate::documents::codec::{self, SubmissionRequest};
use crate::documents::{Document, DocumentsConfig, SubmissionFailure, SubmissionResult};
use crate::rate_limit::RateLimiter;
use crate::transport::{ReqwestTransport, Transport};

/// Rate-limited client for the registry's create-document endpoint.
///
/// Clones share one [`RateLimiter`], so the configured ceiling applies to the sum of
/// calls made through every clone.
pub struct DocumentsClient<T = ReqwestTransport> {
    endpoint: Url,
    limiter: Arc<RateLimiter>,
    transport: Arc<T>,
}

impl DocumentsClient<ReqwestTransport> {
    /// Creates a client that talks HTTP through `reqwest`.
    pub fn new(config: DocumentsConfig) -> Result<Self> {
        let transport = match config.request_timeout {
            Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
            None => ReqwestTransport::default(),
        };
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> DocumentsClient<T> {
    /// Creates a client on top of a custom [`Transport`].
    pub fn with_transport(config: DocumentsConfig, transport: T) -> Result<Self> {
        let limiter = RateLimiter::new(config.window(), config.request_limit)?;

        Ok(Self {
            endpoint: config.endpoint,
            limiter: Arc::new(limiter),
            transport: Arc::new(transport),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Submits `document` once the rate limiter admits the call.
    ///
    /// Exactly one HTTP request is attempted. Transport, status and registry errors
    /// come back as [`SubmissionResult::Failed`].
    pub async fn create_document(
        &self,
        document: &Document,
        signature: &SecretString,
    ) -> SubmissionResult {
        self.limiter.acquire().await;
        self.dispatch(document, signature).await
    }

    /// Like [`DocumentsClient::create_document`], but stops waiting for admission
    /// when `cancel` fires. A cancelled call sends nothing and consumes no permit.
    pub async fn create_document_or_cancel(
        &self,
        document: &Document,
        signature: &SecretString,
        cancel: &CancellationToken,
    ) -> Result<SubmissionResult> {
        self.limiter.acquire_or_cancel(cancel).await?;
        Ok(self.dispatch(document, signature).await)
    }

    async fn dispatch(&self, document: &Document, signature: &SecretString) -> SubmissionResult {
        let body = match codec::encode_request(&SubmissionRequest::new(document, signature)) {
            Ok(body) => body,
            Err(e) => {
                return SubmissionResult::Failed(SubmissionFailure::Encoding {
                    message: e.to_string(),
                });
            }
        };

        let response = match self.transport.post_json(&self.endpoint, body).await {
            Ok(response) => response,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(doc_id = %document.doc_id, error = %e, "registry request failed");
                return SubmissionResult::Failed(SubmissionFailure::Transport {
                    message: e.to_string(),
                });
            }
        };

        if response.status != StatusCode::OK {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                doc_id = %document.doc_id,
                status = %response.status,
                "registry responded with unexpected status"
            );
            return SubmissionResult::Failed(SubmissionFailure::Connectivity {
                status: response.status,
            });
        }

        let result = match codec::decode_response(&response.body) {
            Ok(decoded) => SubmissionResult::from(decoded),
            Err(e) => SubmissionResult::Failed(SubmissionFailure::MalformedResponse {
                message: e.to_string(),
            }),
        };

        #[cfg(feature = "tracing")]
        {
            match &result {
                SubmissionResult::Created { document_id } => {
                    tracing::info!(doc_id = %document.doc_id, %document_id, "document created");
                }
                SubmissionResult::Failed(failure) => {
                    tracing::warn!(doc_id = %document.doc_id, %failure, "document not created");
                }
            }
        }

        result
    }
}

impl<T> Clone for DocumentsClient<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            limiter: Arc::clone(&self.limiter),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for DocumentsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("limiter", &self.limiter)
            .finish_non_exhaustive()
    }
}
