//! HTTP seam between the documents client and the registry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use url::Url;

use crate::Result;

/// Status and body of a completed HTTP exchange, whatever the status.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    #[must_use]
    pub fn new<B: Into<Vec<u8>>>(status: StatusCode, body: B) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one JSON `POST` and reports what came back.
///
/// Implementations return `Err` only when no response was received (connect, timeout,
/// I/O); every HTTP status is an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<RawResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<RawResponse> {
        (**self).post_json(url, body).await
    }
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Builds a client that aborts each request after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<RawResponse> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        #[cfg(feature = "tracing")]
        tracing::trace!(%url, %status, len = body.len(), "registry responded");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
