use crate::errors::AppError;
use std::future::Future;
use url::Url;

/// Content type of every SOAP request.
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Delivers a serialized envelope and returns the raw response body.
///
/// Implemented over HTTP by [`HttpTransport`]; tests substitute stubs.
pub trait Transport: Send + Sync {
    fn post_xml(
        &self,
        url: &Url,
        body: String,
    ) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Single-POST HTTP(S) transport backed by `reqwest`.
///
/// No timeout, retry or redirect following is configured.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a new `HttpTransport`.
    ///
    /// # Arguments
    ///
    /// * `accept_invalid_certs` - Skip TLS peer verification. Only honoured
    ///   for non-production endpoints (enforced by `Config`).
    pub fn new(accept_invalid_certs: bool) -> Result<Self, AppError> {
        if accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                AppError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn post_xml(&self, url: &Url, body: String) -> Result<String, AppError> {
        tracing::debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Data pump request failed: {}", e)))?;

        // SOAP faults come back as 500; the body is interpreted either way.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Data pump returned HTTP {}", status);
        }

        let text = response.text().await.map_err(|e| {
            AppError::Transport(format!("Failed to read data pump response: {}", e))
        })?;

        Ok(text)
    }
}
