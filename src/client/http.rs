//! HTTP transport for the public scan endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use url::Url;

use crate::models::{RequestEnvelope, ScanResponse};
use crate::{Error, Result};

use super::config::ClientConfig;
use super::transport::Transport;

/// Transport that POSTs request envelopes to the scanner over HTTPS.
///
/// The endpoint needs no authentication. Transient failures (timeouts,
/// connection errors, 429 and 5xx statuses) are retried according to the
/// configured [`RetryConfig`](super::RetryConfig).
///
/// # Example
///
/// ```no_run
/// use tvscreener::{ClientConfig, HttpTransport, RetryConfig};
///
/// # fn example() -> tvscreener::Result<()> {
/// let transport = HttpTransport::with_config(
///     ClientConfig::default().with_retry(RetryConfig::no_retry()),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a transport with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with a custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn post_once(&self, url: &Url, request: &RequestEnvelope) -> Result<ScanResponse> {
        let response = self
            .http
            .post(url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { Error::Timeout } else { Error::Http(e) })?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<ScanResponse> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        });
        Err(Error::from_api_response(status.as_u16(), body))
    }

    fn should_retry(&self, err: &Error) -> bool {
        match err {
            Error::Api { status, .. } => self.config.retry.should_retry_status(*status),
            other => other.is_retryable(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn scan(&self, request: &RequestEnvelope) -> Result<ScanResponse> {
        let url = self.config.endpoint(request.class().scope())?;
        tracing::debug!(%url, columns = request.columns().len(), "sending scan request");

        let mut attempt = 0;
        loop {
            match self.post_once(&url, request).await {
                Ok(response) => {
                    tracing::debug!(
                        total_count = response.total_count,
                        rows = response.data.len(),
                        "scan response received"
                    );
                    return Ok(response);
                }
                Err(err) if attempt < self.config.retry.max_retries && self.should_retry(&err) => {
                    let backoff = self.config.retry.backoff_for_attempt(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "scan request failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_keeps_config() {
        let config = ClientConfig::default().with_base_url("http://localhost:9000");
        let transport = HttpTransport::with_config(config).unwrap();
        assert_eq!(transport.config().base_url, "http://localhost:9000");
    }

    #[test]
    fn test_should_retry() {
        let transport = HttpTransport::new().unwrap();
        assert!(transport.should_retry(&Error::Timeout));
        assert!(transport.should_retry(&Error::from_api_response(502, serde_json::Value::Null)));
        assert!(!transport.should_retry(&Error::from_api_response(400, serde_json::Value::Null)));
        assert!(!transport.should_retry(&Error::InvalidResponse("short row".into())));
    }
}
