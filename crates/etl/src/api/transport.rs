//! HTTP transport for the Loyverse API.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::instrument;

use super::ApiError;
use crate::config::LoyverseConfig;

/// Query parameters sent with a GET request.
pub type Query = BTreeMap<String, String>;

/// Performs a single request against a path relative to the API base URL.
///
/// Implementations make exactly one attempt per call: no retries, no
/// backoff. Error statuses are returned as [`ApiError`] values carrying
/// the status code.
pub trait Transport: Clone + Send + Sync {
    /// GET `path` with the given query parameters.
    fn get(&self, path: &str, query: &Query) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// POST a JSON body to `path`.
    fn post(&self, path: &str, body: &Value) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// DELETE `path`.
    fn delete(&self, path: &str) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

/// reqwest-backed transport with the bearer token installed as a default header.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

struct HttpTransportInner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a new transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &LoyverseConfig) -> Result<Self, ApiError> {
        let mut auth_value = HeaderValue::from_str(&config.bearer())
            .map_err(|e| ApiError::Parse(format!("Invalid API key format: {e}")))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpTransportInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Handle API response and parse JSON.
    async fn handle_response(path: &str, response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), path, body));
        }

        // DELETE answers with an empty body
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response from {path}: {e}")))
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, query), fields(params = query.len()))]
    async fn get(&self, path: &str, query: &Query) -> Result<Value, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await?;
        Self::handle_response(path, response).await
    }

    #[instrument(skip(self, body))]
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::handle_response(path, response).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.inner.client.delete(self.url(path)).send().await?;
        Self::handle_response(path, response).await
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let config = LoyverseConfig::new(SecretString::from("k3y")).unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url("customers"),
            "https://api.loyverse.com/v1.0/customers"
        );
        assert_eq!(
            transport.url("/items/42"),
            "https://api.loyverse.com/v1.0/items/42"
        );
    }

    #[test]
    fn test_rejects_key_with_newline() {
        let config = LoyverseConfig::new(SecretString::from("bad\nkey")).unwrap();
        assert!(matches!(
            HttpTransport::new(&config),
            Err(ApiError::Parse(_))
        ));
    }
}
