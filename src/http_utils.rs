//! HTTP plumbing shared by every resource client.
//!
//! One [`HttpClient`] owns the `reqwest` connection pool. It attaches the API
//! key and JSON headers to each request, and it turns non-success responses
//! into typed errors.

use reqwest::header::{HeaderMap, ACCEPT, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, trace};

use crate::configuration::ClientConfig;
use crate::error::{extract_error_message, OpenToCloseError, Result};

/// Query parameter the API reads the key from.
pub const API_TOKEN_PARAM: &str = "api_token";

/// HTTP client wrapper with common request handling logic
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| {
                OpenToCloseError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Get a reference to the HTTP client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an API path such as `/properties/1`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url().as_str().trim_end_matches('/'),
            path
        )
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        self.execute_request(Method::GET, path, |request| request.query(query))
            .await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute_request(Method::POST, path, |request| request.json(body))
            .await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.execute_request(Method::PUT, path, |request| request.json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute_request(Method::DELETE, path, |request| request)
            .await
    }

    /// Send one request and decode its JSON response.
    ///
    /// An empty success body decodes as an empty object.
    async fn execute_request<F>(&self, method: Method, path: &str, customize: F) -> Result<Value>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        debug!("{} {}", method, path);

        let request = customize(self.client.request(method.clone(), self.url(path)))
            .query(&[(API_TOKEN_PARAM, self.config.api_key())])
            .header(ACCEPT, "application/json");

        // the URL carries the API key; strip it before logging or storing
        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            debug!("{} {} failed before a response arrived: {}", method, path, e);
            OpenToCloseError::Network(e)
        })?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        debug!("{} {} -> {}", method, path, status);

        let response_text = response
            .text()
            .await
            .map_err(|e| OpenToCloseError::Network(e.without_url()))?;
        trace!("Raw response text: {}", response_text);

        if status.is_success() {
            if response_text.trim().is_empty() {
                return Ok(Value::Object(Map::new()));
            }
            serde_json::from_str::<Value>(&response_text).map_err(|e| {
                error!(
                    "Failed to deserialize response: {}. Raw response: {}",
                    e, response_text
                );
                OpenToCloseError::Decode(e)
            })
        } else {
            let body = serde_json::from_str::<Value>(&response_text).ok();
            let message = extract_error_message(status, &response_text, body.as_ref());
            Err(OpenToCloseError::from_status(
                status,
                message,
                body,
                retry_after,
            ))
        }
    }
}

/// Seconds from a `Retry-After` header. The HTTP-date form is not interpreted.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
