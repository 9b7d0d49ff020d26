//! Request specification and response wrapper for outgoing test requests

use std::borrow::Cow;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

/// A reusable template for outgoing test requests.
///
/// Carries the resolved base URL, the default header set, and a configured
/// HTTP client. Paths are appended to the base URL verbatim, with no
/// re-encoding, so pre-encoded segments (`%20`) and characters like `+`
/// reach the server unchanged.
///
/// Per-test headers go on an owned copy (`with_header`), never on a shared
/// instance, so an `Authorization` header added by one test cannot leak
/// into the next.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    base_url: String,
    headers: Vec<(String, String)>,
    client: reqwest::Client,
}

impl RequestSpec {
    /// Build a request spec targeting `base_url` with the given timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> HarnessResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            headers: Vec::new(),
            client,
        })
    }

    /// The origin requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add a default header, consuming and returning the spec.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add an `Authorization: Bearer ...` header.
    pub fn with_bearer(self, token: impl AsRef<str>) -> Self {
        self.with_header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Full URL for a path, joined without any re-encoding.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> HarnessResult<ApiResponse> {
        let request = self.client.get(self.url(path));
        self.execute("GET", path, request).await
    }

    /// Perform a POST request with a JSON body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> HarnessResult<ApiResponse> {
        let request = self.client.post(self.url(path)).json(body);
        self.execute("POST", path, request).await
    }

    /// Perform a PUT request with a JSON body.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> HarnessResult<ApiResponse> {
        let request = self.client.put(self.url(path)).json(body);
        self.execute("PUT", path, request).await
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> HarnessResult<ApiResponse> {
        let request = self.client.delete(self.url(path));
        self.execute("DELETE", path, request).await
    }

    async fn execute(
        &self,
        method: &str,
        path: &str,
        mut request: reqwest::RequestBuilder,
    ) -> HarnessResult<ApiResponse> {
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        debug!("{} {}{}", method, self.base_url, path);
        let start = Instant::now();

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(
            "{} {} -> {} ({} bytes, {} ms)",
            method,
            path,
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        Ok(ApiResponse { status, headers, body })
    }
}

/// Structured response from a test request
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// A response header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw response body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Response body as text.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as a JSON value.
    pub fn json_value(&self) -> HarnessResult<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> HarnessResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// All matches for a JSON-path expression against the body.
    pub fn json_path(&self, path: &str) -> HarnessResult<Vec<Value>> {
        let value = self.json_value()?;
        let hits = jsonpath_lib::select(&value, path).map_err(|e| HarnessError::JsonPath {
            path: path.to_string(),
            reason: format!("{e:?}"),
        })?;
        Ok(hits.into_iter().cloned().collect())
    }

    /// First match for a JSON-path expression, if any.
    pub fn json_path_first(&self, path: &str) -> HarnessResult<Option<Value>> {
        Ok(self.json_path(path)?.into_iter().next())
    }
}
