//! Stub registration and request-history verification helpers

use serde_json::Value;
use tracing::info;
use wiremock::matchers::{body_partial_json, header_regex, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Stub a GET endpoint with a JSON response.
pub async fn stub_get_json(server: &MockServer, url_path: &str, status: u16, body: &str) {
    info!("Stubbing GET {} -> {}", url_path, status);
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(json_response(status, body))
        .mount(server)
        .await;
}

/// Stub a POST endpoint that requires a partial JSON body match.
pub async fn stub_post_json(
    server: &MockServer,
    url_path: &str,
    expected_body: Value,
    status: u16,
    body: &str,
) {
    info!("Stubbing POST {} -> {}", url_path, status);
    Mock::given(method("POST"))
        .and(path(url_path))
        .and(body_partial_json(expected_body))
        .respond_with(json_response(status, body))
        .mount(server)
        .await;
}

/// A JSON response template with the given status and body.
pub fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "application/json")
}

/// Matcher for `Authorization: Bearer ...` headers.
pub fn bearer_auth() -> impl Match {
    header_regex("Authorization", "Bearer .+")
}

/// Matcher accepting requests whose JSON body has at least one hit for a
/// JSON-path expression.
pub struct JsonPathMatch {
    expr: String,
}

/// Match requests whose JSON body satisfies `expr` (e.g. `$.productId`).
pub fn matching_json_path(expr: impl Into<String>) -> JsonPathMatch {
    JsonPathMatch { expr: expr.into() }
}

impl Match for JsonPathMatch {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        jsonpath_lib::select(&body, &self.expr)
            .map(|hits| !hits.is_empty())
            .unwrap_or(false)
    }
}

/// Number of recorded requests matching a method and exact path.
pub async fn received(server: &MockServer, http_method: &str, url_path: &str) -> usize {
    requests(server)
        .await
        .iter()
        .filter(|r| matches_request(r, http_method, url_path))
        .count()
}

/// Number of recorded requests matching a method, exact path, and header.
pub async fn received_with_header(
    server: &MockServer,
    http_method: &str,
    url_path: &str,
    header_name: &str,
    header_value: &str,
) -> usize {
    requests(server)
        .await
        .iter()
        .filter(|r| {
            matches_request(r, http_method, url_path)
                && r.headers
                    .get(header_name)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v == header_value)
        })
        .count()
}

async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

fn matches_request(request: &Request, http_method: &str, url_path: &str) -> bool {
    request.method.as_str().eq_ignore_ascii_case(http_method) && request.url.path() == url_path
}
