//! Mock HTTP client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST, PATCH, DELETE)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (for POST and PATCH requests)
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

/// Mock HTTP client for testing.
///
/// Responses are looked up by `METHOD url` first, then by URL, both exact
/// and as a prefix, then the default.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://x.supabase.co/rest/v1/posts",
///     MockResponse::Success(Response::json_body(200, &json!([]))),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL (or URL prefix), for any method.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a response for one method on a URL (or URL prefix).
    pub fn set_method_response(&self, method: &str, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(format!("{} {}", method, url), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Record a request.
    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    /// Longest matching prefix wins so specific routes beat broad ones.
    fn lookup(responses: &HashMap<String, MockResponse>, key: &str) -> Option<MockResponse> {
        if let Some(response) = responses.get(key) {
            return Some(response.clone());
        }
        responses
            .iter()
            .filter(|(pattern, _)| key.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone())
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        Self::lookup(&responses, &format!("{} {}", method, url))
            .or_else(|| Self::lookup(&responses, url))
            .or_else(|| self.default_response.lock().unwrap().clone())
    }

    fn respond(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("GET", url, headers, None);
        self.respond("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("POST", url, headers, Some(body.to_string()));
        self.respond("POST", url)
    }

    async fn patch(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.record_request("PATCH", url, headers, Some(body.to_string()));
        self.respond("PATCH", url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request("DELETE", url, headers, None);
        self.respond("DELETE", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/test",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client
            .get("https://example.com/test", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_method_specific_response_wins() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/rest/v1/posts",
            MockResponse::Success(Response::new(200, Bytes::from("[]"))),
        );
        client.set_method_response(
            "DELETE",
            "https://example.com/rest/v1/posts",
            MockResponse::Success(Response::new(204, Bytes::new())),
        );

        let get = client
            .get("https://example.com/rest/v1/posts?id=eq.1", &Headers::new())
            .await
            .unwrap();
        let delete = client
            .delete("https://example.com/rest/v1/posts?id=eq.1", &Headers::new())
            .await
            .unwrap();

        assert_eq!(get.status, 200);
        assert_eq!(delete.status, 204);
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/rest/v1/",
            MockResponse::Success(Response::new(500, Bytes::new())),
        );
        client.set_response(
            "https://example.com/rest/v1/users",
            MockResponse::Success(Response::new(200, Bytes::from("{}"))),
        );

        let response = client
            .get("https://example.com/rest/v1/users?id=eq.u1", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_patch_body_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));

        client
            .patch("https://example.com/x", r#"{"is_hidden":true}"#, &Headers::new())
            .await
            .unwrap();

        let requests = client.get_requests();
        assert_eq!(requests[0].method, "PATCH");
        assert_eq!(
            requests[0].json_body(),
            Some(serde_json::json!({"is_hidden": true}))
        );
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client
            .get("https://example.com/missing", &Headers::new())
            .await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_clone_shares_requests() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, Bytes::new())));
        let cloned = client.clone();

        cloned
            .get("https://example.com", &Headers::new())
            .await
            .unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
