//! Transport adapter for the reqres API.
//!
//! # Design
//! `ReqResAdapter` pins the base URL (and optional API key) at construction
//! and forwards GET/POST calls to an injected `HttpTransport`. It never looks
//! at status codes or bodies: responses and transport failures come back
//! exactly as the transport produced them. Request construction is split out
//! into `build_*` methods so it can be checked without any I/O.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

const JSON: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ReqResAdapter<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: HttpTransport> ReqResAdapter<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn build_get(&self, path: &str, query: &[(&str, String)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(path),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            headers: self.headers(false),
            body: None,
        }
    }

    pub fn build_post(&self, path: &str, body: &Value) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url(path),
            query: Vec::new(),
            headers: self.headers(true),
            body: Some(body.to_string()),
        }
    }

    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpResponse, TransportError> {
        self.send(self.build_get(path, query))
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        self.send(self.build_post(path, body))
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, %url, "sending request");

        match self.transport.execute(request) {
            Ok(response) => {
                debug!(method, %url, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(method, %url, error = %err, "transport failure");
                Err(err)
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path.trim_start_matches('/'))
    }

    fn headers(&self, with_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![("accept".to_string(), JSON.to_string())];
        if with_body {
            headers.push(("content-type".to_string(), JSON.to_string()));
        }
        if let Some(key) = self.config.api_key() {
            headers.push(("x-api-key".to_string(), key.to_string()));
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<HttpRequest>>,
        fail_with: Option<&'static str>,
    }

    impl HttpTransport for Recorder {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            match self.fail_with {
                Some(message) => Err(TransportError::new(message)),
                None => Ok(HttpResponse {
                    status: 418,
                    headers: Vec::new(),
                    body: "teapot".to_string(),
                }),
            }
        }
    }

    fn adapter(transport: &Recorder) -> ReqResAdapter<&Recorder> {
        ReqResAdapter::new(transport, ClientConfig::new("http://localhost:3000/api"))
    }

    #[test]
    fn build_get_joins_base_url_and_path() {
        let recorder = Recorder::default();
        let req = adapter(&recorder).build_get("users/2", &[]);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/users/2");
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
        assert_eq!(req.headers, vec![("accept".to_string(), "application/json".to_string())]);
    }

    #[test]
    fn build_get_carries_query() {
        let recorder = Recorder::default();
        let req = adapter(&recorder).build_get("/users", &[("page", "2".to_string())]);
        assert_eq!(req.url, "http://localhost:3000/api/users");
        assert_eq!(req.query, vec![("page".to_string(), "2".to_string())]);
    }

    #[test]
    fn build_post_encodes_json_body() {
        let recorder = Recorder::default();
        let body = serde_json::json!({"name": "Joe Walsh", "job": "Guitarist"});
        let req = adapter(&recorder).build_post("users", &body);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/users");
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn api_key_header_is_added_when_configured() {
        let recorder = Recorder::default();
        let adapter = ReqResAdapter::new(&recorder, ClientConfig::default().with_api_key("reqres-free-v1"));
        let req = adapter.build_get("users", &[]);
        assert!(req
            .headers
            .contains(&("x-api-key".to_string(), "reqres-free-v1".to_string())));
    }

    #[test]
    fn responses_pass_through_unchanged() {
        let recorder = Recorder::default();
        let response = adapter(&recorder).get("users/2", &[]).unwrap();
        assert_eq!(response.status, 418);
        assert_eq!(response.body, "teapot");

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "http://localhost:3000/api/users/2");
    }

    #[test]
    fn transport_failures_pass_through_unchanged() {
        let recorder = Recorder {
            fail_with: Some("Server error"),
            ..Recorder::default()
        };
        let err = adapter(&recorder)
            .post("users", &serde_json::json!({}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Server error");
    }
}
