//! Blocking `HttpTransport` backed by a ureq agent.

use tracing::warn;

use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Executes requests with a shared `ureq::Agent`.
///
/// The default agent has ureq's status-code-as-error behavior turned off, so
/// 4xx/5xx responses come back as `HttpResponse` values and the service
/// decides what they mean.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Use a preconfigured agent (timeouts, proxy, TLS). The agent must be
    /// built with `http_status_as_error(false)`, otherwise error statuses
    /// surface as transport failures.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            query,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&url);
                for (key, value) in &query {
                    builder = builder.query(key, value);
                }
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&url);
                for (key, value) in &query {
                    builder = builder.query(key, value);
                }
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::with_source(e.to_string(), e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| TransportError::with_source(e.to_string(), e))?;
        let body = body_text(bytes);

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// A response was received, so an undecodable body is not a transport
/// failure. Invalid UTF-8 is replaced with U+FFFD and left for the service to
/// reject when it decodes the JSON.
fn body_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err.utf8_error(), "response body is not valid UTF-8");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_body_is_kept_verbatim() {
        assert_eq!(body_text(br#"{"id":"3"}"#.to_vec()), r#"{"id":"3"}"#);
    }

    #[test]
    fn invalid_utf8_body_is_replaced_not_dropped() {
        let text = body_text(vec![b'{', 0xff, 0xfe, b'}']);
        assert_eq!(text, "{\u{fffd}\u{fffd}}");
        assert!(serde_json::from_str::<serde_json::Value>(&text).is_err());
    }

    #[test]
    fn custom_agent_is_used_as_is() {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        let transport = UreqTransport::with_agent(agent);
        assert!(format!("{transport:?}").contains("UreqTransport"));
    }
}
