//! Remote tool service over HTTP
//!
//! Each request is POSTed as a JSON-RPC 2.0 envelope; the `result` or `error`
//! member of the reply becomes a ServiceResponse.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{ProbeError, Result};

use super::messages::{ServiceRequest, ServiceResponse};
use super::service::ToolService;

/// Tool service reached through an HTTP endpoint
pub struct HttpToolService {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl HttpToolService {
    /// Create a client for `endpoint`
    ///
    /// `timeout` bounds the whole HTTP exchange; the validator applies its own
    /// per-invocation budget on top of this.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Wrap a request in a JSON-RPC 2.0 envelope
pub fn encode_envelope(id: u64, request: &ServiceRequest) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": request.method(),
        "params": request.params(),
    })
}

/// Unwrap a JSON-RPC 2.0 reply
pub fn decode_envelope(reply: Value) -> Result<ServiceResponse> {
    if let Some(error) = reply.get("error") {
        return Ok(ServiceResponse::from_value(json!({ "error": error })));
    }
    match reply.get("result") {
        Some(result) => Ok(ServiceResponse::from_value(result.clone())),
        None => Err(ProbeError::Protocol(
            "Reply carries neither 'result' nor 'error'".to_string(),
        )),
    }
}

#[async_trait]
impl ToolService for HttpToolService {
    async fn handle(&self, request: ServiceRequest) -> Result<ServiceResponse> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = encode_envelope(id, &request);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProbeError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Transport(format!(
                "HTTP {} from {}: {}",
                status, self.endpoint, error_body
            )));
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| ProbeError::Transport(format!("Failed to parse response: {}", e)))?;

        decode_envelope(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    #[test]
    fn test_encode_envelope() {
        let envelope = encode_envelope(7, &ServiceRequest::call("echo", Map::new()));
        assert_eq!(envelope["jsonrpc"], "2.0");
        assert_eq!(envelope["id"], 7);
        assert_eq!(envelope["method"], "tools/call");
        assert_eq!(envelope["params"]["name"], "echo");
    }

    #[test]
    fn test_decode_result() {
        let reply = json!({"jsonrpc": "2.0", "id": 1, "result": {"content": []}});
        let response = decode_envelope(reply).unwrap();
        assert!(response.has_content());
    }

    #[test]
    fn test_decode_error() {
        let reply = json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "nope"}});
        let response = decode_envelope(reply).unwrap();
        assert_eq!(response.as_error().unwrap().code, -32601);
    }

    #[test]
    fn test_decode_empty_reply() {
        let err = decode_envelope(json!({"jsonrpc": "2.0", "id": 1})).unwrap_err();
        assert!(matches!(err, ProbeError::Protocol(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let service = HttpToolService::new("http://127.0.0.1:9/rpc", Duration::from_millis(500)).unwrap();
        let err = service.handle(ServiceRequest::ListTools).await.unwrap_err();
        assert!(matches!(err, ProbeError::Transport(_)));
    }
}
