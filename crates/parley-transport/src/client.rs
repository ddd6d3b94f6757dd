//! HTTP client for the reply endpoint.

use std::time::Duration;

use async_trait::async_trait;

use parley_core::config::TransportConfig;
use parley_core::error::{ParleyError, Result};

use crate::wire::{ReplyPayload, ReplyRequest};

/// Sends a user utterance to the remote service and returns its reply.
///
/// Callers reject empty trimmed input before invoking; the transport only
/// ever sees a real utterance.
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    async fn send_utterance(&self, text: &str, user_id: &str) -> Result<ReplyPayload>;
}

/// Reqwest-backed client for the reply endpoint.
///
/// Holds one shared `reqwest::Client` for connection pooling. Non-2xx
/// status, network failure, and malformed bodies all collapse into
/// `ParleyError::Transport`; no partial result ever escapes.
pub struct HttpReplyClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReplyClient {
    /// Build a client for the given endpoint with the given timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParleyError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build a client from the transport section of the config.
    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl ReplyTransport for HttpReplyClient {
    async fn send_utterance(&self, text: &str, user_id: &str) -> Result<ReplyPayload> {
        let request_body = ReplyRequest {
            message: text,
            user_id,
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            message_len = text.len(),
            "Sending utterance to reply endpoint"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ParleyError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string());
            tracing::error!(
                status_code = status.as_u16(),
                error_body = %error_body,
                "Reply endpoint returned error status"
            );
            return Err(ParleyError::Transport(format!(
                "reply endpoint returned HTTP {}: {}",
                status.as_u16(),
                error_body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ParleyError::Transport(format!("failed to read response body: {}", e)))?;

        let payload: ReplyPayload = serde_json::from_str(&body).map_err(|e| {
            ParleyError::Transport(format!("malformed reply payload: {} - body: {}", e, body))
        })?;

        tracing::debug!(
            reply_len = payload.reply.len(),
            option_count = payload.options.len(),
            "Reply received"
        );

        Ok(payload)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client_for(server: &Server) -> HttpReplyClient {
        HttpReplyClient::new(format!("{}/chat", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_utterance_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"reply": "WASAPI is a Windows audio API.", "options": []}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let payload = client
            .send_utterance("What is WASAPI?", "web-user")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(payload.reply, "WASAPI is a Windows audio API.");
        assert!(payload.options.is_empty());
    }

    #[tokio::test]
    async fn test_send_utterance_success_with_options() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body(
                r#"{
                    "reply": "Anything else?",
                    "options": [
                        {"label": "Tell me more", "intent": "expand"},
                        {"label": "No thanks"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let payload = client.send_utterance("thanks", "web-user").await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload.options.len(), 2);
        assert_eq!(payload.options[0].label, "Tell me more");
        assert_eq!(payload.options[0].extra.get("intent").unwrap(), "expand");
    }

    #[tokio::test]
    async fn test_send_utterance_missing_options_field() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body(r#"{"reply": "Just a reply."}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let payload = client.send_utterance("hi", "web-user").await.unwrap();
        assert!(payload.options.is_empty());
    }

    #[tokio::test]
    async fn test_send_utterance_posts_expected_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "message": "hello",
                "user_id": "visitor-7"
            })))
            .with_status(200)
            .with_body(r#"{"reply": "hi"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.send_utterance("hello", "visitor-7").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_utterance_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(503)
            .with_body("service unavailable")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.send_utterance("hello", "web-user").await;
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("503"));
    }

    #[tokio::test]
    async fn test_send_utterance_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body("this is not JSON")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.send_utterance("hello", "web-user").await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("malformed reply payload"));
    }

    #[tokio::test]
    async fn test_send_utterance_connection_refused() {
        // Nothing listens on this port.
        let client =
            HttpReplyClient::new("http://127.0.0.1:9/chat", Duration::from_secs(1)).unwrap();
        let result = client.send_utterance("hello", "web-user").await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParleyError::Transport(_)));
    }

    #[tokio::test]
    async fn test_from_config_uses_endpoint() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body(r#"{"reply": "configured"}"#)
            .create_async()
            .await;

        let config = TransportConfig {
            endpoint: format!("{}/chat", server.url()),
            user_id: "web-user".to_string(),
            timeout_secs: 5,
        };
        let client = HttpReplyClient::from_config(&config).unwrap();
        let payload = client.send_utterance("hi", &config.user_id).await.unwrap();
        assert_eq!(payload.reply, "configured");
    }
}
