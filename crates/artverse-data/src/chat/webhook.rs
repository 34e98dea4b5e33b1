//! Sending chat requests to the webhook.

use super::wire::{ChatReply, ChatRequest};
use crate::{FetchClient, FetchError};
use async_trait::async_trait;

/// Session id sent when none is configured.
pub const DEFAULT_SESSION_ID: &str = "nft-chat-widget-session";

/// Delivers one chat request and returns the decoded reply.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, FetchError>;
}

/// [`ChatTransport`] that POSTs to a webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: FetchClient,
    url: String,
}

impl WebhookClient {
    pub fn new(client: FetchClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for WebhookClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, FetchError> {
        let outgoing = self.client.post(self.url.as_str()).json(request)?;
        let response = self.client.send(outgoing).await?.error_for_status()?;
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MediaItem;
    use crate::FetchConfig;
    use httpmock::prelude::*;
    use serde_json::json;

    fn webhook(server: &MockServer) -> WebhookClient {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        WebhookClient::new(client, server.url("/webhook/chat"))
    }

    #[tokio::test]
    async fn test_posts_request_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/webhook/chat")
                    .header("content-type", "application/json")
                    .body_includes(r#""message":"any apes?""#)
                    .body_includes(r#""sessionId":"nft-chat-widget-session""#);
                then.status(200).json_body(json!({
                    "text": "Two apes listed.",
                    "media": [{"type": "image", "url": "https://x/ape.png", "title": "Ape"}]
                }));
            })
            .await;

        let request = ChatRequest::new("any apes?", DEFAULT_SESSION_ID);
        let reply = webhook(&server).send(&request).await.unwrap();
        mock.assert_async().await;

        assert_eq!(reply.content(), Some("Two apes listed."));
        assert!(matches!(reply.media_items()[0], MediaItem::Image(_)));
    }

    #[tokio::test]
    async fn test_non_2xx_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(404).body("webhook not registered");
            })
            .await;

        let err = webhook(&server)
            .send(&ChatRequest::new("hi", DEFAULT_SESSION_ID))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_undecodable_reply_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(200).body("Workflow was started");
            })
            .await;

        let err = webhook(&server)
            .send(&ChatRequest::new("hi", DEFAULT_SESSION_ID))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));
    }
}
