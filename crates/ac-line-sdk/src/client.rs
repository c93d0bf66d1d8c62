//! Reply client for the LINE Messaging API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{LineError, LineResult};

/// Production API host.
pub const DEFAULT_API_BASE: &str = "https://api.line.me";

// ── Messenger trait ───────────────────────────────────────────

/// Sends replies back to chat users.
///
/// Enables mocking in tests without the LINE API.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Reply to the event identified by `reply_token` with one text message.
    async fn reply(&self, reply_token: &str, text: &str) -> LineResult<()>;
}

// ── LineClient ────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: [TextBody<'a>; 1],
}

#[derive(Serialize)]
struct TextBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

/// HTTP client for `POST /v2/bot/message/reply`.
pub struct LineClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl LineClient {
    pub fn new(access_token: impl Into<String>, base_url: impl Into<String>) -> LineResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LineError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Messenger for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> LineResult<()> {
        let url = format!("{}/v2/bot/message/reply", self.base_url);
        let body = ReplyRequest {
            reply_token,
            messages: [TextBody { kind: "text", text }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LineError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("reply delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LineClient {
        LineClient::new("token-123", server.uri()).unwrap()
    }

    #[tokio::test]
    async fn reply_posts_text_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .and(header("authorization", "Bearer token-123"))
            .and(body_json(json!({
                "replyToken": "rt-1",
                "messages": [{"type": "text", "text": "暖房つけました"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .reply("rt-1", "暖房つけました")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn api_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/bot/message/reply"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"message":"Invalid reply token"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).reply("stale", "hi").await.unwrap_err();
        match err {
            LineError::Api { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("Invalid reply token"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_api_is_http_error() {
        let client = LineClient::new("t", "http://127.0.0.1:1").unwrap();
        let err = client.reply("r", "hi").await.unwrap_err();
        assert!(matches!(err, LineError::Http(_)));
    }

    #[test]
    fn trailing_slash_trimmed_from_base() {
        let client = LineClient::new("t", "https://api.line.me/").unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_BASE);
    }
}
