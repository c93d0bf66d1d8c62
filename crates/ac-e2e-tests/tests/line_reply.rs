//! E2E test with the real LINE reply client against a mock API server.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ac_line_sdk::{LineClient, sign};
use helpers::{SECRET, TestHarness, payload, text_event};

/// The acknowledgment goes out as a LINE reply API call.
#[tokio::test]
async fn e2e_reply_reaches_line_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .and(header("authorization", "Bearer channel-token"))
        .and(body_json(json!({
            "replyToken": "rt-1",
            "messages": [{"type": "text", "text": "冷房つけました"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = LineClient::new("channel-token", server.uri()).unwrap();
    let (router, publisher) = TestHarness::with_messenger(Arc::new(client));

    let body = serde_json::to_vec(&payload(vec![text_event("rt-1", "冷房つけて")])).unwrap();
    let signature = sign(SECRET, &body);
    let resp = helpers::post(&router, body, &[("x-line-signature", signature.as_str())]).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(publisher.payloads(), vec!["airOn"]);
}

/// LINE rejecting the reply does not change the webhook response.
#[tokio::test]
async fn e2e_line_api_error_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/bot/message/reply"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid reply token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LineClient::new("channel-token", server.uri()).unwrap();
    let (router, publisher) = TestHarness::with_messenger(Arc::new(client));

    let body = serde_json::to_vec(&payload(vec![text_event("expired", "暖房つけて")])).unwrap();
    let signature = sign(SECRET, &body);
    let resp = helpers::post(&router, body, &[("x-line-signature", signature.as_str())]).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(publisher.payloads(), vec!["heatOn"]);
}
