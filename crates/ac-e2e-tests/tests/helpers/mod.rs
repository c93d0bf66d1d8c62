//! Shared test harness for E2E integration tests.
//!
//! Drives the real router and dispatch pipeline with a `MockPublisher`
//! standing in for the broker and a `MockMessenger` for the LINE API.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use ac_bridge::routes::build_router;
use ac_bridge::state::AppState;
use ac_line_sdk::{Messenger, MockMessenger, sign};
use ac_mqtt_channel::MockPublisher;
use ac_protocol::CommandMapping;

pub const SECRET: &str = "e2e-channel-secret";

/// Outcome of one webhook call.
pub struct CallbackResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// End-to-end harness wiring the bridge router to mock collaborators.
pub struct TestHarness {
    pub router: Router,
    pub publisher: Arc<MockPublisher>,
    pub messenger: Arc<MockMessenger>,
}

impl TestHarness {
    /// Harness using the built-in aircon command table.
    pub fn new() -> Self {
        Self::with_commands(CommandMapping::builtin())
    }

    /// Harness using a custom command table.
    pub fn with_commands(commands: CommandMapping) -> Self {
        let publisher = Arc::new(MockPublisher::new());
        let messenger = Arc::new(MockMessenger::new());
        let state = AppState::new(SECRET, commands, publisher.clone(), messenger.clone());

        Self {
            router: build_router(state),
            publisher,
            messenger,
        }
    }

    /// Harness with a mock publisher and an arbitrary messenger.
    pub fn with_messenger(messenger: Arc<dyn Messenger>) -> (Router, Arc<MockPublisher>) {
        let publisher = Arc::new(MockPublisher::new());
        let state = AppState::new(SECRET, CommandMapping::builtin(), publisher.clone(), messenger);
        (build_router(state), publisher)
    }

    /// POST a correctly signed webhook body.
    pub async fn post_signed(&self, body: &Value) -> CallbackResponse {
        let bytes = serde_json::to_vec(body).unwrap();
        let signature = sign(SECRET, &bytes);
        self.post_raw(bytes, &[("x-line-signature", signature.as_str())])
            .await
    }

    /// POST raw bytes with the given headers.
    pub async fn post_raw(&self, body: Vec<u8>, headers: &[(&str, &str)]) -> CallbackResponse {
        post(&self.router, body, headers).await
    }
}

/// POST to `/callback` on any router.
pub async fn post(router: &Router, body: Vec<u8>, headers: &[(&str, &str)]) -> CallbackResponse {
    let mut request = Request::post("/callback").header("content-type", "application/json");
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = router
        .clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    CallbackResponse {
        status,
        headers,
        body,
    }
}

/// Webhook body carrying the given events.
pub fn payload(events: Vec<Value>) -> Value {
    json!({ "destination": "Ubot0000", "events": events })
}

/// A text message event from a one-to-one chat.
pub fn text_event(reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1700000000000i64,
        "source": {"type": "user", "userId": "U0123456789abcdef"},
        "webhookEventId": "01HXYZ",
        "deliveryContext": {"isRedelivery": false},
        "replyToken": reply_token,
        "message": {"id": "468789577898262530", "type": "text", "text": text}
    })
}

/// A sticker message event.
pub fn sticker_event(reply_token: &str) -> Value {
    json!({
        "type": "message",
        "timestamp": 1700000000000i64,
        "source": {"type": "user", "userId": "U0123456789abcdef"},
        "replyToken": reply_token,
        "message": {"id": "1", "type": "sticker", "packageId": "446", "stickerId": "1988"}
    })
}

/// A follow (friend added) event.
pub fn follow_event(reply_token: &str) -> Value {
    json!({
        "type": "follow",
        "timestamp": 1700000000000i64,
        "source": {"type": "user", "userId": "U0123456789abcdef"},
        "replyToken": reply_token
    })
}
