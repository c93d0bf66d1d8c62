//! Mock messenger for testing without the LINE API.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::client::Messenger;
use crate::error::{LineError, LineResult};

/// A recorded reply call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReply {
    pub reply_token: String,
    pub text: String,
}

/// Mock implementation of the `Messenger` trait.
///
/// Records attempted replies, including ones it was told to fail.
pub struct MockMessenger {
    sent: Mutex<Vec<SentReply>>,
    failing: AtomicBool,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Make subsequent replies fail with an API error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All reply attempts, in order.
    pub fn sent(&self) -> Vec<SentReply> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts of all reply attempts.
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    pub fn reset(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn reply(&self, reply_token: &str, text: &str) -> LineResult<()> {
        self.sent.lock().unwrap().push(SentReply {
            reply_token: reply_token.to_string(),
            text: text.to_string(),
        });
        if self.failing.load(Ordering::SeqCst) {
            return Err(LineError::Api {
                status: 400,
                body: "Invalid reply token".into(),
            });
        }
        Ok(())
    }
}
