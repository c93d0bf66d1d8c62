//! Mock publisher for testing without a real broker.
//!
//! Records every publish and tracks simulated connect/disconnect pairs
//! so tests can assert on per-message connection lifecycles.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{MqttError, MqttResult};
use crate::publisher::{PublishRequest, Publisher};

/// Mock implementation of the `Publisher` trait.
///
/// Thread-safe via `Mutex` and atomics (fine for test contexts).
pub struct MockPublisher {
    published: Mutex<Vec<PublishRequest>>,
    failing: AtomicBool,
    latency: Mutex<Option<Duration>>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
    open: AtomicUsize,
    peak_open: AtomicUsize,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            latency: Mutex::new(None),
            connects: AtomicUsize::new(0),
            disconnects: AtomicUsize::new(0),
            open: AtomicUsize::new(0),
            peak_open: AtomicUsize::new(0),
        }
    }

    /// A publisher whose broker refuses every connection.
    pub fn unreachable() -> Self {
        let mock = Self::new();
        mock.set_failing(true);
        mock
    }

    /// Make subsequent connects fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Hold each simulated connection open for `latency`.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = Some(latency);
    }

    /// All successfully published requests, in order.
    pub fn published(&self) -> Vec<PublishRequest> {
        self.published.lock().unwrap().clone()
    }

    /// Payloads of all published requests as strings.
    pub fn payloads(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.payload_str().into_owned())
            .collect()
    }

    /// Number of connection attempts.
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Number of connections that were closed after a successful connect.
    pub fn disconnects(&self) -> usize {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously open connections seen.
    pub fn peak_open(&self) -> usize {
        self.peak_open.load(Ordering::SeqCst)
    }

    /// Clear all recorded state.
    pub fn reset(&self) {
        self.published.lock().unwrap().clear();
        self.connects.store(0, Ordering::SeqCst);
        self.disconnects.store(0, Ordering::SeqCst);
        self.peak_open.store(0, Ordering::SeqCst);
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, request: &PublishRequest) -> MqttResult<()> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(MqttError::Connection("connection refused".into()));
        }

        let now_open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_open.fetch_max(now_open, Ordering::SeqCst);

        let latency = *self.latency.lock().unwrap();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.published.lock().unwrap().push(request.clone());

        self.open.fetch_sub(1, Ordering::SeqCst);
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
