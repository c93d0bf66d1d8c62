//! LINE Messaging API boundary.
//!
//! - `verify_signature` / `sign` for the `X-Line-Signature` header
//! - `Event` model for webhook payloads
//! - `parse_request` combining both
//! - `Messenger` trait with `LineClient` (HTTP) and `MockMessenger` (tests)

pub mod client;
pub mod error;
pub mod events;
pub mod mock;
pub mod signature;
pub mod webhook;

// Re-exports for convenience.
pub use client::{LineClient, Messenger};
pub use error::{LineError, LineResult};
pub use events::{Event, EventType, Message, Source, TextMessage, WebhookPayload};
pub use mock::MockMessenger;
pub use signature::{SIGNATURE_HEADER, sign, verify_signature};
pub use webhook::parse_request;
