//! Webhook request validation and decoding.

use crate::error::{LineError, LineResult};
use crate::events::{Event, WebhookPayload};
use crate::signature::verify_signature;

/// Verify the request signature and decode its events.
///
/// A missing signature header counts as an invalid signature. Any
/// decoding problem after the signature check is a `LineError::Parse`.
pub fn parse_request(
    channel_secret: &str,
    signature: Option<&str>,
    body: &[u8],
) -> LineResult<Vec<Event>> {
    let signature = signature.ok_or(LineError::InvalidSignature)?;
    if !verify_signature(channel_secret, body, signature) {
        return Err(LineError::InvalidSignature);
    }

    let payload: WebhookPayload =
        serde_json::from_slice(body).map_err(|e| LineError::Parse(e.to_string()))?;
    Ok(payload.events)
}
