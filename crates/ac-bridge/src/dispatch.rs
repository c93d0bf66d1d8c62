//! Event dispatch: text → command → broker publish → reply.
//!
//! Events are handled in order. A broker failure stops the batch and is
//! returned to the caller; reply failures are only logged.

use ac_line_sdk::Event;
use ac_mqtt_channel::{MqttError, PublishRequest};

use crate::state::AppState;

/// What happened to one batch of webhook events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Text message events seen.
    pub text_events: usize,
    /// Commands delivered to the broker.
    pub published: usize,
    /// Replies accepted by LINE.
    pub replied: usize,
    /// Replies LINE rejected or that never arrived.
    pub reply_failures: usize,
    /// Non-text or non-message events skipped.
    pub ignored: usize,
}

/// Run every text message event through the command pipeline.
pub async fn handle_events(
    state: &AppState,
    events: &[Event],
) -> Result<DispatchSummary, MqttError> {
    let mut summary = DispatchSummary::default();

    for event in events {
        let Some(message) = event.as_text_message() else {
            tracing::debug!(kind = ?event.kind, "ignoring non-text event");
            summary.ignored += 1;
            continue;
        };
        summary.text_events += 1;

        let resolution = state.commands.resolve(message.text);
        match resolution.command {
            Some(code) => {
                state
                    .publisher
                    .publish(&PublishRequest::command(code))
                    .await?;
                summary.published += 1;
            }
            None => tracing::debug!(text = %message.text, "no command for text"),
        }

        match state
            .messenger
            .reply(message.reply_token, resolution.reply)
            .await
        {
            Ok(()) => summary.replied += 1,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deliver reply");
                summary.reply_failures += 1;
            }
        }
    }

    Ok(summary)
}
