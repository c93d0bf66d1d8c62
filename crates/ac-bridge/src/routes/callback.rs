//! LINE webhook endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use ac_line_sdk::SIGNATURE_HEADER;

use crate::dispatch;
use crate::error::ApiResult;
use crate::state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// POST /callback: verify the signature, then dispatch events.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> ApiResult<Response> {
    if let Some(location) = plaintext_redirect(&headers, &uri) {
        tracing::info!(location = %location, "redirecting plaintext request");
        return Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response());
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let events = ac_line_sdk::parse_request(&state.channel_secret, signature, &body)
        .inspect_err(|e| tracing::warn!(error = %e, "rejected webhook request"))?;

    let summary = dispatch::handle_events(&state, &events)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "broker failure, aborting request"))?;
    tracing::debug!(
        events = events.len(),
        published = summary.published,
        replied = summary.replied,
        "webhook handled"
    );

    Ok(StatusCode::OK.into_response())
}

/// `https://{host}{path}` when the proxy says the client used plain HTTP.
fn plaintext_redirect(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let proto = headers.get_all(FORWARDED_PROTO).iter().next()?;
    if proto.as_bytes() != b"http" {
        return None;
    }

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))?;

    Some(format!("https://{host}{}", uri.path()))
}
