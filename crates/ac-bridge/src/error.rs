//! Request-level error type with Axum `IntoResponse` support.
//!
//! Responses carry only a status code; the LINE platform ignores bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ac_line_sdk::LineError;
use ac_mqtt_channel::MqttError;

/// Errors that end a webhook request early.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("broker error: {0}")]
    Broker(#[from] MqttError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Broker(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LineError> for ApiError {
    fn from(err: LineError) -> Self {
        match err {
            LineError::InvalidSignature => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn invalid_signature_is_bad_request() {
        let err = ApiError::from(LineError::InvalidSignature);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[test]
    fn parse_failure_is_internal() {
        let err = ApiError::from(LineError::Parse("expected value".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn broker_failure_is_internal() {
        let err = ApiError::from(MqttError::Connection("refused".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "broker error: connection error: refused");
    }
}
