//! HTTP error mapping
//!
//! Every core failure reaches the client as a 500 with a `detail` message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::RelayError;

/// Handler error wrapping any core failure
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RelayError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.0.to_string();

        if self.0.is_config() {
            tracing::error!(error = %detail, "Server misconfigured");
        } else {
            tracing::error!(error = %detail, "Request failed");
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": detail })),
        )
            .into_response()
    }
}
