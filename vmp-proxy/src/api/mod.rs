//! HTTP API handlers for vmp-proxy

pub mod auth;
pub mod commands;
pub mod health;
pub mod params;

pub use auth::require_proxy_key;
pub use commands::{announce, trigger};
pub use health::health_check;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::error::ProxyError;

/// Content type of every response
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serialize `body` as the JSON response with the given status
pub fn json_reply<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response(),
        Err(e) => {
            error!("Failed to serialize response body: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                r#"{"ok":false,"error":"server_error"}"#,
            )
                .into_response()
        }
    }
}

/// Fallback for unknown paths and unsupported methods
pub async fn not_found() -> ProxyError {
    ProxyError::NotFound
}
