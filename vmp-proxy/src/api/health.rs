//! Liveness probe

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Serialize;

use super::json_reply;
use crate::AppState;

/// `{ ok: true, host, port }`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub host: String,
    pub port: u16,
}

/// GET /health
///
/// Does NOT require authentication. HEAD gets the JSON 404.
pub async fn health_check(State(state): State<AppState>) -> Response {
    json_reply(
        StatusCode::OK,
        &HealthResponse {
            ok: true,
            host: state.config.host.clone(),
            port: state.config.port,
        },
    )
}
