//! Error types for vmp-proxy
//!
//! Every request-level failure funnels into [`ProxyError`], whose
//! `IntoResponse` impl is the single place error bodies are produced.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::api::json_reply;
use crate::upstream::UpstreamError;

/// A required request parameter that was absent or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingParameter {
    Device,
    Text,
}

impl MissingParameter {
    /// Error code returned to the caller
    pub fn code(self) -> &'static str {
        match self {
            MissingParameter::Device => "missing_device",
            MissingParameter::Text => "missing_text",
        }
    }
}

/// Main error type for request handling
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Missing or wrong `x-proxy-key`
    #[error("unauthorized")]
    Unauthorized,

    #[error("{}", .0.code())]
    MissingParameter(MissingParameter),

    #[error("not_found")]
    NotFound,

    /// Proxy key could not be loaded
    #[error(transparent)]
    Secret(#[from] vmp_common::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Invalid JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),
}

impl From<MissingParameter> for ProxyError {
    fn from(param: MissingParameter) -> Self {
        ProxyError::MissingParameter(param)
    }
}

/// `{ ok: false, error, message? }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(error: &'static str) -> Self {
        Self {
            ok: false,
            error,
            message: None,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Unauthorized => {
                json_reply(StatusCode::UNAUTHORIZED, &ErrorResponse::new("unauthorized"))
            }
            ProxyError::MissingParameter(param) => {
                json_reply(StatusCode::BAD_REQUEST, &ErrorResponse::new(param.code()))
            }
            ProxyError::NotFound => {
                json_reply(StatusCode::NOT_FOUND, &ErrorResponse::new("not_found"))
            }
            other => {
                let message = other.to_string();
                error!("Request failed: {}", message);
                json_reply(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponse {
                        ok: false,
                        error: "server_error",
                        message: Some(message),
                    },
                )
            }
        }
    }
}
