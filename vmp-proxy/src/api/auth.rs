//! Authentication middleware for the relay routes
//!
//! The proxy key file is re-read on every request, so rotating it takes
//! effect immediately. Runs before any parameter extraction.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use vmp_common::api::{authenticate, PROXY_KEY_HEADER};
use vmp_common::secret::{load_secret, PROXY_KEY_LABEL};

use crate::error::ProxyError;
use crate::AppState;

/// Reject requests whose `x-proxy-key` does not match the proxy key file.
///
/// A key file that cannot be loaded is a server error, not an auth failure.
pub async fn require_proxy_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ProxyError> {
    let expected = load_secret(&state.config.key_path, PROXY_KEY_LABEL).await?;

    let provided = request
        .headers()
        .get(PROXY_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if !authenticate(provided, &expected) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            header_present = provided.is_some(),
            "Rejected request: invalid proxy key"
        );
        return Err(ProxyError::Unauthorized);
    }

    Ok(next.run(request).await)
}
