//! vmp-proxy library - authenticated VoiceMonkey relay
//!
//! Forwards device triggers and spoken announcements to the VoiceMonkey API,
//! injecting an upstream token the caller never sees. Callers authenticate
//! with a shared proxy key in the `x-proxy-key` header.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use vmp_common::config::ProxyConfig;

pub mod api;
pub mod error;
pub mod upstream;

use upstream::{UpstreamError, VoiceMonkeyClient};

/// Application state shared across HTTP handlers
///
/// Holds configuration only; secrets are re-read per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: VoiceMonkeyClient,
}

impl AppState {
    /// Create application state and its upstream client
    pub fn new(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let upstream =
            VoiceMonkeyClient::new(config.upstream_base_url.clone(), config.token_path.clone())?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
        })
    }
}

/// Build application router
///
/// `/health` is public and GET only. `/trigger` and `/announce` require the
/// proxy key and accept any method; only POST bodies are read. Everything
/// else is a JSON 404.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{any, get};

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/trigger", any(api::trigger))
        .route("/announce", any(api::announce))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_proxy_key,
        ));

    // Public routes (no authentication)
    // `get` would also answer HEAD; the health check is GET only
    let public = Router::new().route(
        "/health",
        get(api::health_check)
            .head(api::not_found)
            .fallback(api::not_found),
    );

    Router::new()
        .merge(protected)
        .merge(public)
        .fallback(api::not_found)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &axum::http::Request<_>| {
                tracing::info_span!("http", method = %req.method(), path = %req.uri().path())
            }),
        )
        .with_state(state)
}
