//! vmp-proxy - VoiceMonkey relay entry point
//!
//! Resolves configuration, builds the router and serves until Ctrl+C or
//! SIGTERM. Secrets are not read at startup; only their paths are logged.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vmp_common::config::{app_dir, load_config_layer, ConfigOverrides, ProxyConfig};
use vmp_proxy::{build_router, AppState};

/// Command-line arguments for vmp-proxy
#[derive(Parser, Debug)]
#[command(name = "vmp-proxy")]
#[command(about = "Authenticated relay for the VoiceMonkey trigger and announcement API")]
#[command(version)]
struct Args {
    /// Address to bind [default: 127.0.0.1]
    #[arg(long, env = "VM_PROXY_HOST")]
    host: Option<String>,

    /// Port to listen on [default: 18793]
    #[arg(short, long, env = "VM_PROXY_PORT")]
    port: Option<u16>,

    /// Upstream token file [default: <app>/secrets/token.txt]
    #[arg(long, env = "VOICEMONKEY_TOKEN_PATH")]
    token_path: Option<PathBuf>,

    /// Proxy key file [default: <app>/secrets/proxy-key.txt]
    #[arg(long, env = "VM_PROXY_KEY_PATH")]
    key_path: Option<PathBuf>,

    /// Upstream API base URL [default: https://api-v2.voicemonkey.io]
    #[arg(long, env = "VOICEMONKEY_API_BASE")]
    upstream_base_url: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "VM_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            token_path: self.token_path.clone(),
            key_path: self.key_path.clone(),
            upstream_base_url: self.upstream_base_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vmp_proxy=info,vmp_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting VoiceMonkey proxy (vmp-proxy) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let file = load_config_layer(args.config.as_deref());
    let config = ProxyConfig::resolve(args.overrides(), file.as_ref(), &app_dir());

    let state = AppState::new(config.clone()).context("Failed to build upstream HTTP client")?;
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("VoiceMonkey proxy listening on http://{}", addr);
    info!("tokenPath={}", config.token_path.display());
    info!("keyPath={}", config.key_path.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("vmp-proxy shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
