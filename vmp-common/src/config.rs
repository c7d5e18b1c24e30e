//! Configuration loading and resolution
//!
//! Each setting is resolved independently in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Clap merges 1 and 2 before anything here sees them, so [`ConfigOverrides`]
//! carries both layers together.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 18793;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api-v2.voicemonkey.io";

/// Directory under `<app>` holding the secret files
pub const SECRETS_DIR: &str = "secrets";
pub const DEFAULT_TOKEN_FILE: &str = "token.txt";
pub const DEFAULT_KEY_FILE: &str = "proxy-key.txt";

/// Optional on-disk configuration
///
/// Every key is optional; absent keys fall through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub token_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub upstream_base_url: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub token_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub upstream_base_url: Option<String>,
}

/// Fully resolved proxy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    /// Upstream token file (read per request, never cached)
    pub token_path: PathBuf,
    /// Proxy key file (read per request, never cached)
    pub key_path: PathBuf,
    /// Base of the upstream API, without trailing slash
    pub upstream_base_url: String,
}

impl ProxyConfig {
    /// Resolve every setting from the override layer, the optional TOML file,
    /// and compiled defaults rooted at `app_dir`.
    pub fn resolve(overrides: ConfigOverrides, file: Option<&TomlConfig>, app_dir: &Path) -> Self {
        let file = file.cloned().unwrap_or_default();
        let secrets = app_dir.join(SECRETS_DIR);

        let host = non_empty(overrides.host)
            .or_else(|| non_empty(file.host))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);

        let token_path = non_empty_path(overrides.token_path)
            .or_else(|| non_empty_path(file.token_path))
            .unwrap_or_else(|| secrets.join(DEFAULT_TOKEN_FILE));

        let key_path = non_empty_path(overrides.key_path)
            .or_else(|| non_empty_path(file.key_path))
            .unwrap_or_else(|| secrets.join(DEFAULT_KEY_FILE));

        let upstream_base_url = non_empty(overrides.upstream_base_url)
            .or_else(|| non_empty(file.upstream_base_url))
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            token_path,
            key_path,
            upstream_base_url,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
}

/// Load the TOML layer, degrading gracefully.
///
/// An explicit path is used as given; otherwise the per-user config file is
/// tried if it exists. A missing or malformed file logs a warning and yields
/// `None` so startup continues on the remaining layers.
pub fn load_config_layer(explicit: Option<&Path>) -> Option<TomlConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => default_config_file().filter(|p| p.exists())?,
    };

    match load_toml_config(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            None
        }
    }
}

/// Per-user config file location (`<config_dir>/vm-proxy/config.toml`)
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vm-proxy").join("config.toml"))
}

/// Directory the default `secrets/` folder is rooted at.
///
/// This is the directory holding the running executable, or the current
/// directory if that cannot be determined.
pub fn app_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
