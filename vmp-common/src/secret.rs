//! Secret file loading
//!
//! Both the proxy key and the upstream token live in plaintext UTF-8 files.
//! Secrets are read fresh on every use so an operator can rotate a file
//! without restarting the process. Nothing here caches.

use std::io::ErrorKind;
use std::path::Path;

use crate::{Error, Result};

/// Label used in error messages for the caller-facing shared key
pub const PROXY_KEY_LABEL: &str = "proxy key";

/// Label used in error messages for the upstream API token
pub const UPSTREAM_TOKEN_LABEL: &str = "voicemonkey token";

/// Read the secret at `path`, returning its trimmed content.
///
/// # Errors
///
/// - [`Error::MissingSecret`] if the file does not exist
/// - [`Error::EmptySecret`] if the trimmed content is empty
/// - [`Error::SecretUnreadable`] for any other read failure (permissions,
///   invalid UTF-8, ...)
pub async fn load_secret(path: &Path, label: &str) -> Result<String> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::MissingSecret {
                label: label.to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(Error::SecretUnreadable {
                label: label.to_string(),
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let value = raw.trim();
    if value.is_empty() {
        return Err(Error::EmptySecret {
            label: label.to_string(),
            path: path.to_path_buf(),
        });
    }

    Ok(value.to_string())
}
