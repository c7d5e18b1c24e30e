//! Caller authentication via a static shared key
//!
//! The caller presents the key in the `x-proxy-key` header. The expected value
//! is the freshly loaded content of the proxy-key secret file.

/// Header carrying the caller's proxy key
pub const PROXY_KEY_HEADER: &str = "x-proxy-key";

/// Check a caller-supplied header value against the expected proxy key.
///
/// Returns true only on exact equality. A missing or empty header never
/// authenticates.
pub fn authenticate(header_value: Option<&str>, expected_key: &str) -> bool {
    match header_value {
        Some(got) if !got.is_empty() => got == expected_key,
        _ => false,
    }
}
