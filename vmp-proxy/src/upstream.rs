//! VoiceMonkey API client
//!
//! Two outbound operations, both plain GETs with the upstream token injected
//! into the query string:
//! - `/trigger?token=..&device=..`
//! - `/announcement?token=..&device=..&text=..&language=..&voice=..`
//!
//! The token is re-read from disk on every call. No retries, no explicit
//! timeout, and the upstream status is returned as data rather than
//! interpreted.

use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;
use vmp_common::secret::{load_secret, UPSTREAM_TOKEN_LABEL};

pub const DEFAULT_VOICE: &str = "Camila";
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Upstream bodies are kept only up to this many characters
pub const MAX_UPSTREAM_BODY_CHARS: usize = 1000;

const USER_AGENT: &str = concat!("vmp-proxy/", env!("CARGO_PKG_VERSION"));

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped, so spaces
/// become `%20` rather than `+`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Upstream client errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Token file missing, empty or unreadable
    #[error(transparent)]
    Secret(#[from] vmp_common::Error),

    #[error("Invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport failure. The URL is stripped before wrapping since it
    /// carries the token.
    #[error("Upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl UpstreamError {
    fn transport(e: reqwest::Error) -> Self {
        Self::Transport(e.without_url())
    }
}

/// A no-text trigger of a device routine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCommand {
    pub device: String,
}

/// Text to be spoken on a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub device: String,
    pub text: String,
    /// Falls back to [`DEFAULT_LANGUAGE`] when absent or empty
    pub language: Option<String>,
    /// Falls back to [`DEFAULT_VOICE`] when absent or blank
    pub voice: Option<String>,
}

/// Outcome of one upstream call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResult {
    pub status: u16,
    /// First [`MAX_UPSTREAM_BODY_CHARS`] characters of the response body
    pub body: String,
}

/// Collapse whitespace runs to one space and trim the ends
pub fn sanitize_speak_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn resolve_voice(voice: Option<&str>) -> &str {
    match voice {
        Some(v) if !v.trim().is_empty() => v,
        _ => DEFAULT_VOICE,
    }
}

pub fn resolve_language(language: Option<&str>) -> &str {
    match language {
        Some(l) if !l.is_empty() => l,
        _ => DEFAULT_LANGUAGE,
    }
}

/// Percent-encode one query component the way browsers' `encodeURIComponent` does
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build the announcement query string, encoding each value individually
pub fn announcement_query(token: &str, announcement: &Announcement) -> String {
    let text = sanitize_speak_text(&announcement.text);
    let language = resolve_language(announcement.language.as_deref());
    let voice = resolve_voice(announcement.voice.as_deref());

    [
        ("token", token),
        ("device", announcement.device.as_str()),
        ("text", text.as_str()),
        ("language", language),
        ("voice", voice),
    ]
    .iter()
    .map(|(key, value)| format!("{}={}", key, encode_component(value)))
    .collect::<Vec<_>>()
    .join("&")
}

fn truncate_chars(body: &str, max: usize) -> String {
    body.chars().take(max).collect()
}

/// VoiceMonkey API client
///
/// Cheap to clone; the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct VoiceMonkeyClient {
    http_client: reqwest::Client,
    base_url: String,
    token_path: PathBuf,
}

impl VoiceMonkeyClient {
    /// Build a client for `base_url` that reads its token from `token_path`.
    ///
    /// Idle connections are not kept between requests.
    pub fn new(
        base_url: impl Into<String>,
        token_path: impl Into<PathBuf>,
    ) -> Result<Self, UpstreamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(UpstreamError::transport)?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_path: token_path.into(),
        })
    }

    /// GET `/trigger` for one device
    pub async fn trigger(&self, command: &DeviceCommand) -> Result<UpstreamResult, UpstreamError> {
        let token = load_secret(&self.token_path, UPSTREAM_TOKEN_LABEL).await?;

        let mut url = Url::parse(&format!("{}/trigger", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("token", &token)
            .append_pair("device", &command.device);

        let result = self.fetch(url).await?;
        info!(
            device = %command.device,
            upstream_status = result.status,
            "Trigger forwarded"
        );
        Ok(result)
    }

    /// GET `/announcement` with sanitized text and resolved language/voice
    pub async fn announce(
        &self,
        announcement: &Announcement,
    ) -> Result<UpstreamResult, UpstreamError> {
        let token = load_secret(&self.token_path, UPSTREAM_TOKEN_LABEL).await?;

        let query = announcement_query(&token, announcement);
        let url = Url::parse(&format!("{}/announcement?{}", self.base_url, query))?;

        let result = self.fetch(url).await?;
        info!(
            device = %announcement.device,
            language = resolve_language(announcement.language.as_deref()),
            voice = resolve_voice(announcement.voice.as_deref()),
            upstream_status = result.status,
            "Announcement forwarded"
        );
        Ok(result)
    }

    async fn fetch(&self, url: Url) -> Result<UpstreamResult, UpstreamError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::transport)?;

        let status = response.status().as_u16();
        // A body that fails to read counts as empty
        let body = response.text().await.unwrap_or_default();
        let body = truncate_chars(&body, MAX_UPSTREAM_BODY_CHARS);
        debug!(status, body = %body, "Upstream response");

        Ok(UpstreamResult { status, body })
    }
}
