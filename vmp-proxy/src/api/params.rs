//! Parameter extraction
//!
//! Parameters come from the query string first. For POST requests the JSON
//! body fills in whatever the query string left unset. Empty values count as
//! absent in both sources.

use axum::body::Body;
use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ProxyError;

/// Inbound POST bodies are read up to this size
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Parsed query string, preserving order and duplicates
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Self(pairs)
    }

    /// First value for `key`, if it is non-empty
    pub fn get(&self, key: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    }
}

/// Every parameter the relay routes accept
///
/// Doubles as the JSON body schema; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommandParams {
    pub device: Option<String>,
    pub text: Option<String>,
    pub language: Option<String>,
    pub voice: Option<String>,
}

impl CommandParams {
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            device: query.get("device"),
            text: query.get("text"),
            language: query.get("language"),
            voice: query.get("voice"),
        }
    }

    /// Fill each unset field from `fallback`
    pub fn or(self, fallback: CommandParams) -> Self {
        Self {
            device: self.device.or(fallback.device),
            text: self.text.or(fallback.text),
            language: self.language.or(fallback.language),
            voice: self.voice.or(fallback.voice),
        }
    }

    fn drop_empty(self) -> Self {
        let keep = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            device: keep(self.device),
            text: keep(self.text),
            language: keep(self.language),
            voice: keep(self.voice),
        }
    }
}

/// Read and decode a JSON command body.
///
/// An empty body or a JSON `null` yields no parameters. Anything that is not
/// an object matching [`CommandParams`] is a [`ProxyError::MalformedBody`].
pub async fn read_command_body(body: Body) -> Result<CommandParams, ProxyError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(ProxyError::BodyRead)?;

    if bytes.is_empty() {
        return Ok(CommandParams::default());
    }

    // Derived struct decoding also accepts arrays; only objects are commands
    let params = match serde_json::from_slice::<Value>(&bytes)? {
        Value::Null => CommandParams::default(),
        object @ Value::Object(_) => serde_json::from_value(object)?,
        _ => return Err(serde_json::Error::custom("expected a JSON object").into()),
    };
    Ok(params.drop_empty())
}
