//! Relay endpoints: `/trigger` and `/announce`
//!
//! Both run behind [`super::require_proxy_key`]. The JSON body is only read
//! for POST requests, and only when the query string left a required
//! parameter unset.

use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::Response,
};
use serde::Serialize;

use super::json_reply;
use super::params::{read_command_body, CommandParams, QueryParams};
use crate::error::{MissingParameter, ProxyError};
use crate::upstream::{Announcement, DeviceCommand};
use crate::AppState;

/// `{ ok: true, device, upstreamStatus }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub ok: bool,
    pub device: String,
    pub upstream_status: u16,
}

/// /trigger (any method)
pub async fn trigger(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, ProxyError> {
    let query = QueryParams::parse(uri.query());

    let mut device = query.get("device");
    if device.is_none() && method == Method::POST {
        device = read_command_body(body).await?.device;
    }

    let command = DeviceCommand {
        device: device.ok_or(MissingParameter::Device)?,
    };
    let result = state.upstream.trigger(&command).await?;

    Ok(json_reply(
        StatusCode::OK,
        &CommandResponse {
            ok: true,
            device: command.device,
            upstream_status: result.status,
        },
    ))
}

/// /announce (any method)
pub async fn announce(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Result<Response, ProxyError> {
    let mut params = CommandParams::from_query(&QueryParams::parse(uri.query()));

    if method == Method::POST && (params.device.is_none() || params.text.is_none()) {
        params = params.or(read_command_body(body).await?);
    }

    let device = params.device.ok_or(MissingParameter::Device)?;
    let text = params.text.ok_or(MissingParameter::Text)?;

    let announcement = Announcement {
        device,
        text,
        language: params.language,
        voice: params.voice,
    };
    let result = state.upstream.announce(&announcement).await?;

    Ok(json_reply(
        StatusCode::OK,
        &CommandResponse {
            ok: true,
            device: announcement.device,
            upstream_status: result.status,
        },
    ))
}
