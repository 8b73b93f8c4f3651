#![cfg_attr(feature = "strict", deny(warnings))]

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

pub mod dto;
pub mod endpoint;
pub mod extractor;
pub mod metrics;
pub mod router;
mod middleware;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub database_url: String,
    pub server_ip: Option<IpAddr>,
    pub server_port: Option<u16>,
    pub trace_json: Option<bool>,
    pub trace_level: Option<String>,
    // when set to true replaces the description of `server_error` responses
    pub hide_error_response_cause: bool,
    /// whether the prometheus endpoint is available
    pub enable_metrics: bool,
    /// whether the openapi document is served
    pub enable_open_api: bool,
}
