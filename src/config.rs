//! This module holds the configuration for the server

use std::net::IpAddr;

use actix_toolbox::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Configuration regarding the server
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConfig {
    /// The address the server should bind to
    pub listen_address: IpAddr,
    /// The port the server should bind to
    pub listen_port: u16,
    /// Base64 encoded key to sign the session cookie, at least 64 bytes
    pub session_key: String,
    /// Only send the session cookie over https
    #[serde(default)]
    pub secure_cookies: bool,
    /// Lifetime of a session in days
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
}

fn default_session_ttl_days() -> i64 {
    30
}

/// Configuration regarding the movie backend
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct BackendConfig {
    /// Url of the backend, the api lives below `/api`
    pub base_url: String,
}

/// This struct can be parsed from the configuration file
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Configuration regarding the server
    pub server: ServerConfig,
    /// Configuration regarding the backend
    pub backend: BackendConfig,
    /// The logging configuration
    pub logging: LoggingConfig,
}
