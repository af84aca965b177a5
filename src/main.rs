//! # cinelist
//!
//! cinelist is the web frontend of a movie tracking service. Users keep a
//! watchlist and a watched list, search movies and befriend other users.
//! All data lives in the backend, this server renders pages for it.
#![warn(missing_docs)]

use std::fs::read_to_string;
use std::path::Path;
use std::sync::Arc;

use actix_toolbox::logging::setup_logging;
use actix_web::cookie::Key;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use log::{error, info};
use reqwest::Url;

use crate::api::{ApiClient, HttpTransport};
use crate::config::Config;
use crate::server::start_server;

pub mod api;
pub mod config;
pub mod genre;
pub mod inflight;
pub mod models;
pub mod server;
pub mod views;

/// The possible commands for cinelist
#[derive(Subcommand)]
pub enum Command {
    /// Start the server
    Start,
    /// Generate a new key to sign the session cookies
    GenKey,
}

/// The cli parser for cinelist
#[derive(Parser)]
#[clap(version, about = "A movie list frontend")]
pub struct Cli {
    #[clap(long = "config-path")]
    #[clap(help = "Specify an alternative path to the config file")]
    #[clap(default_value_t = String::from("/etc/cinelist/config.toml"))]
    config_path: String,

    #[clap(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Start => {
            let conf = get_conf(&cli.config_path)?;

            setup_logging(&conf.logging)?;

            let client = get_client(&conf)?;
            info!("Using backend at {}", conf.backend.base_url);

            if let Err(err) = start_server(&conf, client).await {
                error!("Error while starting server: {err}");
                return Err(err.to_string());
            }
        }
        Command::GenKey => {
            println!("{}", BASE64_STANDARD.encode(Key::generate().master()));
        }
    }

    Ok(())
}

/// Retrieve a [Config] by Path
///
/// **Parameter**:
/// - `config_path`: [&str]
fn get_conf(config_path: &str) -> Result<Config, String> {
    let path = Path::new(config_path);

    if !path.exists() {
        return Err(format!("File {config_path} does not exist"));
    }

    if !path.is_file() {
        return Err(format!("{config_path} is a directory"));
    }

    let config_str =
        read_to_string(path).map_err(|err| format!("Could not read config file: {err}"))?;

    let config: Config =
        toml::from_str(&config_str).map_err(|err| format!("Could not parse config file: {err}"))?;

    Ok(config)
}

/// Build the backend client from the config.
///
/// The base url always ends with a slash so api paths are joined below it.
fn get_client(config: &Config) -> Result<ApiClient, String> {
    let mut base_url = config.backend.base_url.clone();
    if !base_url.ends_with('/') {
        base_url.push('/');
    }

    let base_url = Url::parse(&base_url).map_err(|err| format!("Invalid backend url: {err}"))?;
    let transport = HttpTransport::new(base_url)
        .map_err(|err| format!("Could not create http client: {err}"))?;

    Ok(ApiClient::new(Arc::new(transport)))
}
