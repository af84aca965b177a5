//! This module holds the server definition

use std::net::SocketAddr;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_toolbox::tb_middleware::{setup_logging_mw, LoggingMiddlewareConfig};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use actix_web::middleware::Compress;
use actix_web::web::{Data, ServiceConfig};
use actix_web::{App, HttpServer};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use log::info;

use crate::api::ApiClient;
use crate::config::Config;
use crate::inflight::InFlight;
use crate::server::error::StartServerError;
use crate::server::handler::{
    add_movie, delete_movie, friend_action, login, login_page, logout, move_to_watched,
    profile_page, register, register_page, search_page, stylesheet, watched, watchlist,
};
use crate::server::session::SESSION_COOKIE;
use crate::server::templates::load_templates;

pub mod error;
pub mod handler;
pub mod middleware;
pub mod session;
pub mod templates;
#[cfg(test)]
pub(crate) mod testing;

/// Start the cinelist server
///
/// **Parameter**:
/// - `config`: Reference to a [Config] struct
/// - `client`: [ApiClient] : The client of the movie backend
pub async fn start_server(config: &Config, client: ApiClient) -> Result<(), StartServerError> {
    let key = session_key(&config.server.session_key)?;
    let tera = Data::new(load_templates()?);
    let client = Data::new(client);
    let in_flight = Data::new(InFlight::default());

    let secure_cookies = config.server.secure_cookies;
    let session_ttl = Duration::days(config.server.session_ttl_days);

    let s_addr = SocketAddr::new(config.server.listen_address, config.server.listen_port);

    info!("Starting to listen on {}", s_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(tera.clone())
            .app_data(client.clone())
            .app_data(in_flight.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_name(SESSION_COOKIE.to_string())
                    .cookie_secure(secure_cookies)
                    .cookie_http_only(true)
                    .cookie_same_site(SameSite::Lax)
                    .cookie_content_security(CookieContentSecurity::Signed)
                    .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
                    .build(),
            )
            .wrap(setup_logging_mw(LoggingMiddlewareConfig::default()))
            .wrap(Compress::default())
            .configure(configure)
    })
    .bind(s_addr)?
    .run()
    .await?;

    Ok(())
}

/// Register all routes.
///
/// Everything but the login and registration pages needs a logged-in user,
/// those handlers are wrapped in `AuthenticationRequired` one by one.
pub(crate) fn configure(cfg: &mut ServiceConfig) {
    cfg.service(stylesheet)
        .service(login_page)
        .service(login)
        .service(register_page)
        .service(register)
        .service(logout)
        .service(profile_page)
        .service(watchlist)
        .service(watched)
        .service(search_page)
        .service(delete_movie)
        .service(move_to_watched)
        .service(add_movie)
        .service(friend_action);
}

fn session_key(encoded: &str) -> Result<Key, StartServerError> {
    let raw = BASE64_STANDARD
        .decode(encoded)
        .map_err(|err| StartServerError::InvalidSessionKey(err.to_string()))?;

    Key::try_from(raw.as_slice()).map_err(|err| StartServerError::InvalidSessionKey(err.to_string()))
}
