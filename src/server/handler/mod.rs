//! This module holds the handler of cinelist
//!
//! Backend failures are never returned as errors from a handler, they are
//! reported as toasts. [PageError] only covers failures of this server.

use std::fmt::{Display, Formatter};

use actix_session::{SessionGetError, SessionInsertError};
use actix_web::body::BoxBody;
use actix_web::http::header::{ContentType, LOCATION};
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::{error, trace};
use serde::Serialize;
use tera::Tera;

pub use crate::server::handler::assets::*;
pub use crate::server::handler::auth::*;
pub use crate::server::handler::friends::*;
pub use crate::server::handler::lists::*;
pub use crate::server::handler::profile::*;
pub use crate::server::handler::search::*;
use crate::api::ClientError;
use crate::server::session::SessionContext;
use crate::views::{Toast, TOAST_SECONDS};

pub mod assets;
pub mod auth;
pub mod friends;
pub mod lists;
pub mod profile;
pub mod search;

/// The result that is used throughout the handlers.
pub type PageResult<T> = Result<T, PageError>;

/// Shown when the same action is submitted while it is still running
pub(crate) const DUPLICATE_SUBMISSION: &str = "Request already in progress";

/// This enum holds all possible error types that can occur in a handler
#[derive(Debug)]
pub enum PageError {
    /// No user is logged in
    Unauthenticated,
    /// The session could not be read
    SessionGet(SessionGetError),
    /// The session could not be written
    SessionInsert(SessionInsertError),
    /// A template could not be rendered
    Template(tera::Error),
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::Unauthenticated => write!(f, "User not logged in"),
            PageError::SessionGet(_) | PageError::SessionInsert(_) => {
                write!(f, "Session error occurred")
            }
            PageError::Template(_) => write!(f, "Internal server error"),
        }
    }
}

impl actix_web::ResponseError for PageError {
    fn status_code(&self) -> StatusCode {
        match self {
            PageError::Unauthenticated => StatusCode::FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            PageError::Unauthenticated => {
                trace!("Unauthenticated");

                redirect("/")
            }
            PageError::SessionGet(err) => {
                error!("Could not read session: {err}");

                HttpResponse::InternalServerError().body(self.to_string())
            }
            PageError::SessionInsert(err) => {
                error!("Could not write session: {err}");

                HttpResponse::InternalServerError().body(self.to_string())
            }
            PageError::Template(err) => {
                error!("Could not render template: {err:?}");

                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<SessionGetError> for PageError {
    fn from(value: SessionGetError) -> Self {
        Self::SessionGet(value)
    }
}

impl From<SessionInsertError> for PageError {
    fn from(value: SessionInsertError) -> Self {
        Self::SessionInsert(value)
    }
}

impl From<tera::Error> for PageError {
    fn from(value: tera::Error) -> Self {
        Self::Template(value)
    }
}

/// The parts every page shares
#[derive(Serialize)]
pub(crate) struct Layout {
    title: String,
    viewer: Option<String>,
    toasts: Vec<Toast>,
    toast_seconds: u32,
}

impl Layout {
    /// Build the layout and take the queued toasts out of the session
    pub(crate) fn new(session: &SessionContext, title: impl Into<String>) -> PageResult<Self> {
        Ok(Self {
            title: title.into(),
            viewer: session.user_id()?,
            toasts: session.take_toasts()?,
            toast_seconds: TOAST_SECONDS,
        })
    }

    /// Report a failed backend call on this page
    pub(crate) fn report(&mut self, err: &ClientError, fallback: &str) {
        self.toasts.push(Toast::error(err.user_message(fallback)));
    }
}

/// Render `template` with `page` as context
pub(crate) fn render<T: Serialize>(tera: &Tera, template: &str, page: &T) -> PageResult<HttpResponse> {
    let ctx = tera::Context::from_serialize(page)?;
    let body = tera.render(template, &ctx)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

/// Send the browser to `location`
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}

/// Use `requested` as redirect target if it stays on this server
pub(crate) fn return_path<'a>(requested: Option<&'a str>, fallback: &'a str) -> &'a str {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => fallback,
    }
}
