//! Session helpers to keep the handlers free of raw session access.
//!
//! The session holds the id of the logged-in user and the toasts that are
//! waiting to be shown.

use actix_session::Session;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::server::handler::{PageError, PageResult};
use crate::views::Toast;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "cinelist";

pub(crate) const USER_ID_KEY: &str = "userId";
const TOASTS_KEY: &str = "toasts";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` as the logged-in user
    pub fn persist_user(&self, user_id: &str) -> PageResult<()> {
        self.0.renew();
        self.0.insert(USER_ID_KEY, user_id)?;
        Ok(())
    }

    /// The logged-in user, if any
    pub fn user_id(&self) -> PageResult<Option<String>> {
        Ok(self.0.get::<String>(USER_ID_KEY)?)
    }

    /// The logged-in user or [PageError::Unauthenticated]
    pub fn require_user_id(&self) -> PageResult<String> {
        self.user_id()?.ok_or(PageError::Unauthenticated)
    }

    /// Forget the user and everything else stored in the session
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// Queue a toast for the next rendered page
    pub fn push_toast(&self, toast: Toast) -> PageResult<()> {
        let mut toasts = self.0.get::<Vec<Toast>>(TOASTS_KEY)?.unwrap_or_default();
        toasts.push(toast);
        self.0.insert(TOASTS_KEY, toasts)?;
        Ok(())
    }

    /// Take all queued toasts
    pub fn take_toasts(&self) -> PageResult<Vec<Toast>> {
        let toasts = self.0.get::<Vec<Toast>>(TOASTS_KEY)?.unwrap_or_default();
        if !toasts.is_empty() {
            self.0.remove(TOASTS_KEY);
        }
        Ok(toasts)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
