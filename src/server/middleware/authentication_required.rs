use std::future::{ready, Ready};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use futures::future::LocalBoxFuture;
use log::trace;

use crate::server::handler::{redirect, PageError};
use crate::server::session::SessionContext;
use crate::views::Toast;

/// Sends requests without a logged-in user back to the login page
pub(crate) struct AuthenticationRequired;

impl<S, B> Transform<S, ServiceRequest> for AuthenticationRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Transform = AuthenticationRequiredMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationRequiredMiddleware { service }))
    }
}

pub(crate) struct AuthenticationRequiredMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticationRequiredMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = SessionContext::new(req.get_session());

        let logged_in = match session.user_id() {
            Ok(user_id) => user_id.is_some(),
            Err(err) => {
                let res: Result<Self::Response, Self::Error> = Err(err.into());
                return Box::pin(ready(res));
            }
        };

        if !logged_in {
            trace!("No user for {}", req.path());
            let res: Result<Self::Response, Self::Error> = session
                .push_toast(Toast::error(PageError::Unauthenticated.to_string()))
                .map(|_| req.into_response(redirect("/")).map_into_right_body())
                .map_err(Into::into);
            return Box::pin(ready(res));
        }

        let next = self.service.call(req);
        Box::pin(async move { next.await.map(ServiceResponse::map_into_left_body) })
    }
}
