//! Helpers to drive the whole app against a [MockBackend]

use std::sync::Arc;

use actix_http::Request;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::{test, App};

use crate::api::mock::MockBackend;
use crate::api::ApiMethod;
use crate::inflight::InFlight;
use crate::server::configure;
use crate::server::session::SESSION_COOKIE;
use crate::server::templates::load_templates;

pub(crate) fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(false)
        .build()
}

pub(crate) fn test_app(
    backend: &Arc<MockBackend>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let tera = load_templates().unwrap();

    App::new()
        .app_data(Data::new(tera))
        .app_data(Data::new(backend.client()))
        .app_data(Data::new(InFlight::default()))
        .wrap(session_middleware())
        .configure(configure)
}

pub(crate) fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers().get(LOCATION).unwrap().to_str().unwrap()
}

pub(crate) fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .unwrap()
        .into_owned()
}

/// Log `user_id` in and return the session cookie
pub(crate) async fn login<S>(app: &S, backend: &MockBackend, user_id: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    backend.respond(ApiMethod::Post, "/api/login", 200, "Login successful");

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("user_id", user_id), ("password", "hunter22")])
            .to_request(),
    )
    .await;
    assert_eq!(location(&res), "/profile");

    session_cookie(&res)
}

/// Fetch a page with `cookie` and return its status and body
pub(crate) async fn page_body<S, B>(app: &S, path: &str, cookie: Cookie<'static>) -> (StatusCode, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get().uri(path).cookie(cookie).to_request(),
    )
    .await;
    let status = res.status();
    let body = test::read_body(res).await;

    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Submit a form with `cookie`
pub(crate) async fn post_form<S>(
    app: &S,
    path: &str,
    fields: &[(&str, &str)],
    cookie: Cookie<'static>,
) -> ServiceResponse
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(
        app,
        test::TestRequest::post()
            .uri(path)
            .cookie(cookie)
            .set_form(fields)
            .to_request(),
    )
    .await
}
