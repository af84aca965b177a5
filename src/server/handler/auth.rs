//! This module holds all endpoints regarding authentication

use actix_web::web::{Data, Form};
use actix_web::{get, post, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::api::{ApiClient, ClientError};
use crate::server::handler::{redirect, render, Layout, PageResult};
use crate::server::session::SessionContext;
use crate::views::Toast;

#[derive(Serialize)]
struct AuthPage {
    #[serde(flatten)]
    layout: Layout,
}

/// The login page
#[get("/")]
pub async fn login_page(tera: Data<Tera>, session: SessionContext) -> PageResult<HttpResponse> {
    let layout = Layout::new(&session, "Login")?;
    render(&tera, "login.html", &AuthPage { layout })
}

/// The request data of a login request
#[derive(Deserialize)]
pub struct LoginForm {
    user_id: String,
    password: String,
}

/// Login to cinelist
///
/// On success the user id is stored in the session.
#[post("/login")]
pub async fn login(
    form: Form<LoginForm>,
    client: Data<ApiClient>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    info!("Logging in with userId: {}", form.user_id);

    match client.login(&form.user_id, &form.password).await {
        Ok(()) => {
            session.persist_user(&form.user_id)?;
            Ok(redirect("/profile"))
        }
        Err(ClientError::Rejected { .. }) => {
            session.push_toast(Toast::error("Invalid user ID or password"))?;
            Ok(redirect("/"))
        }
        Err(_) => {
            session.push_toast(Toast::error("Failed to login"))?;
            Ok(redirect("/"))
        }
    }
}

/// The registration page
#[get("/register")]
pub async fn register_page(tera: Data<Tera>, session: SessionContext) -> PageResult<HttpResponse> {
    let layout = Layout::new(&session, "Register")?;
    render(&tera, "register.html", &AuthPage { layout })
}

/// The content to register a new account
#[derive(Deserialize)]
pub struct RegisterForm {
    user_id: String,
    email: String,
    password: String,
}

/// Register a new account
#[post("/register")]
pub async fn register(
    form: Form<RegisterForm>,
    client: Data<ApiClient>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    info!(
        "Registering with userId: {}, email: {}",
        form.user_id, form.email
    );

    match client
        .register(&form.user_id, &form.email, &form.password)
        .await
    {
        Ok(()) => {
            session.push_toast(Toast::success("User registered successfully"))?;
            Ok(redirect("/"))
        }
        Err(err @ ClientError::Rejected { .. }) => {
            session.push_toast(Toast::error(
                err.user_message("User already exists or invalid input"),
            ))?;
            Ok(redirect("/register"))
        }
        Err(_) => {
            session.push_toast(Toast::error("Failed to register"))?;
            Ok(redirect("/register"))
        }
    }
}

/// Sign out of this session
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    redirect("/")
}
