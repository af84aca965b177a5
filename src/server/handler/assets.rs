//! Static file serving

use actix_web::{get, HttpResponse};

#[get("/static/style.css")]
pub async fn stylesheet() -> HttpResponse {
    let b = include_str!("../../../static/style.css");

    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(b)
}
