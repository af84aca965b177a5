//! The profile page with the friend requests and friends of the user

use actix_web::web::Data;
use actix_web::{get, HttpResponse};
use serde::Serialize;
use tera::Tera;

use crate::api::ApiClient;
use crate::models::UserProfile;
use crate::server::handler::{render, Layout, PageResult};
use crate::server::middleware::AuthenticationRequired;
use crate::server::session::SessionContext;
use crate::views::{friend_list, request_list, UserView};

#[derive(Serialize)]
struct ProfilePage {
    #[serde(flatten)]
    layout: Layout,
    profile: Option<UserProfile>,
    requests: Vec<UserView>,
    friends: Vec<UserView>,
    return_to: &'static str,
}

/// Show the profile, the pending requests and the friends of the user.
///
/// The three parts are loaded concurrently, each one can fail on its own.
#[get("/profile", wrap = "AuthenticationRequired")]
pub async fn profile_page(
    tera: Data<Tera>,
    client: Data<ApiClient>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let mut layout = Layout::new(&session, "Profile")?;

    let (profile, requests, friends) = futures::join!(
        client.user_profile(&user_id),
        client.list_friend_requests(&user_id),
        client.list_friends(&user_id),
    );

    let profile = profile
        .map_err(|err| layout.report(&err, "Failed to load profile information"))
        .ok();
    let requests = requests
        .map(|requests| request_list(&user_id, &requests))
        .unwrap_or_else(|err| {
            layout.report(&err, "Failed to load friend requests");
            Vec::new()
        });
    let friends = friends
        .map(|friends| friend_list(&friends))
        .unwrap_or_else(|err| {
            layout.report(&err, "Failed to load friends");
            Vec::new()
        });

    render(
        &tera,
        "profile.html",
        &ProfilePage {
            layout,
            profile,
            requests,
            friends,
            return_to: "/profile",
        },
    )
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;

    use crate::api::mock::MockBackend;
    use crate::api::ApiMethod;
    use crate::server::testing::{login, page_body, test_app};

    #[actix_web::test]
    async fn renders_requests_and_friends() {
        let backend = MockBackend::new();
        backend.respond(
            ApiMethod::Get,
            "/api/userProfile",
            200,
            r#"{"userId":"alice","email":"alice@example.com"}"#,
        );
        backend.respond(
            ApiMethod::Get,
            "/api/listFriendRequests",
            200,
            r#"[
                {"requester_id":"alice","requestee_id":"bob","status":"pending"},
                {"requester_id":"carol","requestee_id":"alice","status":"pending"}
            ]"#,
        );
        backend.respond(
            ApiMethod::Get,
            "/api/listFriends",
            200,
            r#"[{"friendId":"dave"}]"#,
        );
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let (status, body) = page_body(&app, "/profile", cookie).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Email: alice@example.com"));
        assert!(body.contains(r#"id="user-requests-bob""#));
        assert!(body.contains(r#"id="user-requests-carol""#));
        assert!(body.contains(r#"id="user-friends-dave""#));
        assert!(body.contains("Remove Request"));
        assert!(body.contains("Accept"));
        assert!(body.contains("See Watched List"));
    }

    #[actix_web::test]
    async fn failures_are_isolated() {
        let backend = MockBackend::new();
        backend.fail(ApiMethod::Get, "/api/userProfile");
        backend.respond(ApiMethod::Get, "/api/listFriendRequests", 500, "");
        backend.respond(
            ApiMethod::Get,
            "/api/listFriends",
            200,
            r#"[{"friendId":"dave"}]"#,
        );
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let (status, body) = page_body(&app, "/profile", cookie).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Failed to load profile information"));
        assert!(body.contains("Failed to load friend requests"));
        assert!(body.contains(r#"id="user-friends-dave""#));
    }
}
