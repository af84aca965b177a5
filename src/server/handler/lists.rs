//! The watchlist and watched pages and all actions on movies

use actix_web::web::{Data, Form, Query};
use actix_web::{get, post, HttpResponse};
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::api::ApiClient;
use crate::inflight::{ActionKey, InFlight};
use crate::models::ListName;
use crate::server::handler::{
    redirect, render, return_path, Layout, PageResult, DUPLICATE_SUBMISSION,
};
use crate::server::middleware::AuthenticationRequired;
use crate::server::session::SessionContext;
use crate::views::{friend_watched_href, render_movies, ListContext, MovieView, Toast};

#[derive(Serialize)]
struct ListPage {
    #[serde(flatten)]
    layout: Layout,
    heading: String,
    list_id: &'static str,
    movies: Vec<MovieView>,
    return_to: String,
}

async fn list_page(
    tera: &Tera,
    client: &ApiClient,
    session: &SessionContext,
    owner: Option<&str>,
    list: ListName,
) -> PageResult<HttpResponse> {
    let user_id = session.require_user_id()?;

    let base_heading = match list {
        ListName::Watchlist => "Watchlist",
        ListName::Watched => "Watched Movies",
    };
    let (heading, context, return_to) = match owner {
        Some(friend_id) => (
            format!("{base_heading} - {friend_id}"),
            ListContext::FriendWatched,
            friend_watched_href(friend_id),
        ),
        None => (
            base_heading.to_string(),
            list_context(list),
            format!("/{list}"),
        ),
    };

    let mut layout = Layout::new(session, heading.clone())?;

    let movies = match client.list(owner.unwrap_or(&user_id), list).await {
        Ok(movies) => render_movies(&movies, context),
        Err(err) => {
            let fallback = match owner {
                Some(friend_id) => format!("Failed to load {friend_id}'s {list} list"),
                None => format!("Failed to load list {list}"),
            };
            layout.report(&err, &fallback);
            Vec::new()
        }
    };

    render(
        tera,
        "list.html",
        &ListPage {
            layout,
            heading,
            list_id: list.as_str(),
            movies,
            return_to,
        },
    )
}

fn list_context(list: ListName) -> ListContext {
    match list {
        ListName::Watchlist => ListContext::Watchlist,
        ListName::Watched => ListContext::Watched,
    }
}

/// The watchlist of the user
#[get("/watchlist", wrap = "AuthenticationRequired")]
pub async fn watchlist(
    tera: Data<Tera>,
    client: Data<ApiClient>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    list_page(&tera, &client, &session, None, ListName::Watchlist).await
}

/// The query of the watched page
#[derive(Deserialize)]
pub struct WatchedQuery {
    #[serde(rename = "friendId")]
    friend_id: Option<String>,
}

/// The watched list of the user or, with `friendId`, of a friend
#[get("/watched", wrap = "AuthenticationRequired")]
pub async fn watched(
    query: Query<WatchedQuery>,
    tera: Data<Tera>,
    client: Data<ApiClient>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let owner = query.friend_id.as_deref().filter(|id| !id.is_empty());
    list_page(&tera, &client, &session, owner, ListName::Watched).await
}

/// The request to delete a movie from a list
#[derive(Deserialize)]
pub struct DeleteMovieForm {
    movie_id: String,
    list: ListName,
}

/// Delete a movie from one of the lists of the user
#[post("/actions/movies/delete", wrap = "AuthenticationRequired")]
pub async fn delete_movie(
    form: Form<DeleteMovieForm>,
    client: Data<ApiClient>,
    in_flight: Data<InFlight>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let subject = format!("{}/{}", form.list, form.movie_id);

    let toast = match in_flight.try_start(ActionKey::new(&user_id, "delete-movie", &subject)) {
        None => Toast::error(DUPLICATE_SUBMISSION),
        Some(_ticket) => match client
            .delete_movie(&user_id, &form.movie_id, form.list)
            .await
        {
            Ok(()) => Toast::success("Deleted movie successfully"),
            Err(_) => Toast::error("Failed to delete movie"),
        },
    };
    session.push_toast(toast)?;

    Ok(redirect(&format!("/{}", form.list)))
}

/// The request to move a movie to the watched list
#[derive(Deserialize)]
pub struct MoveMovieForm {
    movie_id: String,
}

/// Move a movie from the watchlist to the watched list
#[post("/actions/movies/move", wrap = "AuthenticationRequired")]
pub async fn move_to_watched(
    form: Form<MoveMovieForm>,
    client: Data<ApiClient>,
    in_flight: Data<InFlight>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let user_id = session.require_user_id()?;

    let toast = match in_flight.try_start(ActionKey::new(&user_id, "move-movie", &form.movie_id)) {
        None => Toast::error(DUPLICATE_SUBMISSION),
        Some(_ticket) => match client.move_to_watched(&user_id, &form.movie_id).await {
            Ok(()) => Toast::success("Movie moved to Watched list"),
            Err(err) => Toast::error(err.user_message("Failed to move movie to watched list")),
        },
    };
    session.push_toast(toast)?;

    Ok(redirect("/watchlist"))
}

/// The request to add a movie to a list
#[derive(Deserialize)]
pub struct AddMovieForm {
    movie_id: String,
    list: ListName,
    return_to: Option<String>,
}

/// Add a movie to one of the lists of the user
#[post("/actions/movies/add", wrap = "AuthenticationRequired")]
pub async fn add_movie(
    form: Form<AddMovieForm>,
    client: Data<ApiClient>,
    in_flight: Data<InFlight>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let subject = format!("{}/{}", form.list, form.movie_id);

    let toast = match in_flight.try_start(ActionKey::new(&user_id, "add-movie", &subject)) {
        None => Toast::error(DUPLICATE_SUBMISSION),
        Some(_ticket) => match client.add_movie(&user_id, &form.movie_id, form.list).await {
            Ok(()) => Toast::success(format!("Movie added to {}", form.list)),
            Err(err) => Toast::error(
                err.user_message(&format!("Failed to add movie to {}", form.list)),
            ),
        },
    };
    session.push_toast(toast)?;

    Ok(redirect(return_path(form.return_to.as_deref(), "/search")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use crate::api::mock::MockBackend;
    use crate::api::ApiMethod;
    use crate::server::testing::{location, login, page_body, post_form, test_app};

    const WATCHED: &str = r#"[
        {"id":"1","title":"Alien","release_date":"1979-05-25","genre_ids":"27,878"},
        {"id":2,"title":"Heat","release_date":"1995-12-15","genre_ids":[80,18]}
    ]"#;

    #[actix_web::test]
    async fn watched_page_renders_every_movie() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Get, "/api/listwatched", 200, WATCHED);
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let (status, body) = page_body(&app, "/watched", cookie).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches(r#"class="movie""#).count(), 2);
        assert!(body.contains(r#"id="movie-watched-1""#));
        assert!(body.contains(r#"id="movie-watched-2""#));
        assert!(body.contains("Genres: Crime, Drama"));
        assert!(body.contains("Delete"));
        assert!(!body.contains("Move to Watched"));
    }

    #[actix_web::test]
    async fn odd_genre_shapes_keep_the_list() {
        let backend = MockBackend::new();
        backend.respond(
            ApiMethod::Get,
            "/api/listwatched",
            200,
            r#"[
                {"id":"1","title":"Alien","genre_ids":["27","878"]},
                {"id":"2","title":"Heat","genre_ids":{"main":80}}
            ]"#,
        );
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let (_, body) = page_body(&app, "/watched", cookie).await;

        assert_eq!(body.matches(r#"class="movie""#).count(), 2);
        assert!(body.contains("Genres: Horror, Science Fiction"));
        assert!(body.contains("Release Date: Unknown, Genres: Unknown"));
        assert!(!body.contains("Failed to load list watched"));
    }

    #[actix_web::test]
    async fn friend_watched_list_is_read_only() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Get, "/api/listwatched", 200, WATCHED);
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let (_, body) = page_body(&app, "/watched?friendId=bob", cookie).await;

        assert!(body.contains("Watched Movies - bob"));
        assert!(body.contains(r#"id="movie-friend-watched-1""#));
        assert!(!body.contains("Delete"));
        let call = backend.calls_to("/api/listwatched").pop().unwrap();
        assert_eq!(call.query, vec![("userId".to_string(), "bob".to_string())]);
    }

    #[actix_web::test]
    async fn watchlist_offers_move() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Get, "/api/listwatchlist", 200, WATCHED);
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let (_, body) = page_body(&app, "/watchlist", cookie).await;

        assert_eq!(body.matches("Move to Watched").count(), 2);
        assert_eq!(body.matches(">Delete<").count(), 2);
    }

    #[actix_web::test]
    async fn delete_issues_one_call() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Delete, "/api/deleteMovie", 200, "Movie deleted");
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let res = post_form(
            &app,
            "/actions/movies/delete",
            &[("movie_id", "1"), ("list", "watched")],
            cookie,
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/watched");
        let calls = backend.calls_to("/api/deleteMovie");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, ApiMethod::Delete);
        assert_eq!(
            calls[0].body,
            Some(json!({"userId": "alice", "movieId": "1", "listName": "watched"}))
        );
    }

    #[actix_web::test]
    async fn failed_delete_keeps_the_movie() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Delete, "/api/deleteMovie", 500, "");
        backend.respond(ApiMethod::Get, "/api/listwatched", 200, WATCHED);
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let res = post_form(
            &app,
            "/actions/movies/delete",
            &[("movie_id", "1"), ("list", "watched")],
            cookie,
        )
        .await;
        let cookie = crate::server::testing::session_cookie(&res);

        let (_, body) = page_body(&app, "/watched", cookie).await;
        assert!(body.contains("Failed to delete movie"));
        assert!(body.contains(r#"id="movie-watched-1""#));
    }

    #[actix_web::test]
    async fn move_reloads_watchlist() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Post, "/api/moveToWatched", 200, "");
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let res = post_form(&app, "/actions/movies/move", &[("movie_id", "2")], cookie).await;

        assert_eq!(location(&res), "/watchlist");
        assert_eq!(backend.calls_to("/api/moveToWatched").len(), 1);
    }

    #[actix_web::test]
    async fn add_returns_to_search() {
        let backend = MockBackend::new();
        backend.respond(
            ApiMethod::Post,
            "/api/addMovie",
            500,
            "Failed to add movie",
        );
        backend.respond(ApiMethod::Get, "/api/searchMovies", 200, "[]");
        let app = test::init_service(test_app(&backend)).await;
        let cookie = login(&app, &backend, "alice").await;

        let res = post_form(
            &app,
            "/actions/movies/add",
            &[
                ("movie_id", "2"),
                ("list", "watchlist"),
                ("return_to", "/search?type=movies&query=heat"),
            ],
            cookie,
        )
        .await;

        assert_eq!(location(&res), "/search?type=movies&query=heat");
        let cookie = crate::server::testing::session_cookie(&res);
        let (_, body) = page_body(&app, "/search?type=movies&query=heat", cookie).await;
        assert!(body.contains("Failed to add movie to watchlist: Failed to add movie"));
        assert_eq!(
            backend.calls_to("/api/addMovie")[0].body,
            Some(json!({"userId": "alice", "movieId": "2", "listName": "watchlist"}))
        );
    }
}
