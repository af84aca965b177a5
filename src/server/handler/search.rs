//! Movie and user search

use actix_web::web::{Data, Query};
use actix_web::{get, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::api::ApiClient;
use crate::models::MovieSource;
use crate::server::handler::{render, Layout, PageResult};
use crate::server::middleware::AuthenticationRequired;
use crate::server::session::SessionContext;
use crate::views::{render_movies, search_results, ListContext, MovieView, RelationshipIndex, UserView};

/// What is searched
#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum SearchMode {
    Movies,
    Users,
}

/// The query of the search page
#[derive(Deserialize)]
pub struct SearchQuery {
    /// `users` searches users, everything else movies
    #[serde(rename = "type")]
    kind: Option<String>,
    query: Option<String>,
    source: Option<MovieSource>,
}

#[derive(Serialize)]
struct SearchPage {
    #[serde(flatten)]
    layout: Layout,
    mode: SearchMode,
    heading: &'static str,
    query: String,
    source: MovieSource,
    movies: Vec<MovieView>,
    users: Vec<UserView>,
    return_to: String,
}

/// Search movies or users.
///
/// Every search is a plain GET so results can be linked to.
#[get("/search", wrap = "AuthenticationRequired")]
pub async fn search_page(
    req: HttpRequest,
    query: Query<SearchQuery>,
    tera: Data<Tera>,
    client: Data<ApiClient>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let viewer = session.require_user_id()?;
    let query = query.into_inner();

    let mode = match query.kind.as_deref() {
        Some("users") => SearchMode::Users,
        _ => SearchMode::Movies,
    };
    let heading = match mode {
        SearchMode::Users => "Search Users",
        SearchMode::Movies => "Search Movies",
    };
    let source = query.source.unwrap_or_default();
    let text = query.query.unwrap_or_default().trim().to_string();

    let mut layout = Layout::new(&session, heading)?;
    let mut movies = Vec::new();
    let mut users = Vec::new();

    if !text.is_empty() {
        match mode {
            SearchMode::Movies => match client.search_movies(&text, source).await {
                Ok(found) => movies = render_movies(&found, ListContext::Search),
                Err(err) => layout.report(&err, "Failed to search movies"),
            },
            SearchMode::Users => match client.search_users(&text).await {
                Ok(found) => {
                    let (requests, friends) = futures::join!(
                        client.list_friend_requests(&viewer),
                        client.list_friends(&viewer),
                    );
                    let requests = requests.unwrap_or_else(|err| {
                        layout.report(&err, "Failed to load friend requests");
                        Vec::new()
                    });
                    let friends = friends.unwrap_or_else(|err| {
                        layout.report(&err, "Failed to load friends");
                        Vec::new()
                    });

                    let index = RelationshipIndex::new(&viewer, &requests, &friends);
                    users = search_results(&viewer, &found, &index);
                }
                Err(err) => layout.report(&err, "Failed to search users"),
            },
        }
    }

    let return_to = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/search".to_string());

    render(
        &tera,
        "search.html",
        &SearchPage {
            layout,
            mode,
            heading,
            query: text,
            source,
            movies,
            users,
            return_to,
        },
    )
}
