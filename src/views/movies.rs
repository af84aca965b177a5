//! View state for movie lists

use serde::Serialize;

use crate::genre::genre_names;
use crate::models::{ListName, Movie};

/// The list a movie is rendered in.
///
/// It alone decides which actions are offered.
#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ListContext {
    /// The watchlist of the viewer
    Watchlist,
    /// The watched list of the viewer
    Watched,
    /// Results of a movie search
    Search,
    /// The watched list of a friend, read-only
    FriendWatched,
}

impl ListContext {
    /// Prefix of the element ids
    pub fn as_str(&self) -> &'static str {
        match self {
            ListContext::Watchlist => "watchlist",
            ListContext::Watched => "watched",
            ListContext::Search => "search",
            ListContext::FriendWatched => "friend-watched",
        }
    }

    /// The actions offered on every movie of this list
    pub fn actions(&self) -> &'static [MovieAction] {
        match self {
            ListContext::Watched => &[MovieAction::Delete],
            ListContext::Watchlist => &[MovieAction::Delete, MovieAction::MoveToWatched],
            ListContext::Search => &[MovieAction::AddToWatchlist, MovieAction::AddToWatched],
            ListContext::FriendWatched => &[],
        }
    }

    /// The list of the viewer the actions operate on
    pub fn list_name(&self) -> Option<ListName> {
        match self {
            ListContext::Watchlist => Some(ListName::Watchlist),
            ListContext::Watched => Some(ListName::Watched),
            ListContext::Search | ListContext::FriendWatched => None,
        }
    }
}

/// Everything a user can do with a rendered movie
#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MovieAction {
    /// Remove the movie from the list it is shown in
    Delete,
    /// Move it from the watchlist to the watched list
    MoveToWatched,
    /// Add a search result to the watchlist
    AddToWatchlist,
    /// Add a search result to the watched list
    AddToWatched,
}

/// A button of a movie, rendered as a small form
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MovieButton {
    /// The action behind the button
    pub action: MovieAction,
    /// Text of the button
    pub label: &'static str,
    /// The endpoint the form posts to
    pub endpoint: &'static str,
    /// Value of the `list` field
    pub list: Option<ListName>,
}

impl MovieButton {
    fn new(action: MovieAction, context: ListContext) -> Self {
        match action {
            MovieAction::Delete => Self {
                action,
                label: "Delete",
                endpoint: "/actions/movies/delete",
                list: context.list_name(),
            },
            MovieAction::MoveToWatched => Self {
                action,
                label: "Move to Watched",
                endpoint: "/actions/movies/move",
                list: None,
            },
            MovieAction::AddToWatchlist => Self {
                action,
                label: "Add to Watchlist",
                endpoint: "/actions/movies/add",
                list: Some(ListName::Watchlist),
            },
            MovieAction::AddToWatched => Self {
                action,
                label: "Add to Watched",
                endpoint: "/actions/movies/add",
                list: Some(ListName::Watched),
            },
        }
    }
}

/// One rendered movie
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MovieView {
    /// Element id, unique per list and movie
    pub dom_id: String,
    /// Identifier of the movie
    pub movie_id: String,
    /// Title of the movie
    pub title: String,
    /// Release date and genres in one line
    pub details: String,
    /// The buttons of the movie
    pub buttons: Vec<MovieButton>,
}

/// Build the views of `movies` in input order
pub fn render_movies(movies: &[Movie], context: ListContext) -> Vec<MovieView> {
    movies
        .iter()
        .map(|movie| MovieView {
            dom_id: format!("movie-{}-{}", context.as_str(), movie.id),
            movie_id: movie.id.clone(),
            title: movie.title.clone(),
            details: format!(
                "Release Date: {}, Genres: {}",
                movie.release_date.as_deref().unwrap_or("Unknown"),
                genre_names(movie.genre_ids.as_ref())
            ),
            buttons: context
                .actions()
                .iter()
                .map(|action| MovieButton::new(*action, context))
                .collect(),
        })
        .collect()
}
