use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

/// A movie as it is returned by the catalog endpoints of the backend
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Movie {
    /// Identifier of the movie.
    ///
    /// The local catalog sends strings, TMDB sends numbers.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Title of the movie
    pub title: String,
    /// Date of the release, usually `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Genre codes of the movie
    #[serde(default)]
    pub genre_ids: Option<GenreIds>,
}

/// The shapes the backend uses for genre codes
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum GenreIds {
    /// Codes joined by commas, e.g. `"28,99"`
    Joined(String),
    /// Plain list of codes
    Codes(Vec<i64>),
    /// List of textual codes, e.g. `["28","99"]`
    Texts(Vec<String>),
    /// Anything else, rendered as unknown
    Other(serde_json::Value),
}

/// The named lists of a user
#[derive(Deserialize, Serialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListName {
    /// Movies the user intends to watch
    Watchlist,
    /// Movies the user has already watched
    Watched,
}

impl ListName {
    /// The name used by the backend and in urls
    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Watchlist => "watchlist",
            ListName::Watched => "watched",
        }
    }
}

impl Display for ListName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a movie search is executed
#[derive(Deserialize, Serialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovieSource {
    /// The catalog of the backend
    #[default]
    Local,
    /// The external movie database
    Tmdb,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MovieListRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) movie_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) list_name: Option<&'a str>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(text) => text,
        Repr::Number(number) => number.to_string(),
    })
}
