//! Translation of TMDB genre codes into names

use std::collections::HashMap;

use itertools::Itertools;
use once_cell::sync::Lazy;

use crate::models::GenreIds;

const UNKNOWN: &str = "Unknown";

/// The genre codes of TMDB
pub const GENRES: [(i64, &str); 19] = [
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

// Textual codes must match exactly, "028" is not "28"
static BY_TEXT: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    GENRES
        .iter()
        .map(|(code, name)| (code.to_string(), *name))
        .collect()
});

fn by_code(code: i64) -> &'static str {
    GENRES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(UNKNOWN, |(_, name)| *name)
}

fn by_text(code: &str) -> &'static str {
    BY_TEXT.get(code.trim()).copied().unwrap_or(UNKNOWN)
}

/// Translate genre codes into a comma separated list of names.
///
/// Unknown codes become `Unknown`, as does a missing or empty input.
pub fn genre_names(genre_ids: Option<&GenreIds>) -> String {
    match genre_ids {
        Some(GenreIds::Joined(joined)) if !joined.is_empty() => {
            joined.split(',').map(by_text).join(", ")
        }
        Some(GenreIds::Codes(codes)) if !codes.is_empty() => {
            codes.iter().copied().map(by_code).join(", ")
        }
        Some(GenreIds::Texts(codes)) if !codes.is_empty() => {
            codes.iter().map(|code| by_text(code)).join(", ")
        }
        _ => UNKNOWN.to_string(),
    }
}
