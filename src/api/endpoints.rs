//! Typed wrappers around the endpoints of the backend

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiClient, ApiMethod, ClientError};
use crate::models::{
    FriendRequest, FriendRequestPair, Friendship, ListName, LoginRequest, Movie,
    MovieListRequest, MovieSource, RegisterRequest, RemoveFriendRequest, UserProfile,
};

impl ApiClient {
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        self.request::<()>(path, ApiMethod::Get, query, None)
            .await?
            .error_for_status()?
            .json()
    }

    async fn submit<B: Serialize>(
        &self,
        path: &str,
        method: ApiMethod,
        body: &B,
    ) -> Result<(), ClientError> {
        self.request(path, method, &[], Some(body))
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Check the credentials of a user
    pub async fn login(&self, user_id: &str, password: &str) -> Result<(), ClientError> {
        self.submit(
            "/api/login",
            ApiMethod::Post,
            &LoginRequest { user_id, password },
        )
        .await
    }

    /// Create a new account
    pub async fn register(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        self.submit(
            "/api/register",
            ApiMethod::Post,
            &RegisterRequest {
                user_id,
                email,
                password,
            },
        )
        .await
    }

    /// Retrieve the profile of a user
    pub async fn user_profile(&self, user_id: &str) -> Result<UserProfile, ClientError> {
        self.fetch("/api/userProfile", &[("userId", user_id)]).await
    }

    /// Retrieve one of the lists of a user
    pub async fn list(&self, user_id: &str, list: ListName) -> Result<Vec<Movie>, ClientError> {
        self.fetch(&format!("/api/list{list}"), &[("userId", user_id)])
            .await
    }

    /// Move a movie from the watchlist to the watched list
    pub async fn move_to_watched(&self, user_id: &str, movie_id: &str) -> Result<(), ClientError> {
        self.submit(
            "/api/moveToWatched",
            ApiMethod::Post,
            &MovieListRequest {
                user_id,
                movie_id,
                list_name: None,
            },
        )
        .await
    }

    /// Add a movie to a list
    pub async fn add_movie(
        &self,
        user_id: &str,
        movie_id: &str,
        list: ListName,
    ) -> Result<(), ClientError> {
        self.submit(
            "/api/addMovie",
            ApiMethod::Post,
            &MovieListRequest {
                user_id,
                movie_id,
                list_name: Some(list.as_str()),
            },
        )
        .await
    }

    /// Remove a movie from a list
    pub async fn delete_movie(
        &self,
        user_id: &str,
        movie_id: &str,
        list: ListName,
    ) -> Result<(), ClientError> {
        self.submit(
            "/api/deleteMovie",
            ApiMethod::Delete,
            &MovieListRequest {
                user_id,
                movie_id,
                list_name: Some(list.as_str()),
            },
        )
        .await
    }

    /// Search movies in the local catalog or on TMDB
    pub async fn search_movies(
        &self,
        query: &str,
        source: MovieSource,
    ) -> Result<Vec<Movie>, ClientError> {
        let path = match source {
            MovieSource::Local => "/api/searchMovies",
            MovieSource::Tmdb => "/api/searchTMDBMovies",
        };
        self.fetch(path, &[("query", query)]).await
    }

    /// Search accounts
    pub async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>, ClientError> {
        self.fetch("/api/searchUsers", &[("query", query)]).await
    }

    /// All friend requests the user is part of, in both directions
    pub async fn list_friend_requests(
        &self,
        user_id: &str,
    ) -> Result<Vec<FriendRequest>, ClientError> {
        self.fetch("/api/listFriendRequests", &[("userId", user_id)])
            .await
    }

    /// The friends of a user
    pub async fn list_friends(&self, user_id: &str) -> Result<Vec<Friendship>, ClientError> {
        self.fetch("/api/listFriends", &[("userId", user_id)]).await
    }

    /// Create a friend request from `requester_id` to `requestee_id`
    pub async fn send_friend_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> Result<(), ClientError> {
        self.friend_request_call("/api/sendFriendRequest", requester_id, requestee_id)
            .await
    }

    /// Accept a pending request, called by the requestee
    pub async fn accept_friend_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> Result<(), ClientError> {
        self.friend_request_call("/api/acceptFriendRequest", requester_id, requestee_id)
            .await
    }

    /// Decline a pending request, called by the requestee
    pub async fn decline_friend_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> Result<(), ClientError> {
        self.friend_request_call("/api/declineFriendRequest", requester_id, requestee_id)
            .await
    }

    /// Withdraw a pending request, called by the requester
    pub async fn remove_friend_request(
        &self,
        requester_id: &str,
        requestee_id: &str,
    ) -> Result<(), ClientError> {
        self.friend_request_call("/api/removeFriendRequest", requester_id, requestee_id)
            .await
    }

    /// End a friendship
    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<(), ClientError> {
        self.submit(
            "/api/removeFriend",
            ApiMethod::Post,
            &RemoveFriendRequest { user_id, friend_id },
        )
        .await
    }

    async fn friend_request_call(
        &self,
        path: &str,
        requester_id: &str,
        requestee_id: &str,
    ) -> Result<(), ClientError> {
        self.submit(
            path,
            ApiMethod::Post,
            &FriendRequestPair {
                requester_id,
                requestee_id,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::mock::MockBackend;
    use crate::api::{ApiMethod, ClientError};
    use crate::models::{ListName, MovieSource};

    #[actix_web::test]
    async fn delete_sends_list_name() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Delete, "/api/deleteMovie", 200, "Movie deleted");

        backend
            .client()
            .delete_movie("alice", "603", ListName::Watched)
            .await
            .unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body,
            Some(json!({"userId": "alice", "movieId": "603", "listName": "watched"}))
        );
    }

    #[actix_web::test]
    async fn move_to_watched_has_no_list_name() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Post, "/api/moveToWatched", 200, "");

        backend
            .client()
            .move_to_watched("alice", "603")
            .await
            .unwrap();

        assert_eq!(
            backend.calls()[0].body,
            Some(json!({"userId": "alice", "movieId": "603"}))
        );
    }

    #[actix_web::test]
    async fn lists_use_query_parameter() {
        let backend = MockBackend::new();
        backend.respond(
            ApiMethod::Get,
            "/api/listwatchlist",
            200,
            r#"[{"id":"1","title":"Alien","genre_ids":"27,878"}]"#,
        );

        let movies = backend
            .client()
            .list("alice", ListName::Watchlist)
            .await
            .unwrap();

        assert_eq!(movies.len(), 1);
        let call = &backend.calls()[0];
        assert_eq!(call.method, ApiMethod::Get);
        assert_eq!(call.body, None);
        assert_eq!(
            call.query,
            vec![("userId".to_string(), "alice".to_string())]
        );
    }

    #[actix_web::test]
    async fn tmdb_search_path() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Get, "/api/searchTMDBMovies", 200, "[]");

        let movies = backend
            .client()
            .search_movies("matrix", MovieSource::Tmdb)
            .await
            .unwrap();

        assert!(movies.is_empty());
        assert_eq!(backend.calls()[0].path, "/api/searchTMDBMovies");
    }

    #[actix_web::test]
    async fn rejection_carries_backend_text() {
        let backend = MockBackend::new();
        backend.respond(
            ApiMethod::Post,
            "/api/addMovie",
            500,
            "Failed to add movie\n",
        );

        let err = backend
            .client()
            .add_movie("alice", "1", ListName::Watchlist)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Rejected { status: 500, .. }));
        assert_eq!(
            err.user_message("Failed to add movie to watchlist"),
            "Failed to add movie to watchlist: Failed to add movie"
        );
    }

    #[actix_web::test]
    async fn transport_failure_uses_fallback() {
        let backend = MockBackend::new();
        backend.fail(ApiMethod::Get, "/api/userProfile");

        let err = backend.client().user_profile("alice").await.unwrap_err();

        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(
            err.user_message("Failed to load profile information"),
            "Failed to load profile information"
        );
    }

    #[actix_web::test]
    async fn malformed_json_is_a_decode_error() {
        let backend = MockBackend::new();
        backend.respond(ApiMethod::Get, "/api/listFriends", 200, "not json");

        let err = backend.client().list_friends("alice").await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }
}
