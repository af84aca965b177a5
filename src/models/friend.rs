use serde::{Deserialize, Serialize};

/// The state of a friend request
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Neither accepted nor declined yet
    Pending,
    /// The requestee accepted
    Accepted,
    /// The requestee declined
    Declined,
    /// Anything else the backend may send
    #[serde(other)]
    Other,
}

/// A directional friend request
///
/// Accepted and declined requests are normally removed by the backend,
/// only [RequestStatus::Pending] has an effect on the ui.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct FriendRequest {
    /// The user that sent the request
    pub requester_id: String,
    /// The user that received the request
    pub requestee_id: String,
    /// Current state of the request
    pub status: RequestStatus,
}

impl FriendRequest {
    /// Check whether the request is still open
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// One friendship, seen from the user the list was requested for
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Friendship {
    /// The other user
    #[serde(rename = "friendId")]
    pub friend_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FriendRequestPair<'a> {
    pub(crate) requester_id: &'a str,
    pub(crate) requestee_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveFriendRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) friend_id: &'a str,
}
