//! View state for users, friend requests and friends
//!
//! The relationship between the viewer and another user is always one of
//! [Relationship]. It is derived from the pending requests and the friend
//! list of the viewer, never from previously rendered output.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::models::{FriendRequest, Friendship, UserProfile};

/// Relationship between the viewer and another user
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    /// The viewer sent a request that is still pending
    RequestSent,
    /// The other user sent a request that is still pending
    RequestReceived,
    /// Both are friends
    Friends,
    /// Neither a request nor a friendship exists
    Strangers,
}

impl Relationship {
    /// The actions offered in this state
    pub fn actions(&self) -> &'static [FriendAction] {
        match self {
            Relationship::RequestSent => &[FriendAction::RemoveRequest],
            Relationship::RequestReceived => &[FriendAction::Accept, FriendAction::Decline],
            Relationship::Friends => &[FriendAction::SeeWatchedList, FriendAction::Remove],
            Relationship::Strangers => &[FriendAction::SendRequest],
        }
    }

    /// The state after `action` succeeded.
    ///
    /// Returns [None] if `action` is not offered in this state.
    pub fn apply(&self, action: FriendAction) -> Option<Relationship> {
        match (self, action) {
            (Relationship::Strangers, FriendAction::SendRequest) => Some(Relationship::RequestSent),
            (Relationship::RequestSent, FriendAction::RemoveRequest) => {
                Some(Relationship::Strangers)
            }
            (Relationship::RequestReceived, FriendAction::Accept) => Some(Relationship::Friends),
            (Relationship::RequestReceived, FriendAction::Decline) => {
                Some(Relationship::Strangers)
            }
            (Relationship::Friends, FriendAction::SeeWatchedList) => Some(Relationship::Friends),
            (Relationship::Friends, FriendAction::Remove) => Some(Relationship::Strangers),
            _ => None,
        }
    }
}

/// Everything a user can do with another user
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FriendAction {
    /// Ask the other user to become friends
    SendRequest,
    /// Withdraw a request sent by the viewer
    RemoveRequest,
    /// Accept a received request
    Accept,
    /// Decline a received request
    Decline,
    /// Open the watched list of a friend
    SeeWatchedList,
    /// End the friendship
    Remove,
}

impl FriendAction {
    /// Name of the action, used as key of in-flight requests
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendAction::SendRequest => "send-request",
            FriendAction::RemoveRequest => "remove-request",
            FriendAction::Accept => "accept",
            FriendAction::Decline => "decline",
            FriendAction::SeeWatchedList => "see-watched-list",
            FriendAction::Remove => "remove",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FriendAction::SendRequest => "Send Request",
            FriendAction::RemoveRequest => "Remove Request",
            FriendAction::Accept => "Accept",
            FriendAction::Decline => "Decline",
            FriendAction::SeeWatchedList => "See Watched List",
            FriendAction::Remove => "Remove",
        }
    }

    fn class(&self) -> &'static str {
        match self {
            FriendAction::SendRequest => "button",
            FriendAction::Accept => "button-accept",
            FriendAction::SeeWatchedList => "button-blue",
            FriendAction::RemoveRequest | FriendAction::Decline | FriendAction::Remove => {
                "button-red"
            }
        }
    }
}

/// The list a user is rendered in
#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ListScope {
    /// Results of a user search
    Search,
    /// Pending requests on the profile page
    Requests,
    /// Friends on the profile page
    Friends,
}

impl ListScope {
    fn as_str(&self) -> &'static str {
        match self {
            ListScope::Search => "search",
            ListScope::Requests => "requests",
            ListScope::Friends => "friends",
        }
    }
}

/// A button of a user row
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct FriendButton {
    /// The action behind the button
    pub action: FriendAction,
    /// Text of the button
    pub label: &'static str,
    /// Css class of the button
    pub class: &'static str,
    /// Target of link buttons, form buttons have none
    pub href: Option<String>,
}

/// One rendered user
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UserView {
    /// Element id, unique per list and user
    pub dom_id: String,
    /// The other user, never the viewer
    pub user_id: String,
    /// Relationship at render time, sent back with every action
    pub relationship: Relationship,
    /// The buttons of the row
    pub buttons: Vec<FriendButton>,
}

impl UserView {
    fn new(scope: ListScope, user_id: &str, relationship: Relationship) -> Self {
        let buttons = relationship
            .actions()
            .iter()
            .map(|action| FriendButton {
                action: *action,
                label: action.label(),
                class: action.class(),
                href: (*action == FriendAction::SeeWatchedList)
                    .then(|| friend_watched_href(user_id)),
            })
            .collect();

        Self {
            dom_id: format!("user-{}-{user_id}", scope.as_str()),
            user_id: user_id.to_string(),
            relationship,
            buttons,
        }
    }
}

/// Link to the watched list of `friend_id`, the id is percent-encoded
pub fn friend_watched_href(friend_id: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(friend_id.as_bytes()).collect();
    format!("/watched?friendId={encoded}")
}

/// Relationships of the viewer, keyed by the id of the other user
#[derive(Debug, Default)]
pub struct RelationshipIndex {
    requests: HashMap<String, Relationship>,
    friends: HashSet<String>,
}

impl RelationshipIndex {
    /// Build the index from the requests and friends of `viewer`.
    ///
    /// Only pending requests count. If several requests involve the same
    /// user, the first one wins.
    pub fn new(viewer: &str, requests: &[FriendRequest], friends: &[Friendship]) -> Self {
        let mut index = Self::default();

        for request in requests.iter().filter(|r| r.is_pending()) {
            let (user_id, relationship) = if request.requester_id == viewer {
                (request.requestee_id.clone(), Relationship::RequestSent)
            } else if request.requestee_id == viewer {
                (request.requester_id.clone(), Relationship::RequestReceived)
            } else {
                continue;
            };
            index.requests.entry(user_id).or_insert(relationship);
        }

        index.friends = friends.iter().map(|f| f.friend_id.clone()).collect();

        index
    }

    /// The relationship between the viewer and `user_id`
    pub fn relationship(&self, user_id: &str) -> Relationship {
        if let Some(relationship) = self.requests.get(user_id) {
            *relationship
        } else if self.friends.contains(user_id) {
            Relationship::Friends
        } else {
            Relationship::Strangers
        }
    }
}

/// Build the rows of a user search, the viewer is left out
pub fn search_results(
    viewer: &str,
    users: &[UserProfile],
    index: &RelationshipIndex,
) -> Vec<UserView> {
    users
        .iter()
        .filter(|user| user.user_id != viewer)
        .map(|user| {
            UserView::new(
                ListScope::Search,
                &user.user_id,
                index.relationship(&user.user_id),
            )
        })
        .collect()
}

/// Build the rows of the pending requests, showing the other party
pub fn request_list(viewer: &str, requests: &[FriendRequest]) -> Vec<UserView> {
    requests
        .iter()
        .filter(|r| r.is_pending())
        .filter_map(|request| {
            if request.requester_id == viewer {
                Some(UserView::new(
                    ListScope::Requests,
                    &request.requestee_id,
                    Relationship::RequestSent,
                ))
            } else if request.requestee_id == viewer {
                Some(UserView::new(
                    ListScope::Requests,
                    &request.requester_id,
                    Relationship::RequestReceived,
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Build the rows of the friend list
pub fn friend_list(friends: &[Friendship]) -> Vec<UserView> {
    friends
        .iter()
        .map(|friend| UserView::new(ListScope::Friends, &friend.friend_id, Relationship::Friends))
        .collect()
}
