//! Friend requests and friendships

use actix_web::web::{Data, Form};
use actix_web::{post, HttpResponse};
use log::debug;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::inflight::{ActionKey, InFlight};
use crate::server::handler::{redirect, return_path, PageResult, DUPLICATE_SUBMISSION};
use crate::server::middleware::AuthenticationRequired;
use crate::server::session::SessionContext;
use crate::views::{FriendAction, Relationship, Toast};

/// The request to perform an action on another user
#[derive(Deserialize)]
pub struct FriendForm {
    action: FriendAction,
    /// The other user
    subject: String,
    /// The relationship the row was rendered with
    state: Relationship,
    return_to: Option<String>,
}

/// Perform a friend action and return the toast describing its outcome
pub(crate) async fn run_friend_action(
    client: &ApiClient,
    in_flight: &InFlight,
    viewer: &str,
    action: FriendAction,
    subject: &str,
    state: Relationship,
) -> Toast {
    let Some(next) = state.apply(action) else {
        return Toast::error("Action not available");
    };
    if subject == viewer {
        return Toast::error("Action not available");
    }

    let Some(_ticket) = in_flight.try_start(ActionKey::new(viewer, action.as_str(), subject))
    else {
        return Toast::error(DUPLICATE_SUBMISSION);
    };

    let (res, success, failure) = match action {
        FriendAction::SendRequest => (
            client.send_friend_request(viewer, subject).await,
            "Friend request sent",
            "Failed to send friend request",
        ),
        FriendAction::RemoveRequest => (
            client.remove_friend_request(viewer, subject).await,
            "Friend request removed",
            "Failed to remove friend request",
        ),
        FriendAction::Accept => (
            client.accept_friend_request(subject, viewer).await,
            "Friend request accepted",
            "Failed to accept friend request",
        ),
        FriendAction::Decline => (
            client.decline_friend_request(subject, viewer).await,
            "Friend request declined",
            "Failed to decline friend request",
        ),
        FriendAction::Remove => (
            client.remove_friend(viewer, subject).await,
            "Friend removed",
            "Failed to remove friend",
        ),
        // A link, never submitted
        FriendAction::SeeWatchedList => return Toast::error("Action not available"),
    };

    match res {
        Ok(()) => {
            debug!("{viewer} -> {subject}: {state:?} became {next:?}");
            Toast::success(success)
        }
        Err(err) => Toast::error(err.user_message(failure)),
    }
}

/// Send, accept, decline or withdraw a friend request or end a friendship.
///
/// Redirects back to the page the form was on.
#[post("/actions/friends", wrap = "AuthenticationRequired")]
pub async fn friend_action(
    form: Form<FriendForm>,
    client: Data<ApiClient>,
    in_flight: Data<InFlight>,
    session: SessionContext,
) -> PageResult<HttpResponse> {
    let viewer = session.require_user_id()?;

    let toast = run_friend_action(
        &client,
        &in_flight,
        &viewer,
        form.action,
        &form.subject,
        form.state,
    )
    .await;
    session.push_toast(toast)?;

    Ok(redirect(return_path(form.return_to.as_deref(), "/profile")))
}
