use serde::{Deserialize, Serialize};

/// The profile of an account, also used for user search results
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct UserProfile {
    /// The identifier a user logs in with, `userId` on the wire
    #[serde(rename(deserialize = "userId"))]
    pub user_id: String,
    /// Mail address of the account
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest<'a> {
    pub(crate) user_id: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}
