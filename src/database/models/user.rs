use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User as returned by the API. The password hash is selected only by
/// `UserStore::authenticate` and never leaves the model layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithApplications {
    #[serde(flatten)]
    pub user: User,
    /// Ids of jobs this user has applied to.
    pub applications: Vec<i32>,
}
