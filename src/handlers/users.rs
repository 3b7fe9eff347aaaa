use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::auth::{ensure_admin, ensure_correct_user_or_admin, MaybeUser};
use crate::models::UserStore;
use crate::schemas::{self, UserNew, UserUpdate};

/// POST /users => 201 {user, token}
///
/// Admin-only account creation; unlike self-registration the payload may
/// set isAdmin. The token returned is for the new user, not the caller.
pub async fn create(
    user: MaybeUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;
    let data: UserNew = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let created = UserStore::new(pool).create(&data).await?;
    let token = generate_jwt(Claims::new(created.username.clone(), created.is_admin))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": created, "token": token })),
    ))
}

/// GET /users => {users: [...]}
///
/// Authorization required: admin
pub async fn list(user: MaybeUser) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;

    let pool = DatabaseManager::pool().await?;
    let users = UserStore::new(pool).find_all().await?;

    Ok(Json(json!({ "users": users })))
}

/// GET /users/:username => {user} with applied job ids.
///
/// Authorization required: the named user, or admin
pub async fn get(
    user: MaybeUser,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_correct_user_or_admin(&user, &username)?;

    let pool = DatabaseManager::pool().await?;
    let found = UserStore::new(pool).get(&username).await?;

    Ok(Json(json!({ "user": found })))
}

/// PATCH /users/:username => {user}
///
/// Authorization required: the named user, or admin
pub async fn update(
    user: MaybeUser,
    Path(username): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_correct_user_or_admin(&user, &username)?;
    let data: UserUpdate = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let updated = UserStore::new(pool).update(&username, &data).await?;

    Ok(Json(json!({ "user": updated })))
}

/// DELETE /users/:username => {deleted: username}
///
/// Authorization required: the named user, or admin
pub async fn remove(
    user: MaybeUser,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_correct_user_or_admin(&user, &username)?;

    let pool = DatabaseManager::pool().await?;
    UserStore::new(pool).remove(&username).await?;

    Ok(Json(json!({ "deleted": username })))
}

/// POST /users/:username/jobs/:id => 201 {applied: id}
///
/// Authorization required: the named user, or admin
pub async fn apply(
    user: MaybeUser,
    Path((username, job_id)): Path<(String, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_correct_user_or_admin(&user, &username)?;

    let pool = DatabaseManager::pool().await?;
    UserStore::new(pool).apply_to_job(&username, job_id).await?;

    Ok((StatusCode::CREATED, Json(json!({ "applied": job_id }))))
}
