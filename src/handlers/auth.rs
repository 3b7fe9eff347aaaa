use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::models::UserStore;
use crate::schemas::{self, UserAuth, UserRegister};

/// POST /auth/token {username, password} => {token}
///
/// Public: token acquisition for existing users.
pub async fn token(Json(body): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let data: UserAuth = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserStore::new(pool)
        .authenticate(&data.username, &data.password)
        .await?;

    let token = generate_jwt(Claims::new(user.username, user.is_admin))?;
    Ok(Json(json!({ "token": token })))
}

/// POST /auth/register {username, password, firstName, lastName, email}
/// => 201 {token}
///
/// Public: self-registration. New accounts are never admins.
pub async fn register(Json(body): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let data: UserRegister = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let user = UserStore::new(pool).register(&data).await?;

    let token = generate_jwt(Claims::new(user.username, user.is_admin))?;
    Ok((StatusCode::CREATED, Json(json!({ "token": token }))))
}
