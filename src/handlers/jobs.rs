use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::database::manager::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::auth::{ensure_admin, MaybeUser};
use crate::models::JobStore;
use crate::schemas::{self, JobNew, JobUpdate};

/// POST /jobs {title, salary?, equity?, companyHandle} => 201 {job}
///
/// Authorization required: admin
pub async fn create(
    user: MaybeUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;
    let data: JobNew = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let job = JobStore::new(pool).create(&data).await?;

    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// GET /jobs => {jobs: [...]}
///
/// Optional query filters: title, minSalary, hasEquity. Public.
pub async fn list(
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = schemas::job::search_from_query(&query).map_err(ApiError::validation)?;

    let pool = DatabaseManager::pool().await?;
    let jobs = JobStore::new(pool).find_all(&filter).await?;

    Ok(Json(json!({ "jobs": jobs })))
}

/// GET /jobs/:id => {job}. Public.
pub async fn get(Path(id): Path<i32>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let job = JobStore::new(pool).get(id).await?;

    Ok(Json(json!({ "job": job })))
}

/// PATCH /jobs/:id => {job}
///
/// Authorization required: admin
pub async fn update(
    user: MaybeUser,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;
    let data: JobUpdate = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let job = JobStore::new(pool).update(id, &data).await?;

    Ok(Json(json!({ "job": job })))
}

/// DELETE /jobs/:id => {deleted: id}
///
/// Authorization required: admin
pub async fn remove(user: MaybeUser, Path(id): Path<i32>) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;

    let pool = DatabaseManager::pool().await?;
    JobStore::new(pool).remove(id).await?;

    Ok(Json(json!({ "deleted": id })))
}
