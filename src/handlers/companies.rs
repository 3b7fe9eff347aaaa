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
use crate::models::CompanyStore;
use crate::schemas::{self, CompanyNew, CompanyUpdate};

/// POST /companies {handle, name, description?, numEmployees?, logoUrl?}
/// => 201 {company}
///
/// Authorization required: admin
pub async fn create(
    user: MaybeUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;
    let data: CompanyNew = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let company = CompanyStore::new(pool).create(&data).await?;

    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// GET /companies => {companies: [...]}
///
/// Optional query filters: minEmployees, maxEmployees, nameLike
/// (case-insensitive substring). Public.
pub async fn list(
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = schemas::company::search_from_query(&query).map_err(ApiError::validation)?;

    let pool = DatabaseManager::pool().await?;
    let companies = CompanyStore::new(pool).find_all(&filter).await?;

    Ok(Json(json!({ "companies": companies })))
}

/// GET /companies/:handle => {company} with nested jobs. Public.
pub async fn get(Path(handle): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let company = CompanyStore::new(pool).get(&handle).await?;

    Ok(Json(json!({ "company": company })))
}

/// PATCH /companies/:handle => {company}
///
/// Authorization required: admin
pub async fn update(
    user: MaybeUser,
    Path(handle): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;
    let data: CompanyUpdate = schemas::parse_payload(body)?;

    let pool = DatabaseManager::pool().await?;
    let company = CompanyStore::new(pool).update(&handle, &data).await?;

    Ok(Json(json!({ "company": company })))
}

/// DELETE /companies/:handle => {deleted: handle}
///
/// Authorization required: admin
pub async fn remove(
    user: MaybeUser,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    ensure_admin(&user)?;

    let pool = DatabaseManager::pool().await?;
    CompanyStore::new(pool).remove(&handle).await?;

    Ok(Json(json!({ "deleted": handle })))
}
