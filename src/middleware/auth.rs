use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated user context extracted from a verified JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// The optional user context handlers receive; anonymous requests carry
/// `None`.
pub type MaybeUser = Option<Extension<AuthUser>>;

/// Authentication middleware applied to every route. A valid bearer
/// token injects an [`AuthUser`] into the request; a missing or invalid
/// token leaves the request anonymous and lets the guards below decide.
pub async fn authenticate_jwt(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    if let Ok(token) = extract_jwt_from_headers(&headers) {
        if let Ok(claims) = validate_jwt(&token) {
            request.extensions_mut().insert(AuthUser::from(claims));
        }
    }

    next.run(request).await
}

/// Require any authenticated user.
pub fn ensure_logged_in<'a>(user: &'a MaybeUser) -> Result<&'a AuthUser, ApiError> {
    match user {
        Some(Extension(user)) => Ok(user),
        None => Err(ApiError::unauthorized("Authentication required")),
    }
}

/// Require an authenticated admin. Anonymous callers get 401; logged-in
/// non-admins get 403.
pub fn ensure_admin<'a>(user: &'a MaybeUser) -> Result<&'a AuthUser, ApiError> {
    let user = ensure_logged_in(user)?;
    if !user.is_admin {
        return Err(ApiError::forbidden("Admin privileges required"));
    }
    Ok(user)
}

/// Require an admin, or the user named in the route itself.
pub fn ensure_correct_user_or_admin<'a>(
    user: &'a MaybeUser,
    username: &str,
) -> Result<&'a AuthUser, ApiError> {
    let user = ensure_logged_in(user)?;
    if !user.is_admin && user.username != username {
        return Err(ApiError::forbidden("Insufficient privileges"));
    }
    Ok(user)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid JWT token: {}", e))?;

    Ok(token_data.claims)
}
