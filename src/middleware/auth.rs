//! API key authentication middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Extract the bearer token from the Authorization header
//! 2. Hash it and compare against the configured key's hash
//! 3. Reject unauthorized requests with HTTP 401

use crate::{
    error::AppError,
    state::{AppState, hash_key},
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. If no API key is configured, let the request through
/// 2. Split `Authorization` into `<scheme> <token>` at the first space
/// 3. Require the scheme to be `bearer` (any case)
/// 4. Hash the token with SHA-256 and compare to the configured key's hash
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer abc123xyz
/// ```
///
/// # Returns
///
/// - `Ok(Response)` if authenticated successfully (calls next handler)
/// - `Err(AppError::Unauthorized)` if authentication fails (returns 401)
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.api_key_hash.as_deref() else {
        return Ok(next.run(request).await);
    };

    let Some(header) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    else {
        tracing::warn!("Authentication failed: no Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some((scheme, token)) = header.split_once(' ') else {
        tracing::warn!("Authentication failed: malformed Authorization header");
        return Err(AppError::Unauthorized);
    };

    if !scheme.eq_ignore_ascii_case("bearer") || hash_key(token) != expected {
        tracing::warn!(
            scheme,
            token = %"*".repeat(token.chars().count()),
            "Authentication failed: invalid token type or key"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
