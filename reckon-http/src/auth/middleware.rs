use crate::auth::ApiKey;
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Axum middleware for API key authentication
///
/// The key is read from `X-API-Key` or from an `Authorization: Bearer` header.
/// Revoked keys are rejected like unknown ones.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let path = request.uri().path();
    if ignore_auth_path(path) {
        return Ok(next.run(request).await);
    }

    let api_key = extract_api_key(request.headers())
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let user = state
        .auth_store
        .authenticate(&api_key)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let revoked = state.revocation.check(&api_key).await.map_err(|e| {
        error!(error = %e, "revocation check failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    if revoked {
        debug!(user_id = %user.user_id, "rejected revoked api key");
        return Err(StatusCode::UNAUTHORIZED);
    }

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(ApiKey(api_key));

    Ok(next.run(request).await)
}

/// Read the API key from `X-API-Key`, falling back to a bearer token
pub fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    if let Some(key) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(key);
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

fn ignore_auth_path(path: &str) -> bool {
    is_health_path(path) || is_swagger_path(path) || is_api_docs_path(path)
}

pub fn is_health_path(path: &str) -> bool {
    path.starts_with("/health")
}

pub fn is_swagger_path(path: &str) -> bool {
    path.starts_with("/swagger-ui")
}

pub fn is_api_docs_path(path: &str) -> bool {
    path.starts_with("/api-docs")
}
