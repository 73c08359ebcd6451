use crate::auth::{ApiKey, AuthUser};
use crate::error::AppError;
use crate::models::{RevokeResponse, user::User};
use crate::server::AppState;
use axum::{extract::State, response::Json};
use tracing::info;

/// Revoke the API key used for this request
///
/// Subsequent requests with the same key are rejected until the revocation
/// expires.
#[utoipa::path(
    post,
    tag = "auth",
    path = "/auth/revoke",
    responses(
        (status = 200, description = "Key revoked", body = RevokeResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Revocation store failure")
    )
)]
#[axum::debug_handler]
pub async fn revoke_key(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    api_key: ApiKey,
) -> Result<Json<RevokeResponse>, AppError> {
    state
        .revocation
        .record(api_key.as_str(), state.revocation_ttl)
        .await?;
    info!(
        user_id = %user.user_id,
        backend = state.revocation.backend_name(),
        "api key revoked"
    );

    Ok(Json(RevokeResponse {
        revoked: true,
        expires_in_seconds: state.revocation_ttl.as_secs(),
    }))
}

/// The authenticated user
#[utoipa::path(
    get,
    tag = "auth",
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn current_user(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}
