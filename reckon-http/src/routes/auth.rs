use crate::handlers::{current_user, revoke_key};
use crate::server::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/revoke", post(revoke_key))
        .route("/auth/me", get(current_user))
}
