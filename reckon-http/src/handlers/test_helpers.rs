use crate::models::user::User;
use crate::server::AppState;
use reckon_core::revocation::TokenRevocation;
use std::sync::Arc;

/// Create a test AppState with the default users and in-memory stores
pub fn create_test_state() -> AppState {
    AppState::default()
}

/// Create a test AppState backed by the given revocation store
pub fn create_test_state_with_revocation(revocation: Arc<dyn TokenRevocation>) -> AppState {
    AppState {
        revocation,
        ..Default::default()
    }
}

/// Create a test user with the given API key for testing
pub fn create_test_user_with_api_key(
    app_state: &AppState,
    user_id: &str,
    username: &str,
    is_admin: bool,
    api_key: &str,
) {
    let user = if is_admin {
        User::new_admin(user_id, username)
    } else {
        User::new_user(user_id, username)
    };

    app_state.auth_store.register(user, api_key);
}
