use crate::handlers::{
    create_calculation, delete_calculation, evaluate_calculation, get_calculation,
    list_calculations, list_kinds, update_calculation,
};
use crate::server::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Create the calculation routes with state
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/calculations",
            post(create_calculation).get(list_calculations),
        )
        .route("/calculations/evaluate", post(evaluate_calculation))
        .route("/calculations/kinds", get(list_kinds))
        .route(
            "/calculations/{id}",
            get(get_calculation)
                .put(update_calculation)
                .delete(delete_calculation),
        )
}
