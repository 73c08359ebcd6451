pub mod auth;
pub mod calculations;

use crate::handlers;
use crate::models::{
    CalculationPayload, CalculationResponse, EvaluateResponse, KindInfo,
    ListCalculationsResponse, ListKindsResponse, RevokeResponse, UpdateCalculationRequest,
    user::{User, UserRole},
};
use crate::server::AppState;
use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use reckon_core::CalculationKind;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::calculations::evaluate_calculation,
        handlers::calculations::create_calculation,
        handlers::calculations::list_calculations,
        handlers::calculations::get_calculation,
        handlers::calculations::update_calculation,
        handlers::calculations::delete_calculation,
        handlers::calculations::list_kinds,
        handlers::auth::revoke_key,
        handlers::auth::current_user
    ),
    components(schemas(
        CalculationKind,
        CalculationPayload,
        UpdateCalculationRequest,
        EvaluateResponse,
        CalculationResponse,
        ListCalculationsResponse,
        KindInfo,
        ListKindsResponse,
        RevokeResponse,
        User,
        UserRole
    )),
    modifiers(&SecurityAddon),
    security(("api_key" = [])),
    tags(
        (name = "calculations", description = "Calculation API"),
        (name = "auth", description = "API key management")
    ),
    servers(
        (url = "http://localhost:3000/api/v1", description = "Local development server"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}

/// Create the main API router with state
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .nest("/api/v1", api_v1_router())
}

/// Create the v1 API router with state
fn api_v1_router() -> Router<AppState> {
    Router::new()
        .merge(calculations::routes())
        .merge(auth::routes())
}

/// Health check endpoint for container health monitoring
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
