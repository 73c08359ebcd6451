use crate::auth::AuthUser;
use crate::error::AppError;
use crate::extract::ApiJson;
use crate::models::{
    CalculationPayload, CalculationResponse, EvaluateResponse, ListCalculationsResponse,
    ListKindsResponse, UpdateCalculationRequest, user::User,
};
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use reckon_core::record::CalculationRecord;
use tracing::info;
use uuid::Uuid;

/// Evaluate a calculation without storing it
#[utoipa::path(
    post,
    tag = "calculations",
    path = "/calculations/evaluate",
    request_body = CalculationPayload,
    responses(
        (status = 200, description = "Calculation evaluated", body = EvaluateResponse),
        (status = 400, description = "Invalid inputs or undefined result"),
        (status = 401, description = "Unauthorized")
    )
)]
#[axum::debug_handler]
pub async fn evaluate_calculation(
    AuthUser(_user): AuthUser,
    ApiJson(payload): ApiJson<CalculationPayload>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let request = payload.to_request()?;
    let result = request.evaluate()?;

    Ok(Json(EvaluateResponse {
        kind: request.kind(),
        inputs: request.into_inputs(),
        result,
    }))
}

/// Store a calculation for the caller
#[utoipa::path(
    post,
    tag = "calculations",
    path = "/calculations",
    request_body = CalculationPayload,
    responses(
        (status = 201, description = "Calculation created", body = CalculationResponse),
        (status = 400, description = "Invalid inputs or undefined result"),
        (status = 401, description = "Unauthorized")
    )
)]
#[axum::debug_handler]
pub async fn create_calculation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<CalculationPayload>,
) -> Result<(StatusCode, Json<CalculationResponse>), AppError> {
    let request = payload.to_request()?;
    let record = state.calculations.create(&user.user_id, request).await?;
    info!(id = %record.id, user_id = %user.user_id, "calculation created");

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// List the caller's calculations, oldest first
#[utoipa::path(
    get,
    tag = "calculations",
    path = "/calculations",
    responses(
        (status = 200, description = "Calculations listed", body = ListCalculationsResponse),
        (status = 401, description = "Unauthorized")
    )
)]
#[axum::debug_handler]
pub async fn list_calculations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListCalculationsResponse>, AppError> {
    let calculations: Vec<CalculationResponse> = state
        .calculations
        .list_by_user(&user.user_id)
        .await?
        .into_iter()
        .map(CalculationResponse::from)
        .collect();

    Ok(Json(ListCalculationsResponse {
        count: calculations.len(),
        calculations,
    }))
}

#[utoipa::path(
    get,
    tag = "calculations",
    path = "/calculations/{id}",
    responses(
        (status = 200, description = "Calculation retrieved", body = CalculationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Calculation not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Calculation identifier")
    )
)]
#[axum::debug_handler]
pub async fn get_calculation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CalculationResponse>, AppError> {
    let record = owned_record(&state, &user, id).await?;
    Ok(Json(record.into()))
}

/// Update the kind and/or inputs of a calculation and re-evaluate it
#[utoipa::path(
    put,
    tag = "calculations",
    path = "/calculations/{id}",
    request_body = UpdateCalculationRequest,
    responses(
        (status = 200, description = "Calculation updated", body = CalculationResponse),
        (status = 400, description = "Invalid inputs or undefined result"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Calculation not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Calculation identifier")
    )
)]
#[axum::debug_handler]
pub async fn update_calculation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateCalculationRequest>,
) -> Result<Json<CalculationResponse>, AppError> {
    owned_record(&state, &user, id).await?;

    let update = payload.to_update()?;
    let record = state.calculations.update(id, update).await?;
    info!(%id, user_id = %user.user_id, "calculation updated");

    Ok(Json(record.into()))
}

#[utoipa::path(
    delete,
    tag = "calculations",
    path = "/calculations/{id}",
    responses(
        (status = 204, description = "Calculation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Calculation not found")
    ),
    params(
        ("id" = Uuid, Path, description = "Calculation identifier")
    )
)]
#[axum::debug_handler]
pub async fn delete_calculation(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    owned_record(&state, &user, id).await?;

    state.calculations.delete(id).await?;
    info!(%id, user_id = %user.user_id, "calculation deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// List supported calculation kinds
#[utoipa::path(
    get,
    tag = "calculations",
    path = "/calculations/kinds",
    responses(
        (status = 200, description = "Supported kinds", body = ListKindsResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_kinds() -> Json<ListKindsResponse> {
    Json(ListKindsResponse::supported())
}

async fn owned_record(
    state: &AppState,
    user: &User,
    id: Uuid,
) -> Result<CalculationRecord, AppError> {
    let record = state.calculations.get(id).await?;
    if !user.can_access(&record.user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(record)
}
