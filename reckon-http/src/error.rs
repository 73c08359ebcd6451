//! Error handling for reckon-http
//!
//! Every failure a handler can produce is turned into a JSON body of the form
//! `{"error": <message>, "code": <CODE>}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reckon_core::{CalculationError, record::RepositoryError, revocation::RevocationError};
use serde_json::json;
use std::cmp::PartialEq;
use thiserror::Error;
use tracing::error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error(transparent)]
    Revocation(#[from] RevocationError),

    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error("You do not have access to this calculation")]
    Forbidden,

    #[error("{0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Calculation(err) => Self::Calculation(err),
            other => Self::Repository(other),
        }
    }
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        self.status() == *status_code
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        self.status_and_code().0
    }

    pub fn code(&self) -> &'static str {
        self.status_and_code().1
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Calculation(err) if err.is_validation() => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            Self::Calculation(_) => (StatusCode::BAD_REQUEST, "DOMAIN_ERROR"),
            Self::Repository(RepositoryError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Body(rejection) => (rejection.status(), "VALIDATION_FAILED"),
            Self::Revocation(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(CalculationError::UnknownKind("cube".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(CalculationError::DivisionByZero).code(),
            "DOMAIN_ERROR"
        );
        assert_eq!(
            AppError::from(CalculationError::InputsNotAList).code(),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            AppError::from(RepositoryError::NotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Forbidden, StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Internal("boom".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_calculation_error_unwrapped() {
        let err = AppError::from(RepositoryError::Calculation(
            CalculationError::UndefinedTangent,
        ));
        assert!(matches!(err, AppError::Calculation(_)));
        assert_eq!(err.code(), "DOMAIN_ERROR");
    }

    #[tokio::test]
    async fn test_response_body() {
        let response = AppError::from(CalculationError::ModulusByZero).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), 1000)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Cannot perform modulus with zero");
        assert_eq!(body["code"], "DOMAIN_ERROR");
    }
}
