use crate::models::user::User;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};

/// Extractor for the authenticated user
///
/// This extractor gets the authenticated user from the request extensions
/// without consuming the request body.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(StatusCode::UNAUTHORIZED)?
            .clone();

        Ok(AuthUser(user))
    }
}

/// The API key the current request was authenticated with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(pub String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ApiKey
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ApiKey>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
