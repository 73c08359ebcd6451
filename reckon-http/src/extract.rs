//! Request extractors that report rejections as [`AppError`] bodies.

use crate::error::AppError;
use axum::extract::FromRequest;

/// JSON body extractor; syntax and content-type failures become
/// `VALIDATION_FAILED` responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
