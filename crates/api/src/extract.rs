//! Request extractors whose rejections use the JSON error body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` whose rejection (bad syntax, wrong field types, missing
/// content type) becomes a 400 [`AppError::BadRequest`] instead of axum's
/// plain-text 415/422.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
