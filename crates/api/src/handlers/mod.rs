pub mod delivery;
pub mod lessons;
pub mod onboarding;
pub mod profile;

use crate::error::{AppError, AppResult};

/// Unwrap a required string field from a request body, rejecting blanks.
pub(crate) fn require(field: &str, value: Option<String>) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}
