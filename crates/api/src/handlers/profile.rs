use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use microlearn_core::error::CoreError;
use microlearn_core::lesson::validate_id;
use microlearn_db::repositories::{LessonRepo, ProfileRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::require;
use crate::response::ProfileResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub user_id: Option<String>,
}

/// POST /profile
///
/// The learner's profile summary, progress counters and the number of
/// lessons generated for them so far.
pub async fn get_profile(
    State(state): State<AppState>,
    AppJson(body): AppJson<ProfileBody>,
) -> AppResult<impl IntoResponse> {
    let owner_id = require("userId", body.user_id)?;
    validate_id("userId", &owner_id)?;

    let profile = ProfileRepo::find(&state.pool, &owner_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Learner profile",
            id: owner_id,
        }))?;

    let lesson_count = LessonRepo::count_for_owner(&state.pool, &profile.owner_id).await?;

    Ok(Json(ProfileResponse {
        profile,
        lesson_count,
    }))
}
