//! Handlers for lesson generation, listing and completion.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use microlearn_pipeline::LessonRequest;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::require;
use crate::response::{FinishLessonResponse, LessonResponse, LessonsResponse};
use crate::state::AppState;

/// Message returned alongside the successor lesson.
pub const FINISH_MESSAGE: &str = "Lesson marked as done and new lesson generated";

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /generate-lesson`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLessonBody {
    pub user_id: Option<String>,
    pub current_level: Option<String>,
    #[serde(default)]
    pub skill_gaps: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub goals: Option<String>,
}

/// Body of `POST /latest-lesson`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestLessonBody {
    pub user_id: Option<String>,
}

/// Body of `POST /finish-lesson`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLessonBody {
    pub user_id: Option<String>,
    #[serde(rename = "lessonID")]
    pub lesson_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /generate-lesson
///
/// Generate a one-off lesson from explicit learner attributes. The lesson is
/// returned but not stored.
pub async fn generate_lesson(
    State(state): State<AppState>,
    AppJson(body): AppJson<GenerateLessonBody>,
) -> AppResult<impl IntoResponse> {
    let request = LessonRequest {
        owner_id: require("userId", body.user_id)?,
        current_level: require("currentLevel", body.current_level)?,
        skill_gaps: body.skill_gaps,
        interests: body.interests,
        goals: require("goals", body.goals)?,
    };

    let lesson = state.workflow().preview_lesson(&request).await?;

    Ok(Json(LessonResponse { lesson }))
}

/// POST /latest-lesson
///
/// All unfinished lessons for a learner, oldest first.
pub async fn latest_lessons(
    State(state): State<AppState>,
    AppJson(body): AppJson<LatestLessonBody>,
) -> AppResult<impl IntoResponse> {
    let owner_id = require("userId", body.user_id)?;

    let lessons = state.workflow().unfinished_lessons(&owner_id).await?;

    Ok(Json(LessonsResponse { lessons }))
}

/// POST /finish-lesson
///
/// Mark a lesson done and generate the learner's next one.
pub async fn finish_lesson(
    State(state): State<AppState>,
    AppJson(body): AppJson<FinishLessonBody>,
) -> AppResult<impl IntoResponse> {
    let owner_id = require("userId", body.user_id)?;
    let lesson_id = require("lessonID", body.lesson_id)?;

    let new_lesson = state
        .workflow()
        .finish_and_advance(&owner_id, &lesson_id)
        .await?;

    Ok(Json(FinishLessonResponse {
        message: FINISH_MESSAGE,
        new_lesson,
    }))
}
