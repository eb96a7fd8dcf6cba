use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use microlearn_core::lesson::DEFAULT_LEVEL;
use microlearn_core::onboarding::ONBOARDING_QUESTIONS;
use microlearn_pipeline::validate_email;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::require;
use crate::response::{OnboardingResponse, QuestionsResponse};
use crate::state::AppState;

/// Message returned alongside the first lesson.
pub const ONBOARDED_MESSAGE: &str = "Lesson generated and saved successfully";

/// Body of `POST /onboard-chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardChatBody {
    pub user_id: Option<String>,
    pub answers: Option<Vec<String>>,
    pub current_level: Option<String>,
    /// Optional address for the daily emailed lesson.
    pub email: Option<String>,
}

/// GET /onboarding/questions
pub async fn list_questions() -> impl IntoResponse {
    Json(QuestionsResponse {
        questions: &ONBOARDING_QUESTIONS,
    })
}

/// POST /onboard-chat
///
/// Turn the four onboarding answers into the learner's first lesson.
/// `currentLevel` defaults to Beginner when omitted. An `email`, if sent, is
/// checked before generation and stored once the profile exists.
pub async fn onboard_chat(
    State(state): State<AppState>,
    AppJson(body): AppJson<OnboardChatBody>,
) -> AppResult<impl IntoResponse> {
    let owner_id = require("userId", body.user_id)?;
    let answers = body
        .answers
        .ok_or_else(|| AppError::BadRequest("Please provide all 4 answers".into()))?;
    let current_level = body
        .current_level
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let email = body.email.filter(|e| !e.trim().is_empty());
    if let Some(email) = &email {
        validate_email(email)?;
    }

    let workflow = state.workflow();
    let lesson = workflow
        .generate_first_lesson(&owner_id, &answers, &current_level)
        .await?;
    if let Some(email) = &email {
        workflow.set_email(&owner_id, email).await?;
    }

    Ok(Json(OnboardingResponse {
        message: ONBOARDED_MESSAGE,
        lesson,
    }))
}
