use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::require;
use crate::response::DeliveryResponse;
use crate::state::AppState;

/// Message returned once the daily lesson email was accepted.
pub const DELIVERED_MESSAGE: &str = "Lesson delivered successfully";

/// Body of `POST /deliver-lesson`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverLessonBody {
    pub user_id: Option<String>,
}

/// POST /deliver-lesson
///
/// Generate today's short lesson on the learner's first skill gap and email
/// it. Returns 503 when no mailer is configured.
pub async fn deliver_lesson(
    State(state): State<AppState>,
    AppJson(body): AppJson<DeliverLessonBody>,
) -> AppResult<impl IntoResponse> {
    let owner_id = require("userId", body.user_id)?;

    let receipt = state.daily_sender()?.deliver(&owner_id).await?;

    Ok(Json(DeliveryResponse {
        message: DELIVERED_MESSAGE,
        topic: receipt.topic,
        email: receipt.email,
    }))
}
