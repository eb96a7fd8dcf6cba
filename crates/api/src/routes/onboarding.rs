use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes.
///
/// ```text
/// GET  /onboarding/questions  -> list_questions
/// POST /onboard-chat          -> onboard_chat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/onboarding/questions", get(onboarding::list_questions))
        .route("/onboard-chat", post(onboarding::onboard_chat))
}
