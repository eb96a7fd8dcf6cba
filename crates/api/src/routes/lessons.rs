use axum::routing::post;
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Lesson routes.
///
/// ```text
/// POST /generate-lesson   -> generate_lesson
/// POST /latest-lesson     -> latest_lessons
/// POST /finish-lesson     -> finish_lesson
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-lesson", post(lessons::generate_lesson))
        .route("/latest-lesson", post(lessons::latest_lessons))
        .route("/finish-lesson", post(lessons::finish_lesson))
}
