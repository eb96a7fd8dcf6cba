pub mod delivery;
pub mod health;
pub mod lessons;
pub mod onboarding;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the lesson API route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /generate-lesson          one-off lesson preview (POST)
/// /latest-lesson            unfinished lessons for a learner (POST)
/// /finish-lesson            complete a lesson, generate the next (POST)
///
/// /onboard-chat             answers in, first lesson out (POST)
/// /onboarding/questions     the scripted chat questions (GET)
///
/// /profile                  learner profile and progress (POST)
/// /deliver-lesson           email today's short lesson (POST)
/// ```
///
/// Paths and field names follow the existing web client. Learner ids are
/// taken as sent; no `USER#` prefix is added or stripped.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(lessons::router())
        .merge(onboarding::router())
        .merge(profile::router())
        .merge(delivery::router())
}
