use axum::routing::post;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", post(profile::get_profile))
}
