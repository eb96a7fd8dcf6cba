use axum::routing::post;
use axum::Router;

use crate::handlers::delivery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/deliver-lesson", post(delivery::deliver_lesson))
}
