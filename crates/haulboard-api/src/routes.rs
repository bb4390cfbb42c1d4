use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;
use crate::{drivers, messages, schedule};

/// The `/api` surface. Static assets and middleware layers are the
/// binary's concern.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/drivers", get(drivers::list_drivers))
        .route("/api/drivers/add", post(drivers::register_driver))
        .route("/api/drivers/delete", post(drivers::delete_driver))
        .route("/api/schedule", get(schedule::get_schedule))
        .route("/api/schedule", post(schedule::post_schedule))
        .route("/api/history", get(schedule::get_history))
        .route("/api/messages", get(messages::get_messages))
        .route("/api/messages", post(messages::send_message))
        .route("/api/messages/read", post(messages::mark_read))
        .with_state(state)
}
