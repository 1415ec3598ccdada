use axum::routing::{get, patch, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{
    cancel_event, create_event, delete_event, get_event, list_events, reschedule_event,
    update_event, AppState,
};

/// Mounts every event endpoint under `/api/v1`.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/event",
            get(get_event).post(create_event).delete(delete_event),
        )
        .route("/api/v1/event/cancel", patch(cancel_event))
        .route("/api/v1/event/details", put(update_event))
        .route("/api/v1/event/reschedule", patch(reschedule_event))
        .route("/api/v1/events", get(list_events))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}
