use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/subscriptions",
            get(handlers::list_subscriptions).post(handlers::add_subscription),
        )
        .route("/api/subscriptions/delete", post(handlers::delete_subscription))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/navigate", post(handlers::navigate_calendar))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
