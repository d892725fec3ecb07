use crate::calendar;
use crate::errors::AppError;
use crate::models::{
    CalendarResponse, DeleteRequest, NavigateRequest, NewSubscriptionRequest, Subscription,
    SummaryResponse,
};
use crate::state::AppState;
use crate::stats::build_summary;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let subscriptions = state.store.lock().await.snapshot();
    Html(render_index(&build_summary(&subscriptions)))
}

pub async fn list_subscriptions(State(state): State<AppState>) -> Json<Vec<Subscription>> {
    Json(state.store.lock().await.snapshot())
}

pub async fn add_subscription(
    State(state): State<AppState>,
    Json(payload): Json<NewSubscriptionRequest>,
) -> Result<Json<Subscription>, AppError> {
    let mut store = state.store.lock().await;
    let added = store.add(&payload).map_err(AppError::bad_request)?;
    info!("added subscription {} (id {})", added.name, added.id);
    Ok(Json(added))
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> Json<Vec<Subscription>> {
    let mut store = state.store.lock().await;
    store.remove(payload.id);
    Json(store.snapshot())
}

pub async fn get_calendar(State(state): State<AppState>) -> Json<CalendarResponse> {
    let subscriptions = state.store.lock().await.snapshot();
    let month = *state.displayed_month.lock().await;
    Json(calendar::build_month(&subscriptions, month))
}

pub async fn navigate_calendar(
    State(state): State<AppState>,
    Json(payload): Json<NavigateRequest>,
) -> Result<Json<CalendarResponse>, AppError> {
    if payload.direction != -1 && payload.direction != 1 {
        return Err(AppError::bad_request("direction must be -1 or 1"));
    }

    let subscriptions = state.store.lock().await.snapshot();
    let mut month = state.displayed_month.lock().await;
    *month = month.shifted(payload.direction);
    Ok(Json(calendar::build_month(&subscriptions, *month)))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let subscriptions = state.store.lock().await.snapshot();
    Json(build_summary(&subscriptions))
}
