use crate::server::{handlers, types::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(handlers::form_page).post(handlers::submit_form))
        .route("/api/predict", post(handlers::predict_json))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_snapshot))
        .with_state(state)
}
