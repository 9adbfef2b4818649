//! Route handlers

use axum::{
    routing::{get, post},
    Json, Router,
};

use crate::AppState;

pub mod dashboard;
pub mod job_cards;
pub mod vehicles;

/// Build the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::home))
        .route("/health", get(health))
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route("/vehicles/export", get(vehicles::export))
        .route("/vehicles/:id", post(vehicles::edit))
        .route("/vehicles/:id/status", post(vehicles::status))
        .route("/vehicles/:id/delete", post(vehicles::delete))
        .route("/jobcards", get(job_cards::list).post(job_cards::create))
        .route("/jobcards/:id/status", post(job_cards::status))
        .route("/jobcards/:id/delete", post(job_cards::delete))
}

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
