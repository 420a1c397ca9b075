use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_action))
}

async fn health_action() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "BasketSim API is running",
        timestamp: Utc::now().to_rfc3339(),
    })
}
