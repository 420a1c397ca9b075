// JSON API for the league engine.

mod error;
mod health;
mod matches;
mod players;
mod routes;
mod teams;

pub use error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use basketsim_app::LeagueContext;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::routes::ApiRoutes;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<LeagueContext>,
}

impl AppState {
    pub fn new(ctx: Arc<LeagueContext>) -> Self {
        AppState { ctx }
    }
}

/// Build the full API router over `state`.
pub fn build_router(state: AppState) -> Router {
    ApiRoutes::create()
        .layer(ServiceBuilder::new().layer(CatchPanicLayer::custom(|_err| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(serde_json::json!({ "error": "internal server error" })),
            )
                .into_response()
        })))
        .with_state(state)
}
