// Player pool endpoints: listing, search, draft and release.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use basketsim_app::players::{self, DraftRequest, ReleaseRequest};
use basketsim_core::model::{PlayerId, PlayerStatus, Position};
use serde::Deserialize;
use serde_json::json;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct PlayerListQuery {
    /// `available`, `drafted`, or `all` (the default).
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSearchQuery {
    #[serde(default)]
    pub q: String,
    pub position: Option<String>,
}

pub fn player_routes() -> Router<AppState> {
    Router::new()
        .route("/api/players", get(player_list_action))
        .route("/api/players/search", get(player_search_action))
        .route("/api/players/draft", post(player_draft_action))
        .route("/api/players/release", post(player_release_action))
        .route("/api/players/{id}", get(player_get_action))
}

async fn player_list_action(
    State(state): State<AppState>,
    Query(query): Query<PlayerListQuery>,
) -> ApiResult<impl IntoResponse> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            PlayerStatus::parse(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown player status: {raw}")))?,
        ),
    };
    Ok(Json(players::list_players(state.ctx.store(), status)?))
}

async fn player_search_action(
    State(state): State<AppState>,
    Query(query): Query<PlayerSearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let position = match query.position.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(
            Position::from_str_pos(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown position: {raw}")))?,
        ),
    };
    let hits = players::search_players(state.ctx.store(), query.q.trim(), position)?;
    Ok(Json(hits))
}

async fn player_get_action(
    State(state): State<AppState>,
    Path(id): Path<PlayerId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(players::player(state.ctx.store(), id)?))
}

async fn player_draft_action(
    State(state): State<AppState>,
    Json(req): Json<DraftRequest>,
) -> ApiResult<impl IntoResponse> {
    let entry = players::draft_player(state.ctx.store(), req)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn player_release_action(
    State(state): State<AppState>,
    Json(req): Json<ReleaseRequest>,
) -> ApiResult<impl IntoResponse> {
    players::release_player(state.ctx.store(), req)?;
    Ok(Json(json!({ "success": true })))
}
