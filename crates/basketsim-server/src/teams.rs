// Team endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use basketsim_app::players;
use basketsim_app::teams::{self, NewTeamRequest, TeamUpdate};
use basketsim_core::model::{OwnerId, TeamId};
use serde::Deserialize;

use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct TeamListQuery {
    /// Restrict the listing to the team this owner manages.
    pub owner_id: Option<OwnerId>,
}

pub fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/api/teams", get(team_list_action).post(team_create_action))
        .route(
            "/api/teams/{id}",
            get(team_get_action)
                .put(team_update_action)
                .delete(team_delete_action),
        )
        .route("/api/teams/{id}/roster", get(team_roster_action))
}

async fn team_list_action(
    State(state): State<AppState>,
    Query(query): Query<TeamListQuery>,
) -> ApiResult<impl IntoResponse> {
    let store = state.ctx.store();
    let teams = match query.owner_id {
        Some(owner) => teams::team_for_owner(store, owner)?.into_iter().collect(),
        None => teams::list_teams(store)?,
    };
    Ok(Json(teams))
}

async fn team_create_action(
    State(state): State<AppState>,
    Json(req): Json<NewTeamRequest>,
) -> ApiResult<impl IntoResponse> {
    let team = teams::create_team(state.ctx.store(), &state.ctx.league, req)?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn team_get_action(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(teams::team_details(state.ctx.store(), id)?))
}

async fn team_update_action(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    Json(update): Json<TeamUpdate>,
) -> ApiResult<impl IntoResponse> {
    let team = teams::update_team(state.ctx.store(), &state.ctx.league, id, update)?;
    Ok(Json(team))
}

async fn team_delete_action(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> ApiResult<impl IntoResponse> {
    teams::delete_team(state.ctx.store(), &state.ctx.league, id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn team_roster_action(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(players::roster(state.ctx.store(), id)?))
}
