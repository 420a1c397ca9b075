// Match endpoints: listing, details, scheduling and on-demand simulation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use basketsim_app::matches;
use basketsim_core::league::parse_start_date;
use basketsim_core::model::{Match, MatchId, MatchKind, MatchStatus, TeamId};
use basketsim_core::store::{MatchFilter, DEFAULT_PAGE_SIZE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct MatchListQuery {
    pub page: Option<u32>,
    #[serde(alias = "limit")]
    pub page_size: Option<u32>,
    pub status: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    #[serde(alias = "start_date")]
    pub from: Option<String>,
    #[serde(alias = "country")]
    pub region: Option<String>,
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub include_friendlies: bool,
}

#[derive(Debug, Serialize)]
pub struct RescheduleResponse {
    pub created: usize,
    pub matches: Vec<Match>,
}

pub fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/api/matches", get(match_list_action))
        .route("/api/matches/schedule", post(match_schedule_action))
        .route("/api/matches/reschedule", post(match_reschedule_action))
        .route("/api/matches/{id}", get(match_get_action))
        .route("/api/matches/{id}/simulate", post(match_simulate_action))
}

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

/// `None`, an empty string and `all` all mean "no filter".
fn optional_param<'a>(raw: &'a Option<String>) -> Option<&'a str> {
    match raw.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(value) => Some(value),
    }
}

impl MatchListQuery {
    fn into_filter(self) -> ApiResult<MatchFilter> {
        let status = optional_param(&self.status)
            .map(|raw| {
                MatchStatus::parse(raw)
                    .ok_or_else(|| ApiError::BadRequest(format!("unknown match status: {raw}")))
            })
            .transpose()?;
        let kind = optional_param(&self.kind)
            .map(|raw| {
                MatchKind::parse(raw)
                    .ok_or_else(|| ApiError::BadRequest(format!("unknown match type: {raw}")))
            })
            .transpose()?;
        let from = optional_param(&self.from).map(parse_start_date).transpose()?;
        let region = optional_param(&self.region).map(str::to_string);

        Ok(MatchFilter {
            status,
            kind,
            from,
            region,
            team_id: self.team_id,
            page: self.page.unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

impl ScheduleRequest {
    fn start(&self) -> ApiResult<Option<DateTime<Utc>>> {
        Ok(optional_param(&self.start_date)
            .map(parse_start_date)
            .transpose()?)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn match_list_action(
    State(state): State<AppState>,
    Query(query): Query<MatchListQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = query.into_filter()?;
    Ok(Json(matches::list_matches(state.ctx.store(), filter)?))
}

async fn match_get_action(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(matches::match_details(state.ctx.store(), id)?))
}

async fn match_schedule_action(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> ApiResult<impl IntoResponse> {
    let start = req.start()?;
    let stored = matches::schedule(state.ctx.store(), start, req.include_friendlies)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn match_reschedule_action(
    State(state): State<AppState>,
    Json(req): Json<ScheduleRequest>,
) -> ApiResult<impl IntoResponse> {
    let start = req.start()?;
    let stored = matches::reschedule(state.ctx.store(), start, req.include_friendlies)?;
    Ok(Json(RescheduleResponse {
        created: stored.len(),
        matches: stored,
    }))
}

async fn match_simulate_action(
    State(state): State<AppState>,
    Path(id): Path<MatchId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.ctx.simulate_match(id, Utc::now())?))
}
