// Scheduling, simulation, and listing of matches.

use basketsim_core::league::generate_fixtures;
use basketsim_core::model::{Match, MatchId, MatchStatus};
use basketsim_core::sim::{MatchSimulator, SimulatedResult};
use basketsim_core::store::{LeagueStore, MatchFilter, MatchPage};
use basketsim_core::LeagueError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::error::ServiceResult;
use crate::teams::{team_details, TeamDetails};

/// A match with both sides and their rosters. A side is `None` if its team
/// no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDetails {
    #[serde(flatten)]
    pub game: Match,
    pub home_team: Option<TeamDetails>,
    pub away_team: Option<TeamDetails>,
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// Generate fixtures for every team (by id ascending) and persist them.
///
/// Returns the stored matches in emission order.
pub fn schedule(
    store: &dyn LeagueStore,
    start_date: Option<DateTime<Utc>>,
    include_friendlies: bool,
) -> ServiceResult<Vec<Match>> {
    let teams = store.list_teams()?;
    let fixtures = generate_fixtures(&teams, start_date, include_friendlies)?;
    let stored = store.insert_fixtures(&fixtures)?;
    info!(
        "scheduled {} matches for {} teams (friendlies: {})",
        stored.len(),
        teams.len(),
        include_friendlies
    );
    Ok(stored)
}

/// Drop every existing match and schedule afresh.
///
/// The old schedule is replaced in a single transaction, so any failure
/// (too few teams, or a team vanishing mid-way) leaves it in place.
pub fn reschedule(
    store: &dyn LeagueStore,
    start_date: Option<DateTime<Utc>>,
    include_friendlies: bool,
) -> ServiceResult<Vec<Match>> {
    let teams = store.list_teams()?;
    let fixtures = generate_fixtures(&teams, start_date, include_friendlies)?;
    let stored = store.replace_matches(&fixtures)?;
    info!("rescheduled: created {} matches", stored.len());
    Ok(stored)
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Simulate match `id` and record the result.
///
/// Losing a race to another simulation of the same match is reported as
/// `AlreadyPlayed`, and nothing is written.
pub fn simulate_match<R: Rng + ?Sized>(
    store: &dyn LeagueStore,
    simulator: &MatchSimulator,
    id: MatchId,
    rng: &mut R,
    now: DateTime<Utc>,
) -> ServiceResult<SimulatedResult> {
    let game = store.get_match(id)?.ok_or(LeagueError::MatchNotFound(id))?;
    if game.status == MatchStatus::Played {
        return Err(LeagueError::AlreadyPlayed(id).into());
    }

    let home = store.rated_roster(game.home_team_id)?;
    let away = store.rated_roster(game.away_team_id)?;
    let result = simulator.simulate(&game, &home, &away, rng, now)?;

    if !store.record_result(&result)? {
        return Err(LeagueError::AlreadyPlayed(id).into());
    }
    info!(
        "match {}: {} {} - {} {} ({:?})",
        id, game.home_team_id, result.home_score, result.away_score, game.away_team_id, result.outcome
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

pub fn list_matches(store: &dyn LeagueStore, filter: MatchFilter) -> ServiceResult<MatchPage> {
    Ok(store.list_matches(&filter.normalized())?)
}

pub fn match_details(store: &dyn LeagueStore, id: MatchId) -> ServiceResult<MatchDetails> {
    let game = store.get_match(id)?.ok_or(LeagueError::MatchNotFound(id))?;
    let side = |team_id| match team_details(store, team_id) {
        Ok(details) => Ok(Some(details)),
        Err(e) if matches!(e.league(), Some(LeagueError::TeamNotFound(_))) => Ok(None),
        Err(e) => Err(e),
    };
    let home_team = side(game.home_team_id)?;
    let away_team = side(game.away_team_id)?;
    Ok(MatchDetails {
        game,
        home_team,
        away_team,
    })
}
