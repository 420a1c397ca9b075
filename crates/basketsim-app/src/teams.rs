// Team lifecycle and the region-size invariant maintained around it.

use basketsim_core::league::plan_backfill;
use basketsim_core::model::{NewTeam, OwnerId, RosterEntry, Team, TeamId};
use basketsim_core::store::LeagueStore;
use basketsim_core::LeagueError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LeagueConfig;
use crate::error::ServiceResult;

/// Shortest accepted team name and region, in characters after trimming.
const MIN_LABEL_LEN: usize = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeamRequest {
    pub name: String,
    #[serde(alias = "country")]
    pub region: String,
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    #[serde(alias = "country")]
    pub region: Option<String>,
}

/// A team together with its roster.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetails {
    #[serde(flatten)]
    pub team: Team,
    pub roster: Vec<RosterEntry>,
}

// ---------------------------------------------------------------------------
// Region maintenance
// ---------------------------------------------------------------------------

/// Fill `region` with bot teams until it holds at least `minimum` teams.
///
/// Returns the bots created. A region already at or above the minimum is
/// left untouched, so repeated calls write nothing.
pub fn ensure_minimum_region_size(
    store: &dyn LeagueStore,
    region: &str,
    minimum: usize,
    bot_budget: i64,
) -> ServiceResult<Vec<Team>> {
    let current = store.count_teams_in_region(region)?;
    if current >= minimum {
        return Ok(Vec::new());
    }

    let names = plan_backfill(region, current, minimum, store.team_names()?);
    let bots: Vec<NewTeam> = names
        .into_iter()
        .map(|name| NewTeam::bot(name, region, bot_budget))
        .collect();
    let created = store.insert_teams(&bots)?;

    info!(
        "backfilled region {} with {} bot teams ({} -> {})",
        region,
        created.len(),
        current,
        current + created.len()
    );
    Ok(created)
}

fn backfill(store: &dyn LeagueStore, cfg: &LeagueConfig, region: &str) -> ServiceResult<Vec<Team>> {
    ensure_minimum_region_size(store, region, cfg.min_region_size, cfg.bot_budget)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

pub fn create_team(
    store: &dyn LeagueStore,
    cfg: &LeagueConfig,
    req: NewTeamRequest,
) -> ServiceResult<Team> {
    if let Some(owner) = req.owner_id {
        if store.team_for_owner(owner)?.is_some() {
            return Err(LeagueError::OwnerHasTeam(owner).into());
        }
    }

    let name = validated_name(&req.name)?;
    let region = validated_region(&req.region)?;

    if store.team_by_name(name)?.is_some() {
        return Err(LeagueError::DuplicateTeamName(name.to_string()).into());
    }

    let team = store.insert_team(&NewTeam::owned(
        name,
        region,
        req.owner_id,
        cfg.default_team_budget,
    ))?;
    info!("created team {} ({}) in {}", team.name, team.id, team.region);

    backfill(store, cfg, &team.region)?;
    Ok(team)
}

pub fn update_team(
    store: &dyn LeagueStore,
    cfg: &LeagueConfig,
    id: TeamId,
    update: TeamUpdate,
) -> ServiceResult<Team> {
    let current = store.team(id)?.ok_or(LeagueError::TeamNotFound(id))?;

    let name = match &update.name {
        Some(raw) => {
            let name = validated_name(raw)?;
            if let Some(other) = store.team_by_name(name)? {
                if other.id != id {
                    return Err(LeagueError::DuplicateTeamName(name.to_string()).into());
                }
            }
            name.to_string()
        }
        None => current.name.clone(),
    };
    let region = match &update.region {
        Some(raw) => validated_region(raw)?.to_string(),
        None => current.region.clone(),
    };

    store.update_team(id, &name, &region)?;
    debug!("updated team {id}: name={name}, region={region}");

    if region != current.region {
        backfill(store, cfg, &current.region)?;
        backfill(store, cfg, &region)?;
    }

    store
        .team(id)?
        .ok_or_else(|| LeagueError::TeamNotFound(id).into())
}

/// Delete a team. Its players return to the pool and its matches are removed.
pub fn delete_team(store: &dyn LeagueStore, cfg: &LeagueConfig, id: TeamId) -> ServiceResult<()> {
    let team = store.team(id)?.ok_or(LeagueError::TeamNotFound(id))?;
    store.delete_team(id)?;
    info!("deleted team {} ({})", team.name, team.id);

    backfill(store, cfg, &team.region)?;
    Ok(())
}

/// Teams ordered by wins, best first.
pub fn list_teams(store: &dyn LeagueStore) -> ServiceResult<Vec<Team>> {
    Ok(store.standings()?)
}

pub fn team_details(store: &dyn LeagueStore, id: TeamId) -> ServiceResult<TeamDetails> {
    let team = store.team(id)?.ok_or(LeagueError::TeamNotFound(id))?;
    let roster = store.roster(id)?;
    Ok(TeamDetails { team, roster })
}

pub fn team_for_owner(store: &dyn LeagueStore, owner_id: OwnerId) -> ServiceResult<Option<Team>> {
    Ok(store.team_for_owner(owner_id)?)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validated_name(raw: &str) -> Result<&str, LeagueError> {
    let name = raw.trim();
    if name.chars().count() < MIN_LABEL_LEN {
        return Err(LeagueError::InvalidTeamName);
    }
    Ok(name)
}

fn validated_region(raw: &str) -> Result<&str, LeagueError> {
    let region = raw.trim();
    if region.chars().count() < MIN_LABEL_LEN {
        return Err(LeagueError::InvalidRegion);
    }
    Ok(region)
}
