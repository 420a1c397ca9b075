// Player pool queries plus draft and release against team budgets.

use basketsim_core::model::{Player, PlayerId, PlayerStatus, Position, RosterEntry, RosterSlot, TeamId};
use basketsim_core::store::{DraftOutcome, LeagueStore};
use basketsim_core::LeagueError;
use serde::Deserialize;
use tracing::info;

use crate::error::ServiceResult;

/// Maximum number of search hits returned.
pub const SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Deserialize)]
pub struct DraftRequest {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub position: Position,
    pub number: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRequest {
    pub team_id: TeamId,
    pub player_id: PlayerId,
}

/// Players with the given status (all when `None`), best overall first.
pub fn list_players(
    store: &dyn LeagueStore,
    status: Option<PlayerStatus>,
) -> ServiceResult<Vec<Player>> {
    Ok(store.list_players(status)?)
}

pub fn player(store: &dyn LeagueStore, id: PlayerId) -> ServiceResult<Player> {
    Ok(store.player(id)?.ok_or(LeagueError::PlayerNotFound(id))?)
}

pub fn search_players(
    store: &dyn LeagueStore,
    query: &str,
    position: Option<Position>,
) -> ServiceResult<Vec<Player>> {
    Ok(store.search_players(query, position, SEARCH_LIMIT)?)
}

/// Draft an available player onto a team, charging their salary.
///
/// The budget and jersey checks run in the same transaction as the write,
/// so concurrent drafts cannot overdraw a team or share a number.
pub fn draft_player(store: &dyn LeagueStore, req: DraftRequest) -> ServiceResult<RosterEntry> {
    let player = store
        .player(req.player_id)?
        .ok_or(LeagueError::PlayerNotFound(req.player_id))?;
    if player.status != PlayerStatus::Available {
        return Err(LeagueError::PlayerUnavailable(player.id).into());
    }

    let team = store
        .team(req.team_id)?
        .ok_or(LeagueError::TeamNotFound(req.team_id))?;
    let slot = RosterSlot {
        team_id: team.id,
        player_id: player.id,
        position: req.position,
        number: req.number,
    };
    match store.draft_player(&slot, player.salary)? {
        DraftOutcome::Drafted => {}
        DraftOutcome::PlayerUnavailable => {
            return Err(LeagueError::PlayerUnavailable(player.id).into())
        }
        DraftOutcome::TeamNotFound => return Err(LeagueError::TeamNotFound(team.id).into()),
        DraftOutcome::InsufficientBudget => {
            let budget = store.team(team.id)?.map_or(team.budget, |t| t.budget);
            return Err(LeagueError::InsufficientBudget {
                budget,
                salary: player.salary,
            }
            .into());
        }
        DraftOutcome::JerseyNumberTaken => {
            return Err(LeagueError::JerseyNumberTaken {
                team_id: team.id,
                number: req.number,
            }
            .into())
        }
    }
    info!(
        "{} drafted {} as {} #{} for {}",
        team.name,
        player.full_name(),
        req.position,
        req.number,
        player.salary
    );

    let player = store
        .player(player.id)?
        .ok_or(LeagueError::PlayerNotFound(player.id))?;
    Ok(RosterEntry {
        position: slot.position,
        number: slot.number,
        player,
    })
}

/// Release a rostered player back to the pool, refunding their salary.
pub fn release_player(store: &dyn LeagueStore, req: ReleaseRequest) -> ServiceResult<()> {
    let not_on_roster = LeagueError::PlayerNotOnRoster {
        team_id: req.team_id,
        player_id: req.player_id,
    };
    if store.roster_slot(req.team_id, req.player_id)?.is_none() {
        return Err(not_on_roster.into());
    }
    let player = store
        .player(req.player_id)?
        .ok_or(LeagueError::PlayerNotFound(req.player_id))?;

    if !store.release_player(req.team_id, req.player_id, player.salary)? {
        return Err(not_on_roster.into());
    }
    info!("team {} released {}", req.team_id, player.full_name());
    Ok(())
}

/// A team's roster ordered by jersey number.
pub fn roster(store: &dyn LeagueStore, team_id: TeamId) -> ServiceResult<Vec<RosterEntry>> {
    if store.team(team_id)?.is_none() {
        return Err(LeagueError::TeamNotFound(team_id).into());
    }
    Ok(store.roster(team_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::error::ServiceError;
    use basketsim_core::model::{NewPlayer, NewTeam, SkillRatings, Team};

    fn setup(budget: i64) -> (Database, Team, Vec<Player>) {
        let db = Database::open(":memory:").unwrap();
        let team = db
            .insert_team(&NewTeam::owned("Tigers", "Spain", Some(1), budget))
            .unwrap();
        let players: Vec<NewPlayer> = [("Ana", "Ruiz", 82u8, 48_000i64), ("Bo", "Lind", 75, 45_000)]
            .iter()
            .map(|&(first, last, overall, salary)| NewPlayer {
                first_name: first.into(),
                last_name: last.into(),
                age: 24,
                position: Position::SmallForward,
                skills: SkillRatings::default(),
                overall,
                salary,
            })
            .collect();
        db.insert_players(&players).unwrap();
        let stored = db.list_players(None).unwrap();
        (db, team, stored)
    }

    fn draft(team: &Team, player: &Player, number: u8) -> DraftRequest {
        DraftRequest {
            team_id: team.id,
            player_id: player.id,
            position: player.position,
            number,
        }
    }

    fn league_err(err: ServiceError) -> LeagueError {
        match err {
            ServiceError::League(e) => e,
            other => panic!("expected league error, got {other}"),
        }
    }

    #[test]
    fn draft_deducts_salary_and_release_refunds() {
        let (db, team, players) = setup(100_000);
        let ana = &players[0];

        let entry = draft_player(&db, draft(&team, ana, 7)).unwrap();
        assert_eq!(entry.number, 7);
        assert_eq!(entry.player.status, PlayerStatus::Drafted);
        assert_eq!(db.team(team.id).unwrap().unwrap().budget, 52_000);

        release_player(
            &db,
            ReleaseRequest {
                team_id: team.id,
                player_id: ana.id,
            },
        )
        .unwrap();
        assert_eq!(db.team(team.id).unwrap().unwrap().budget, 100_000);
        assert_eq!(player(&db, ana.id).unwrap().status, PlayerStatus::Available);
    }

    #[test]
    fn drafted_player_is_unavailable() {
        let (db, team, players) = setup(200_000);
        draft_player(&db, draft(&team, &players[0], 7)).unwrap();
        let err = draft_player(&db, draft(&team, &players[0], 8)).unwrap_err();
        assert_eq!(league_err(err), LeagueError::PlayerUnavailable(players[0].id));
    }

    #[test]
    fn budget_must_cover_salary() {
        let (db, team, players) = setup(47_999);
        let err = draft_player(&db, draft(&team, &players[0], 1)).unwrap_err();
        assert_eq!(
            league_err(err),
            LeagueError::InsufficientBudget {
                budget: 47_999,
                salary: 48_000
            }
        );
        // The cheaper player fits.
        draft_player(&db, draft(&team, &players[1], 1)).unwrap();
        assert_eq!(db.team(team.id).unwrap().unwrap().budget, 2_999);
    }

    #[test]
    fn successive_drafts_never_overdraw() {
        let (db, team, players) = setup(90_000);
        draft_player(&db, draft(&team, &players[0], 1)).unwrap();
        let err = draft_player(&db, draft(&team, &players[1], 2)).unwrap_err();
        assert_eq!(
            league_err(err),
            LeagueError::InsufficientBudget {
                budget: 42_000,
                salary: 45_000
            }
        );
        assert_eq!(db.team(team.id).unwrap().unwrap().budget, 42_000);
        assert_eq!(player(&db, players[1].id).unwrap().status, PlayerStatus::Available);
    }

    #[test]
    fn jersey_numbers_are_unique_per_team() {
        let (db, team, players) = setup(200_000);
        draft_player(&db, draft(&team, &players[0], 23)).unwrap();
        let err = draft_player(&db, draft(&team, &players[1], 23)).unwrap_err();
        assert_eq!(
            league_err(err),
            LeagueError::JerseyNumberTaken {
                team_id: team.id,
                number: 23
            }
        );
    }

    #[test]
    fn missing_entities_are_reported() {
        let (db, team, players) = setup(100_000);
        let err = draft_player(
            &db,
            DraftRequest {
                team_id: team.id,
                player_id: 999,
                position: Position::Center,
                number: 1,
            },
        )
        .unwrap_err();
        assert_eq!(league_err(err), LeagueError::PlayerNotFound(999));

        let err = draft_player(
            &db,
            DraftRequest {
                team_id: 999,
                player_id: players[0].id,
                position: Position::Center,
                number: 1,
            },
        )
        .unwrap_err();
        assert_eq!(league_err(err), LeagueError::TeamNotFound(999));

        let err = release_player(
            &db,
            ReleaseRequest {
                team_id: team.id,
                player_id: players[0].id,
            },
        )
        .unwrap_err();
        assert!(league_err(err).is_not_found());

        assert_eq!(league_err(roster(&db, 999).unwrap_err()), LeagueError::TeamNotFound(999));
    }

    #[test]
    fn search_and_list_use_store_order() {
        let (db, _team, _players) = setup(100_000);
        let hits = search_players(&db, "ru", None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Ruiz");
        assert!(search_players(&db, "ru", Some(Position::Center)).unwrap().is_empty());

        let all = list_players(&db, Some(PlayerStatus::Available)).unwrap();
        assert_eq!(all[0].overall, 82);
    }
}
