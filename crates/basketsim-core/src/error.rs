// Domain error kinds shared by the scheduler, simulator, and services.

use thiserror::Error;

use crate::model::{MatchId, OwnerId, PlayerId, TeamId};

/// Recoverable league errors. Every variant maps to a 4xx response at the
/// HTTP layer; none of them are fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    #[error("not enough teams to schedule matches: need at least 2, found {found}")]
    InsufficientTeams { found: usize },

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("match {0} has already been played")]
    AlreadyPlayed(MatchId),

    #[error("team {0} not found")]
    TeamNotFound(TeamId),

    #[error("invalid date `{input}`: expected an ISO-8601 date or timestamp")]
    InvalidDate { input: String },

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("player {0} is not available for draft")]
    PlayerUnavailable(PlayerId),

    #[error("insufficient budget to draft this player: salary {salary}, budget {budget}")]
    InsufficientBudget { budget: i64, salary: i64 },

    #[error("jersey number {number} is already taken on team {team_id}")]
    JerseyNumberTaken { team_id: TeamId, number: u8 },

    #[error("player {player_id} is not on the roster of team {team_id}")]
    PlayerNotOnRoster { team_id: TeamId, player_id: PlayerId },

    #[error("team name `{0}` already exists")]
    DuplicateTeamName(String),

    #[error("owner {0} already has a team")]
    OwnerHasTeam(OwnerId),

    #[error("team name must be at least 2 characters")]
    InvalidTeamName,

    #[error("region must be at least 2 characters")]
    InvalidRegion,
}

impl LeagueError {
    /// Whether this error means the addressed entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LeagueError::MatchNotFound(_)
                | LeagueError::TeamNotFound(_)
                | LeagueError::PlayerNotFound(_)
                | LeagueError::PlayerNotOnRoster { .. }
        )
    }

    /// Whether this error is a conflict with the current stored state
    /// (as opposed to a malformed request).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            LeagueError::AlreadyPlayed(_)
                | LeagueError::PlayerUnavailable(_)
                | LeagueError::JerseyNumberTaken { .. }
                | LeagueError::DuplicateTeamName(_)
                | LeagueError::OwnerHasTeam(_)
        )
    }
}
