// Persistence port: everything the league services read and write.

use std::collections::HashSet;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Fixture, Match, MatchId, MatchKind, MatchStatus, NewPlayer, NewTeam, OwnerId, Player,
    PlayerId, PlayerStatus, Position, RatedPlayer, RosterEntry, RosterSlot, Team, TeamId,
};
use crate::sim::SimulatedResult;

/// Largest page a match listing will return.
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// Match listing
// ---------------------------------------------------------------------------

/// Filters and pagination for listing matches. `None` means "any".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFilter {
    pub status: Option<MatchStatus>,
    pub kind: Option<MatchKind>,
    /// Only matches dated at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only matches where either side belongs to this region.
    pub region: Option<String>,
    /// Only matches involving this team.
    pub team_id: Option<TeamId>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for MatchFilter {
    fn default() -> Self {
        MatchFilter {
            status: None,
            kind: None,
            from: None,
            region: None,
            team_id: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MatchFilter {
    /// Clamp pagination into range: page at least 1, page size 1..=100.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// One page of a match listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPage {
    pub data: Vec<Match>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// What a draft transaction did. Anything but `Drafted` wrote nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOutcome {
    Drafted,
    PlayerUnavailable,
    TeamNotFound,
    InsufficientBudget,
    JerseyNumberTaken,
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Storage operations backing the league services.
///
/// Multi-row writes (`insert_fixtures`, `replace_matches`, `draft_player`,
/// `release_player`, `delete_team`, `record_result`) must be atomic.
pub trait LeagueStore: Send + Sync {
    // -- Teams --

    /// All teams ordered by id ascending.
    fn list_teams(&self) -> Result<Vec<Team>>;
    /// All teams ordered by wins descending, then id.
    fn standings(&self) -> Result<Vec<Team>>;
    fn team(&self, id: TeamId) -> Result<Option<Team>>;
    fn team_by_name(&self, name: &str) -> Result<Option<Team>>;
    fn team_for_owner(&self, owner_id: OwnerId) -> Result<Option<Team>>;
    fn team_names(&self) -> Result<HashSet<String>>;
    fn count_teams_in_region(&self, region: &str) -> Result<usize>;
    fn insert_team(&self, team: &NewTeam) -> Result<Team>;
    fn insert_teams(&self, teams: &[NewTeam]) -> Result<Vec<Team>>;
    fn update_team(&self, id: TeamId, name: &str, region: &str) -> Result<()>;
    /// Delete a team together with its matches, returning its players to the pool.
    fn delete_team(&self, id: TeamId) -> Result<()>;

    // -- Players --

    fn count_players(&self) -> Result<usize>;
    fn insert_players(&self, players: &[NewPlayer]) -> Result<usize>;
    /// Players ordered by overall descending.
    fn list_players(&self, status: Option<PlayerStatus>) -> Result<Vec<Player>>;
    fn player(&self, id: PlayerId) -> Result<Option<Player>>;
    /// Case-insensitive substring match on first or last name.
    fn search_players(
        &self,
        query: &str,
        position: Option<Position>,
        limit: usize,
    ) -> Result<Vec<Player>>;

    // -- Rosters --

    /// Insert the slot, mark the player drafted and charge `salary` to the team.
    ///
    /// Availability, the budget and the jersey number are checked in that
    /// order inside the transaction. The first one that fails is reported
    /// and the transaction rolls back.
    fn draft_player(&self, slot: &RosterSlot, salary: i64) -> Result<DraftOutcome>;
    /// Remove the slot, mark the player available and refund `salary`.
    ///
    /// Returns `false` if the player is not on the team's roster.
    fn release_player(&self, team_id: TeamId, player_id: PlayerId, salary: i64) -> Result<bool>;
    fn roster_slot(&self, team_id: TeamId, player_id: PlayerId) -> Result<Option<RosterSlot>>;
    /// Roster ordered by jersey number.
    fn roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>>;

    fn rated_roster(&self, team_id: TeamId) -> Result<Vec<RatedPlayer>> {
        Ok(self
            .roster(team_id)?
            .iter()
            .map(|entry| entry.player.rated())
            .collect())
    }

    // -- Matches --

    /// Persist fixtures in one transaction, returning them in input order.
    fn insert_fixtures(&self, fixtures: &[Fixture]) -> Result<Vec<Match>>;
    /// Delete every match and persist `fixtures` in their place, all in one
    /// transaction. On error the previous schedule is left untouched.
    fn replace_matches(&self, fixtures: &[Fixture]) -> Result<Vec<Match>>;
    fn get_match(&self, id: MatchId) -> Result<Option<Match>>;
    /// Scheduled matches dated at or before `now`, in id order.
    fn due_matches(&self, now: DateTime<Utc>) -> Result<Vec<Match>>;
    fn list_matches(&self, filter: &MatchFilter) -> Result<MatchPage>;

    /// Apply a result if the match is still scheduled.
    ///
    /// The status check, the score write and both record updates happen in
    /// one transaction. Returns `false` without writing anything when the
    /// match was already played.
    fn record_result(&self, result: &SimulatedResult) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_pagination_is_clamped() {
        let f = MatchFilter {
            page: 0,
            page_size: 500,
            ..MatchFilter::default()
        }
        .normalized();
        assert_eq!((f.page, f.page_size), (1, 100));

        let f = MatchFilter {
            page: 3,
            page_size: 0,
            ..MatchFilter::default()
        }
        .normalized();
        assert_eq!((f.page, f.page_size), (3, 1));
        assert_eq!(f.offset(), 2);
    }

    #[test]
    fn default_filter_is_first_page_of_ten() {
        let f = MatchFilter::default();
        assert_eq!((f.page, f.page_size), (1, 10));
        assert_eq!(f.offset(), 0);
    }
}
