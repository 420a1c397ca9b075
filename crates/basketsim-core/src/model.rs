// League entities: teams, players, roster slots, matches, and fixtures.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TeamId = i64;
pub type PlayerId = i64;
pub type MatchId = i64;
/// Opaque reference to the user owning a team. Bot teams have none.
pub type OwnerId = i64;

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// A persisted team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    /// Display name, unique across all teams.
    pub name: String,
    /// League region (country). Never empty.
    pub region: String,
    /// Owning user, `None` for bot teams.
    pub owner_id: Option<OwnerId>,
    /// Remaining salary budget.
    pub budget: i64,
    pub wins: u32,
    pub losses: u32,
}

impl Team {
    /// Bot teams are the unowned teams synthesized to fill out a region.
    pub fn is_bot(&self) -> bool {
        self.owner_id.is_none()
    }
}

/// A team that has not been stored yet. Records start at 0-0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub region: String,
    pub owner_id: Option<OwnerId>,
    pub budget: i64,
}

impl NewTeam {
    pub fn owned(name: &str, region: &str, owner_id: Option<OwnerId>, budget: i64) -> Self {
        NewTeam {
            name: name.to_string(),
            region: region.to_string(),
            owner_id,
            budget,
        }
    }

    pub fn bot(name: String, region: &str, budget: i64) -> Self {
        NewTeam {
            name,
            region: region.to_string(),
            owner_id: None,
            budget,
        }
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Basketball positions used for players and roster slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "PG")]
    PointGuard,
    #[serde(rename = "SG")]
    ShootingGuard,
    #[serde(rename = "SF")]
    SmallForward,
    #[serde(rename = "PF")]
    PowerForward,
    #[serde(rename = "C")]
    Center,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::PointGuard,
        Position::ShootingGuard,
        Position::SmallForward,
        Position::PowerForward,
        Position::Center,
    ];

    /// Parse a position abbreviation ("PG", "sg", ...) or its long form.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PG" | "POINT GUARD" => Some(Position::PointGuard),
            "SG" | "SHOOTING GUARD" => Some(Position::ShootingGuard),
            "SF" | "SMALL FORWARD" => Some(Position::SmallForward),
            "PF" | "POWER FORWARD" => Some(Position::PowerForward),
            "C" | "CENTER" => Some(Position::Center),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }

    /// Conventional numbering, 1 (PG) through 5 (C).
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::PointGuard => 1,
            Position::ShootingGuard => 2,
            Position::SmallForward => 3,
            Position::PowerForward => 4,
            Position::Center => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Whether a player can be drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Available,
    Drafted,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerStatus::Available => "available",
            PlayerStatus::Drafted => "drafted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(PlayerStatus::Available),
            "drafted" => Some(PlayerStatus::Drafted),
            _ => None,
        }
    }
}

/// Skill ratings, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillRatings {
    pub speed: u8,
    pub strength: u8,
    pub shooting: u8,
    pub defense: u8,
    pub stamina: u8,
}

/// A persisted player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub position: Position,
    #[serde(flatten)]
    pub skills: SkillRatings,
    /// Overall rating (0-100); the only input to team strength.
    pub overall: u8,
    pub salary: i64,
    pub status: PlayerStatus,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn rated(&self) -> RatedPlayer {
        RatedPlayer {
            player_id: self.id,
            overall: f64::from(self.overall),
        }
    }
}

/// A player record to be imported into the pool. Starts out `available`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub position: Position,
    #[serde(flatten)]
    pub skills: SkillRatings,
    pub overall: u8,
    pub salary: i64,
}

/// The simulator's view of a rostered player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatedPlayer {
    pub player_id: PlayerId,
    pub overall: f64,
}

// ---------------------------------------------------------------------------
// Rosters
// ---------------------------------------------------------------------------

/// Join of a team and a drafted player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSlot {
    pub team_id: TeamId,
    pub player_id: PlayerId,
    pub position: Position,
    /// Jersey number, unique within the team.
    pub number: u8,
}

/// A roster slot together with the player occupying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub position: Position,
    pub number: u8,
    pub player: Player,
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Intra-region double round-robin fixture.
    League,
    /// Cross-region exhibition.
    Friendly,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::League => "league",
            MatchKind::Friendly => "friendly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "league" => Some(MatchKind::League),
            "friendly" => Some(MatchKind::Friendly),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Played,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Played => "played",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(MatchStatus::Scheduled),
            "played" => Some(MatchStatus::Played),
            _ => None,
        }
    }
}

/// A match intent emitted by the fixture generator. The caller persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub kind: MatchKind,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// A persisted match.
///
/// Scores and `played_at` are `Some` exactly when `status` is `Played`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub kind: MatchKind,
    pub status: MatchStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub played_at: Option<DateTime<Utc>>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl Match {
    pub fn is_played(&self) -> bool {
        self.status == MatchStatus::Played
    }

    /// A scheduled match whose date has arrived. Undated matches are never due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == MatchStatus::Scheduled && self.scheduled_at.is_some_and(|at| at <= now)
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }
}
