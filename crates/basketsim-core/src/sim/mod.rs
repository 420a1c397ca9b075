// Match simulation: strength-biased expected scores plus bounded uniform noise.

pub mod strength;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::LeagueError;
use crate::model::{Match, MatchId, MatchStatus, RatedPlayer, TeamId};

pub use strength::team_strength;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable constants of the score model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Expected score of a side facing an equal opponent on neutral ground.
    pub base_score: f64,
    /// Points per unit of strength difference.
    pub strength_weight: f64,
    /// Points added to the home side's expectation.
    pub home_advantage: f64,
    /// Width of the uniform noise window, centred on zero.
    pub variance: f64,
    /// Floor applied to every final score.
    pub min_score: u32,
    /// Strength assumed for a team with no players.
    pub neutral_strength: f64,
    /// Fixed RNG seed for reproducible seasons.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            base_score: 80.0,
            strength_weight: 0.4,
            home_advantage: 4.0,
            variance: 20.0,
            min_score: 50,
            neutral_strength: 50.0,
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
}

/// Change to apply to one team's win/loss record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordDelta {
    pub wins: u32,
    pub losses: u32,
}

impl RecordDelta {
    pub const WIN: RecordDelta = RecordDelta { wins: 1, losses: 0 };
    pub const LOSS: RecordDelta = RecordDelta { wins: 0, losses: 1 };
    pub const NONE: RecordDelta = RecordDelta { wins: 0, losses: 0 };

    pub fn is_empty(&self) -> bool {
        self.wins == 0 && self.losses == 0
    }
}

/// Everything needed to mark a match played and update both records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedResult {
    pub match_id: MatchId,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub home_score: u32,
    pub away_score: u32,
    pub status: MatchStatus,
    pub played_at: DateTime<Utc>,
    pub outcome: Outcome,
    pub home_delta: RecordDelta,
    pub away_delta: RecordDelta,
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MatchSimulator {
    config: SimulationConfig,
}

impl MatchSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        MatchSimulator { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Expected (home, away) scores before noise.
    pub fn expected_scores(&self, home_strength: f64, away_strength: f64) -> (f64, f64) {
        let cfg = &self.config;
        let home = cfg.base_score + cfg.strength_weight * (home_strength - away_strength)
            + cfg.home_advantage;
        let away = cfg.base_score + cfg.strength_weight * (away_strength - home_strength);
        (home, away)
    }

    /// Draw a final score around `expected`.
    ///
    /// Noise is uniform on `[-variance/2, variance/2)`; the sum is rounded and
    /// floored at `min_score`.
    pub fn sample_score<R: Rng + ?Sized>(&self, expected: f64, rng: &mut R) -> u32 {
        let half = self.config.variance / 2.0;
        let noise = if half > 0.0 {
            rng.gen_range(-half..half)
        } else {
            0.0
        };
        let floor = f64::from(self.config.min_score);
        (expected + noise).round().max(floor) as u32
    }

    /// Simulate `game` between the two rosters.
    ///
    /// The higher score wins; a tie leaves both records unchanged. The match
    /// itself is not touched: the caller applies the result.
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        game: &Match,
        home_roster: &[RatedPlayer],
        away_roster: &[RatedPlayer],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<SimulatedResult, LeagueError> {
        if game.is_played() {
            return Err(LeagueError::AlreadyPlayed(game.id));
        }

        let home_strength = team_strength(home_roster, self.config.neutral_strength);
        let away_strength = team_strength(away_roster, self.config.neutral_strength);
        let (home_expected, away_expected) = self.expected_scores(home_strength, away_strength);

        let home_score = self.sample_score(home_expected, rng);
        let away_score = self.sample_score(away_expected, rng);

        let (outcome, home_delta, away_delta) = if home_score > away_score {
            (Outcome::HomeWin, RecordDelta::WIN, RecordDelta::LOSS)
        } else if away_score > home_score {
            (Outcome::AwayWin, RecordDelta::LOSS, RecordDelta::WIN)
        } else {
            (Outcome::Tie, RecordDelta::NONE, RecordDelta::NONE)
        };

        Ok(SimulatedResult {
            match_id: game.id,
            home_team_id: game.home_team_id,
            away_team_id: game.away_team_id,
            home_score,
            away_score,
            status: MatchStatus::Played,
            played_at: now,
            outcome,
            home_delta,
            away_delta,
        })
    }
}
