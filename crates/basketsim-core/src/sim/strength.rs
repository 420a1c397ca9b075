// Team strength: the scalar the score model is driven by.

use crate::model::RatedPlayer;

/// Mean overall rating of a roster, or `neutral` when the roster is empty.
pub fn team_strength(roster: &[RatedPlayer], neutral: f64) -> f64 {
    if roster.is_empty() {
        return neutral;
    }
    roster.iter().map(|p| p.overall).sum::<f64>() / roster.len() as f64
}
