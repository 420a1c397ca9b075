// Fixture generation: intra-region double round-robin plus cross-region friendlies.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use tracing::debug;

use crate::error::LeagueError;
use crate::league::grouping::group_by_region;
use crate::model::{Fixture, MatchKind, Team, TeamId};

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// Hands out one date per fixture, one calendar day apart.
///
/// Without a start date every fixture is left undated.
#[derive(Debug, Clone)]
struct MatchCalendar {
    start: Option<DateTime<Utc>>,
    issued: i64,
}

impl MatchCalendar {
    fn new(start: Option<DateTime<Utc>>) -> Self {
        MatchCalendar { start, issued: 0 }
    }

    /// The next fixture date. A date past the representable range is an
    /// `InvalidDate` for the start date that produced it.
    fn next_date(&mut self) -> Result<Option<DateTime<Utc>>, LeagueError> {
        let Some(start) = self.start else {
            return Ok(None);
        };
        let date = start
            .checked_add_signed(TimeDelta::days(self.issued))
            .ok_or_else(|| LeagueError::InvalidDate {
                input: start.to_rfc3339(),
            })?;
        self.issued += 1;
        Ok(Some(date))
    }

    fn fixture(&mut self, home: TeamId, away: TeamId, kind: MatchKind) -> Result<Fixture, LeagueError> {
        Ok(Fixture {
            home_team_id: home,
            away_team_id: away,
            kind,
            scheduled_at: self.next_date()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Build the full fixture list for `teams`.
///
/// Every region with at least two teams plays a double round-robin: for each
/// pair `(i, j)` with `i` listed first, `i` hosts `j` and then `j` hosts `i`.
/// With `include_friendlies`, every pair of distinct regions `(a, b)` with `a`
/// iterated first adds one friendly per team combination, hosted by the team
/// from `a`. Friendlies follow all league fixtures on the same calendar.
///
/// The output order is exactly the emission order. Nothing is persisted.
pub fn generate_fixtures(
    teams: &[Team],
    start_date: Option<DateTime<Utc>>,
    include_friendlies: bool,
) -> Result<Vec<Fixture>, LeagueError> {
    if teams.len() < 2 {
        return Err(LeagueError::InsufficientTeams { found: teams.len() });
    }

    let groups = group_by_region(teams);
    let mut calendar = MatchCalendar::new(start_date);
    let mut fixtures = Vec::new();

    for group in groups.iter().filter(|g| g.can_host_league()) {
        for (i, first) in group.teams.iter().enumerate() {
            for second in &group.teams[i + 1..] {
                fixtures.push(calendar.fixture(first.id, second.id, MatchKind::League)?);
                fixtures.push(calendar.fixture(second.id, first.id, MatchKind::League)?);
            }
        }
    }

    let league_count = fixtures.len();

    if include_friendlies {
        for (i, home_region) in groups.iter().enumerate() {
            for away_region in &groups[i + 1..] {
                for home in &home_region.teams {
                    for away in &away_region.teams {
                        fixtures.push(calendar.fixture(home.id, away.id, MatchKind::Friendly)?);
                    }
                }
            }
        }
    }

    debug!(
        "generated {} league and {} friendly fixtures across {} regions",
        league_count,
        fixtures.len() - league_count,
        groups.len()
    );

    Ok(fixtures)
}

/// Parse a schedule start date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` timestamps (read
/// as UTC), or a plain `YYYY-MM-DD` date meaning midnight UTC.
pub fn parse_start_date(input: &str) -> Result<DateTime<Utc>, LeagueError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(LeagueError::InvalidDate {
        input: input.to_string(),
    })
}
