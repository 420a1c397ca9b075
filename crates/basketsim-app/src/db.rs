// SQLite persistence layer for teams, players, rosters, and matches.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use basketsim_core::model::{
    Fixture, Match, MatchId, MatchKind, MatchStatus, NewPlayer, NewTeam, OwnerId, Player,
    PlayerId, PlayerStatus, Position, RosterEntry, RosterSlot, SkillRatings, Team, TeamId,
};
use basketsim_core::sim::{RecordDelta, SimulatedResult};
use basketsim_core::store::{DraftOutcome, LeagueStore, MatchFilter, MatchPage};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction};
use tracing::debug;

const TEAM_COLUMNS: &str = "id, name, region, owner_id, budget, wins, losses";

const PLAYER_COLUMNS: &str = "p.id, p.first_name, p.last_name, p.age, p.position, p.speed, \
     p.strength, p.shooting, p.defense, p.stamina, p.overall, p.salary, p.status";

const MATCH_COLUMNS: &str = "id, home_team_id, away_team_id, kind, status, scheduled_at, \
     played_at, home_score, away_score";

/// SQLite-backed league storage.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA foreign_keys = ON;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS teams (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                name     TEXT NOT NULL UNIQUE,
                region   TEXT NOT NULL,
                owner_id INTEGER UNIQUE,
                budget   INTEGER NOT NULL,
                wins     INTEGER NOT NULL DEFAULT 0,
                losses   INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS players (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name  TEXT NOT NULL,
                age        INTEGER NOT NULL,
                position   TEXT NOT NULL,
                speed      INTEGER NOT NULL,
                strength   INTEGER NOT NULL,
                shooting   INTEGER NOT NULL,
                defense    INTEGER NOT NULL,
                stamina    INTEGER NOT NULL,
                overall    INTEGER NOT NULL,
                salary     INTEGER NOT NULL,
                status     TEXT NOT NULL DEFAULT 'available'
            );

            CREATE TABLE IF NOT EXISTS roster (
                team_id   INTEGER NOT NULL REFERENCES teams(id),
                player_id INTEGER NOT NULL UNIQUE REFERENCES players(id),
                position  TEXT NOT NULL,
                number    INTEGER NOT NULL,
                PRIMARY KEY (team_id, player_id),
                UNIQUE (team_id, number)
            );

            CREATE TABLE IF NOT EXISTS matches (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                home_team_id INTEGER NOT NULL REFERENCES teams(id),
                away_team_id INTEGER NOT NULL REFERENCES teams(id),
                kind         TEXT NOT NULL,
                status       TEXT NOT NULL DEFAULT 'scheduled',
                scheduled_at TEXT,
                played_at    TEXT,
                home_score   INTEGER,
                away_score   INTEGER,
                CHECK (home_team_id <> away_team_id)
            );

            CREATE INDEX IF NOT EXISTS idx_teams_region ON teams(region);
            CREATE INDEX IF NOT EXISTS idx_matches_due ON matches(status, scheduled_at);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock).
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    fn query_teams(&self, sql: &str, args: &[Value]) -> Result<Vec<Team>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).context("failed to prepare team query")?;
        let teams = stmt
            .query_map(params_from_iter(args.iter()), team_from_row)
            .context("failed to query teams")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map team rows")?;
        Ok(teams)
    }

    fn query_players(&self, sql: &str, args: &[Value]) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).context("failed to prepare player query")?;
        let players = stmt
            .query_map(params_from_iter(args.iter()), |row| player_from_row(row, 0))
            .context("failed to query players")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map player rows")?;
        Ok(players)
    }

    fn query_matches(&self, sql: &str, args: &[Value]) -> Result<Vec<Match>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).context("failed to prepare match query")?;
        let matches = stmt
            .query_map(params_from_iter(args.iter()), match_from_row)
            .context("failed to query matches")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map match rows")?;
        Ok(matches)
    }

    /// Run raw SQL against the connection. Test-only escape hatch.
    #[cfg(test)]
    pub(crate) fn execute_raw(&self, sql: &str) -> Result<()> {
        self.conn().execute_batch(sql).context("failed to execute raw sql")
    }

    fn first_team(&self, sql: &str, args: &[Value]) -> Result<Option<Team>> {
        Ok(self.query_teams(sql, args)?.into_iter().next())
    }
}

// ---------------------------------------------------------------------------
// LeagueStore implementation
// ---------------------------------------------------------------------------

impl LeagueStore for Database {
    fn list_teams(&self) -> Result<Vec<Team>> {
        self.query_teams(&format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY id"), &[])
    }

    fn standings(&self) -> Result<Vec<Team>> {
        self.query_teams(
            &format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY wins DESC, id"),
            &[],
        )
    }

    fn team(&self, id: TeamId) -> Result<Option<Team>> {
        self.first_team(
            &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1"),
            &[Value::Integer(id)],
        )
    }

    fn team_by_name(&self, name: &str) -> Result<Option<Team>> {
        self.first_team(
            &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE name = ?1"),
            &[Value::Text(name.to_string())],
        )
    }

    fn team_for_owner(&self, owner_id: OwnerId) -> Result<Option<Team>> {
        self.first_team(
            &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE owner_id = ?1"),
            &[Value::Integer(owner_id)],
        )
    }

    fn team_names(&self) -> Result<HashSet<String>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM teams")
            .context("failed to prepare team_names query")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("failed to query team names")?
            .collect::<std::result::Result<HashSet<_>, _>>()
            .context("failed to map team name rows")?;
        Ok(names)
    }

    fn count_teams_in_region(&self, region: &str) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM teams WHERE region = ?1",
                params![region],
                |row| row.get(0),
            )
            .context("failed to count teams in region")?;
        Ok(count as usize)
    }

    fn insert_team(&self, team: &NewTeam) -> Result<Team> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin team insert")?;
        let stored = insert_team_tx(&tx, team)?;
        tx.commit().context("failed to commit team insert")?;
        Ok(stored)
    }

    fn insert_teams(&self, teams: &[NewTeam]) -> Result<Vec<Team>> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin team batch")?;
        let stored = teams
            .iter()
            .map(|team| insert_team_tx(&tx, team))
            .collect::<Result<Vec<_>>>()?;
        tx.commit().context("failed to commit team batch")?;
        Ok(stored)
    }

    fn update_team(&self, id: TeamId, name: &str, region: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "UPDATE teams SET name = ?1, region = ?2 WHERE id = ?3",
            params![name, region, id],
        )
        .context("failed to update team")?;
        Ok(())
    }

    fn delete_team(&self, id: TeamId) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin team delete")?;
        tx.execute(
            "UPDATE players SET status = 'available'
             WHERE id IN (SELECT player_id FROM roster WHERE team_id = ?1)",
            params![id],
        )
        .context("failed to release roster")?;
        tx.execute("DELETE FROM roster WHERE team_id = ?1", params![id])
            .context("failed to delete roster")?;
        tx.execute(
            "DELETE FROM matches WHERE home_team_id = ?1 OR away_team_id = ?1",
            params![id],
        )
        .context("failed to delete team matches")?;
        tx.execute("DELETE FROM teams WHERE id = ?1", params![id])
            .context("failed to delete team")?;
        tx.commit().context("failed to commit team delete")?;
        Ok(())
    }

    fn count_players(&self) -> Result<usize> {
        let conn = self.conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
            .context("failed to count players")?;
        Ok(count as usize)
    }

    fn insert_players(&self, players: &[NewPlayer]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin player import")?;
        for p in players {
            tx.execute(
                "INSERT INTO players
                    (first_name, last_name, age, position, speed, strength, shooting,
                     defense, stamina, overall, salary, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 'available')",
                params![
                    p.first_name,
                    p.last_name,
                    p.age,
                    p.position.display_str(),
                    p.skills.speed,
                    p.skills.strength,
                    p.skills.shooting,
                    p.skills.defense,
                    p.skills.stamina,
                    p.overall,
                    p.salary,
                ],
            )
            .context("failed to insert player in batch")?;
        }
        tx.commit().context("failed to commit player import")?;
        Ok(players.len())
    }

    fn list_players(&self, status: Option<PlayerStatus>) -> Result<Vec<Player>> {
        match status {
            Some(status) => self.query_players(
                &format!(
                    "SELECT {PLAYER_COLUMNS} FROM players p WHERE p.status = ?1
                     ORDER BY p.overall DESC, p.id"
                ),
                &[Value::Text(status.as_str().to_string())],
            ),
            None => self.query_players(
                &format!("SELECT {PLAYER_COLUMNS} FROM players p ORDER BY p.overall DESC, p.id"),
                &[],
            ),
        }
    }

    fn player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self
            .query_players(
                &format!("SELECT {PLAYER_COLUMNS} FROM players p WHERE p.id = ?1"),
                &[Value::Integer(id)],
            )?
            .into_iter()
            .next())
    }

    fn search_players(
        &self,
        query: &str,
        position: Option<Position>,
        limit: usize,
    ) -> Result<Vec<Player>> {
        let pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));
        let position = match position {
            Some(pos) => Value::Text(pos.display_str().to_string()),
            None => Value::Null,
        };
        self.query_players(
            &format!(
                "SELECT {PLAYER_COLUMNS} FROM players p
                 WHERE (LOWER(p.first_name) LIKE ?1 ESCAPE '\\'
                        OR LOWER(p.last_name) LIKE ?1 ESCAPE '\\')
                   AND (?2 IS NULL OR p.position = ?2)
                 ORDER BY p.overall DESC, p.id
                 LIMIT ?3"
            ),
            &[Value::Text(pattern), position, Value::Integer(limit as i64)],
        )
    }

    fn draft_player(&self, slot: &RosterSlot, salary: i64) -> Result<DraftOutcome> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin draft")?;
        let claimed = tx
            .execute(
                "UPDATE players SET status = 'drafted' WHERE id = ?1 AND status = 'available'",
                params![slot.player_id],
            )
            .context("failed to mark player drafted")?;
        if claimed == 0 {
            return Ok(DraftOutcome::PlayerUnavailable);
        }

        let charged = tx
            .execute(
                "UPDATE teams SET budget = budget - ?1 WHERE id = ?2 AND budget >= ?1",
                params![salary, slot.team_id],
            )
            .context("failed to charge team budget")?;
        if charged == 0 {
            let team_exists: bool = tx
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1)",
                    params![slot.team_id],
                    |row| row.get(0),
                )
                .context("failed to look up drafting team")?;
            return Ok(if team_exists {
                DraftOutcome::InsufficientBudget
            } else {
                DraftOutcome::TeamNotFound
            });
        }

        let number_taken: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM roster WHERE team_id = ?1 AND number = ?2)",
                params![slot.team_id, slot.number],
                |row| row.get(0),
            )
            .context("failed to check jersey number")?;
        if number_taken {
            return Ok(DraftOutcome::JerseyNumberTaken);
        }

        tx.execute(
            "INSERT INTO roster (team_id, player_id, position, number) VALUES (?1, ?2, ?3, ?4)",
            params![
                slot.team_id,
                slot.player_id,
                slot.position.display_str(),
                slot.number
            ],
        )
        .context("failed to insert roster slot")?;
        tx.commit().context("failed to commit draft")?;
        Ok(DraftOutcome::Drafted)
    }

    fn release_player(&self, team_id: TeamId, player_id: PlayerId, salary: i64) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin release")?;
        let removed = tx
            .execute(
                "DELETE FROM roster WHERE team_id = ?1 AND player_id = ?2",
                params![team_id, player_id],
            )
            .context("failed to delete roster slot")?;
        if removed == 0 {
            return Ok(false);
        }
        tx.execute(
            "UPDATE players SET status = 'available' WHERE id = ?1",
            params![player_id],
        )
        .context("failed to mark player available")?;
        tx.execute(
            "UPDATE teams SET budget = budget + ?1 WHERE id = ?2",
            params![salary, team_id],
        )
        .context("failed to refund team budget")?;
        tx.commit().context("failed to commit release")?;
        Ok(true)
    }

    fn roster_slot(&self, team_id: TeamId, player_id: PlayerId) -> Result<Option<RosterSlot>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT team_id, player_id, position, number FROM roster
             WHERE team_id = ?1 AND player_id = ?2",
            params![team_id, player_id],
            |row| {
                let position: String = row.get(2)?;
                Ok(RosterSlot {
                    team_id: row.get(0)?,
                    player_id: row.get(1)?,
                    position: parse_position(2, &position)?,
                    number: row.get(3)?,
                })
            },
        )
        .optional()
        .context("failed to load roster slot")
    }

    fn roster(&self, team_id: TeamId) -> Result<Vec<RosterEntry>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT r.position, r.number, {PLAYER_COLUMNS}
                 FROM roster r JOIN players p ON p.id = r.player_id
                 WHERE r.team_id = ?1
                 ORDER BY r.number"
            ))
            .context("failed to prepare roster query")?;
        let entries = stmt
            .query_map(params![team_id], |row| {
                let position: String = row.get(0)?;
                Ok(RosterEntry {
                    position: parse_position(0, &position)?,
                    number: row.get(1)?,
                    player: player_from_row(row, 2)?,
                })
            })
            .context("failed to query roster")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map roster rows")?;
        Ok(entries)
    }

    fn insert_fixtures(&self, fixtures: &[Fixture]) -> Result<Vec<Match>> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin fixture insert")?;
        let stored = insert_fixtures_tx(&tx, fixtures)?;
        tx.commit().context("failed to commit fixtures")?;
        Ok(stored)
    }

    fn replace_matches(&self, fixtures: &[Fixture]) -> Result<Vec<Match>> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin reschedule")?;
        let removed = tx
            .execute("DELETE FROM matches", [])
            .context("failed to delete matches")?;
        let stored = insert_fixtures_tx(&tx, fixtures)?;
        tx.commit().context("failed to commit reschedule")?;
        debug!("replaced {removed} matches with {}", stored.len());
        Ok(stored)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<Match>> {
        Ok(self
            .query_matches(
                &format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?1"),
                &[Value::Integer(id)],
            )?
            .into_iter()
            .next())
    }

    fn due_matches(&self, now: DateTime<Utc>) -> Result<Vec<Match>> {
        self.query_matches(
            &format!(
                "SELECT {MATCH_COLUMNS} FROM matches
                 WHERE status = 'scheduled' AND scheduled_at IS NOT NULL AND scheduled_at <= ?1
                 ORDER BY id"
            ),
            &[Value::Text(format_timestamp(now))],
        )
    }

    fn list_matches(&self, filter: &MatchFilter) -> Result<MatchPage> {
        let filter = filter.clone().normalized();
        let mut clauses: Vec<&str> = Vec::new();
        let mut args: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            clauses.push("status = ?");
            args.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(kind) = filter.kind {
            clauses.push("kind = ?");
            args.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(from) = filter.from {
            clauses.push("scheduled_at >= ?");
            args.push(Value::Text(format_timestamp(from)));
        }
        if let Some(region) = &filter.region {
            clauses.push(
                "(home_team_id IN (SELECT id FROM teams WHERE region = ?)
                  OR away_team_id IN (SELECT id FROM teams WHERE region = ?))",
            );
            args.push(Value::Text(region.clone()));
            args.push(Value::Text(region.clone()));
        }
        if let Some(team_id) = filter.team_id {
            clauses.push("(home_team_id = ? OR away_team_id = ?)");
            args.push(Value::Integer(team_id));
            args.push(Value::Integer(team_id));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let total: i64 = {
            let conn = self.conn();
            conn.query_row(
                &format!("SELECT COUNT(*) FROM matches {where_sql}"),
                params_from_iter(args.iter()),
                |row| row.get(0),
            )
            .context("failed to count matches")?
        };

        let mut page_args = args;
        page_args.push(Value::Integer(i64::from(filter.page_size)));
        page_args.push(Value::Integer(filter.offset() as i64));
        let data = self.query_matches(
            &format!(
                "SELECT {MATCH_COLUMNS} FROM matches {where_sql} ORDER BY id LIMIT ? OFFSET ?"
            ),
            &page_args,
        )?;

        Ok(MatchPage {
            data,
            total: total as u64,
            page: filter.page,
            page_size: filter.page_size,
        })
    }

    fn record_result(&self, result: &SimulatedResult) -> Result<bool> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin result transaction")?;

        let updated = tx
            .execute(
                "UPDATE matches
                 SET status = 'played', home_score = ?1, away_score = ?2, played_at = ?3
                 WHERE id = ?4 AND status = 'scheduled'",
                params![
                    result.home_score,
                    result.away_score,
                    format_timestamp(result.played_at),
                    result.match_id,
                ],
            )
            .context("failed to record match result")?;
        if updated == 0 {
            return Ok(false);
        }

        apply_delta(&tx, result.home_team_id, result.home_delta)?;
        apply_delta(&tx, result.away_team_id, result.away_delta)?;

        tx.commit().context("failed to commit match result")?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn insert_team_tx(tx: &Transaction<'_>, team: &NewTeam) -> Result<Team> {
    tx.query_row(
        &format!(
            "INSERT INTO teams (name, region, owner_id, budget) VALUES (?1, ?2, ?3, ?4)
             RETURNING {TEAM_COLUMNS}"
        ),
        params![team.name, team.region, team.owner_id, team.budget],
        team_from_row,
    )
    .with_context(|| format!("failed to insert team {}", team.name))
}

fn insert_fixtures_tx(tx: &Transaction<'_>, fixtures: &[Fixture]) -> Result<Vec<Match>> {
    let sql = format!(
        "INSERT INTO matches (home_team_id, away_team_id, kind, status, scheduled_at)
         VALUES (?1, ?2, ?3, 'scheduled', ?4)
         RETURNING {MATCH_COLUMNS}"
    );
    fixtures
        .iter()
        .map(|fixture| {
            tx.query_row(
                &sql,
                params![
                    fixture.home_team_id,
                    fixture.away_team_id,
                    fixture.kind.as_str(),
                    fixture.scheduled_at.map(format_timestamp),
                ],
                match_from_row,
            )
            .with_context(|| {
                format!(
                    "failed to insert fixture {} vs {}",
                    fixture.home_team_id, fixture.away_team_id
                )
            })
        })
        .collect()
}

fn apply_delta(tx: &Transaction<'_>, team_id: TeamId, delta: RecordDelta) -> Result<()> {
    if delta.is_empty() {
        return Ok(());
    }
    tx.execute(
        "UPDATE teams SET wins = wins + ?1, losses = losses + ?2 WHERE id = ?3",
        params![delta.wins, delta.losses, team_id],
    )
    .context("failed to update team record")?;
    Ok(())
}

/// Timestamps are stored as fixed-width RFC 3339 UTC text so that string
/// comparison in SQL matches chronological order.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn invalid_column(idx: usize, what: &str, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Text,
        format!("invalid {what}: {value:?}").into(),
    )
}

fn parse_position(idx: usize, s: &str) -> rusqlite::Result<Position> {
    Position::from_str_pos(s).ok_or_else(|| invalid_column(idx, "position", s))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| invalid_column(idx, "timestamp", &s))
    })
    .transpose()
}

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        region: row.get(2)?,
        owner_id: row.get(3)?,
        budget: row.get(4)?,
        wins: row.get(5)?,
        losses: row.get(6)?,
    })
}

/// Map the `PLAYER_COLUMNS` projection starting at column `base`.
fn player_from_row(row: &Row<'_>, base: usize) -> rusqlite::Result<Player> {
    let position: String = row.get(base + 4)?;
    let status: String = row.get(base + 12)?;
    Ok(Player {
        id: row.get(base)?,
        first_name: row.get(base + 1)?,
        last_name: row.get(base + 2)?,
        age: row.get(base + 3)?,
        position: parse_position(base + 4, &position)?,
        skills: SkillRatings {
            speed: row.get(base + 5)?,
            strength: row.get(base + 6)?,
            shooting: row.get(base + 7)?,
            defense: row.get(base + 8)?,
            stamina: row.get(base + 9)?,
        },
        overall: row.get(base + 10)?,
        salary: row.get(base + 11)?,
        status: PlayerStatus::parse(&status)
            .ok_or_else(|| invalid_column(base + 12, "player status", &status))?,
    })
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<Match> {
    let kind: String = row.get(3)?;
    let status: String = row.get(4)?;
    Ok(Match {
        id: row.get(0)?,
        home_team_id: row.get(1)?,
        away_team_id: row.get(2)?,
        kind: MatchKind::parse(&kind).ok_or_else(|| invalid_column(3, "match kind", &kind))?,
        status: MatchStatus::parse(&status)
            .ok_or_else(|| invalid_column(4, "match status", &status))?,
        scheduled_at: timestamp_column(row, 5)?,
        played_at: timestamp_column(row, 6)?,
        home_score: row.get(7)?,
        away_score: row.get(8)?,
    })
}
