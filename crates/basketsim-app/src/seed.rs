// Player pool import from CSV.

use std::io::Read;
use std::path::Path;

use basketsim_core::model::{NewPlayer, Position, SkillRatings};
use basketsim_core::store::LeagueStore;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

/// One player row. Unknown columns (height, weight, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(alias = "firstName")]
    first_name: String,
    #[serde(alias = "lastName")]
    last_name: String,
    age: u8,
    position: String,
    speed: u8,
    strength: u8,
    shooting: u8,
    defense: u8,
    stamina: u8,
    #[serde(default)]
    overall: Option<u8>,
    salary: i64,
}

impl RawPlayer {
    fn into_player(self) -> Result<NewPlayer, String> {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let position = Position::from_str_pos(&self.position)
            .ok_or_else(|| format!("skipping player '{name}': unknown position '{}'", self.position))?;

        let skills = SkillRatings {
            speed: self.speed,
            strength: self.strength,
            shooting: self.shooting,
            defense: self.defense,
            stamina: self.stamina,
        };
        let ratings = [
            skills.speed,
            skills.strength,
            skills.shooting,
            skills.defense,
            skills.stamina,
        ];
        if ratings.iter().any(|&r| r > 100) {
            return Err(format!("skipping player '{name}': rating above 100"));
        }
        let overall = match self.overall {
            Some(o) if o > 100 => return Err(format!("skipping player '{name}': overall above 100")),
            Some(o) => o,
            None => {
                let sum: u32 = ratings.iter().map(|&r| u32::from(r)).sum();
                (sum as f64 / ratings.len() as f64).round() as u8
            }
        };
        if self.salary < 0 {
            return Err(format!("skipping player '{name}': negative salary"));
        }

        Ok(NewPlayer {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            age: self.age,
            position,
            skills,
            overall,
            salary: self.salary,
        })
    }
}

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<NewPlayer>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayer>() {
        match result {
            Ok(raw) => match raw.into_player() {
                Ok(player) => players.push(player),
                Err(reason) => warn!("{}", reason),
            },
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Parse a player CSV file.
pub fn load_players(path: &Path) -> Result<Vec<NewPlayer>, ImportError> {
    let file = std::fs::File::open(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_players_from_reader(file).map_err(|e| ImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Import players from `path` into the pool, but only if the pool is empty.
/// Returns the number of players inserted.
pub fn import_players_csv(store: &dyn LeagueStore, path: &Path) -> anyhow::Result<usize> {
    let existing = store.count_players()?;
    if existing > 0 {
        info!("player pool already holds {existing} players; skipping import");
        return Ok(0);
    }
    let players = load_players(path)?;
    let inserted = store.insert_players(&players)?;
    info!("imported {inserted} players from {}", path.display());
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use basketsim_core::model::PlayerStatus;
    use std::fs;

    const HEADER: &str =
        "first_name,last_name,age,position,height,weight,speed,strength,shooting,defense,stamina,overall,salary\n";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let data = format!("{HEADER}Marcus,Hale,24,PG,188,84,88,62,81,70,86,80,48500\n");
        let players = load_players_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        let p = &players[0];
        assert_eq!(p.position, Position::PointGuard);
        assert_eq!(p.skills.shooting, 81);
        assert_eq!(p.overall, 80);
        assert_eq!(p.salary, 48_500);
    }

    #[test]
    fn skips_bad_rows() {
        let data = format!(
            "{HEADER}\
             Good,Row,24,SF,200,95,70,70,70,70,70,70,45000\n\
             Bad,Position,24,QB,200,95,70,70,70,70,70,70,45000\n\
             Bad,Rating,24,C,200,95,170,70,70,70,70,70,45000\n\
             Bad,Number,xx,C,200,95,70,70,70,70,70,70,45000\n"
        );
        let players = load_players_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].first_name, "Good");
    }

    #[test]
    fn missing_overall_is_mean_of_skills() {
        let data = "firstName,lastName,age,position,speed,strength,shooting,defense,stamina,salary\n\
                    Ana,Ruiz,22,c,80,90,70,60,50,40000\n";
        let players = load_players_from_reader(data.as_bytes()).unwrap();
        assert_eq!(players[0].overall, 70);
        assert_eq!(players[0].position, Position::Center);
    }

    #[test]
    fn import_only_fills_an_empty_pool() {
        let tmp = std::env::temp_dir().join("basketsim_seed_import.csv");
        fs::write(
            &tmp,
            format!(
                "{HEADER}A,One,24,PG,1,1,70,70,70,70,70,70,45000\n\
                 B,Two,25,C,1,1,70,70,70,70,70,75,46000\n"
            ),
        )
        .unwrap();

        let db = Database::open(":memory:").unwrap();
        assert_eq!(import_players_csv(&db, &tmp).unwrap(), 2);
        assert_eq!(import_players_csv(&db, &tmp).unwrap(), 0);

        let players = db.list_players(Some(PlayerStatus::Available)).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].first_name, "B");

        let _ = fs::remove_file(&tmp);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_players(Path::new("/nonexistent/players.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
