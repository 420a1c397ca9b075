// League services over SQLite: config, storage, team/player/match operations,
// player import, and the periodic match sweep.

pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod matches;
pub mod players;
pub mod seed;
pub mod teams;
pub mod worker;

pub use context::LeagueContext;
pub use error::{ServiceError, ServiceResult};
