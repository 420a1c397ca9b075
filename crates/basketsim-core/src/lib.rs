// Core league engine: region grouping, fixture generation, bot backfill,
// and match simulation over plain team lists and rosters.
//
// Nothing in this crate touches a database or the network. Persistence is
// reached through the `store::LeagueStore` port, which callers implement.

pub mod error;
pub mod league;
pub mod model;
pub mod sim;
pub mod store;

pub use error::LeagueError;
