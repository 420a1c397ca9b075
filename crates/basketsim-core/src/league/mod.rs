// League structure: region grouping, fixture generation, and bot backfill.

pub mod bots;
pub mod fixtures;
pub mod grouping;

pub use bots::{plan_backfill, BotNameAllocator, DEFAULT_MIN_REGION_SIZE};
pub use fixtures::{generate_fixtures, parse_start_date};
pub use grouping::{group_by_region, region_key, RegionGroup, UNKNOWN_REGION};
