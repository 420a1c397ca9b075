// Bot team naming and backfill planning for under-populated regions.

use std::collections::HashSet;

/// Minimum number of teams a region is kept at unless configured otherwise.
pub const DEFAULT_MIN_REGION_SIZE: usize = 10;

/// Name of the `n`th bot team of a region, counting from 1.
pub fn bot_team_name(region: &str, n: u32) -> String {
    format!("{region} Bots {n}")
}

/// Yields unused bot names for one region.
///
/// The set of taken names is captured once up front. Each yielded name is
/// added to it, so the allocator never hands out the same name twice and
/// never tries a number it has already passed.
#[derive(Debug, Clone)]
pub struct BotNameAllocator {
    region: String,
    next: u32,
    taken: HashSet<String>,
}

impl BotNameAllocator {
    pub fn new(region: &str, taken: HashSet<String>) -> Self {
        BotNameAllocator {
            region: region.to_string(),
            next: 1,
            taken,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl Iterator for BotNameAllocator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let candidate = bot_team_name(&self.region, self.next);
            self.next = self.next.checked_add(1)?;
            if self.taken.insert(candidate.clone()) {
                return Some(candidate);
            }
        }
    }
}

/// Names of the bot teams needed to bring `region` from `current` teams up to
/// `minimum`. Empty when the region is already large enough.
pub fn plan_backfill(
    region: &str,
    current: usize,
    minimum: usize,
    taken: HashSet<String>,
) -> Vec<String> {
    let missing = minimum.saturating_sub(current);
    if missing == 0 {
        return Vec::new();
    }
    BotNameAllocator::new(region, taken).take(missing).collect()
}
