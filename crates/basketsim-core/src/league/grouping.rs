// Region grouping: partitions teams into per-region leagues.

use std::collections::HashMap;

use crate::model::Team;

/// Group key for teams whose region is blank.
pub const UNKNOWN_REGION: &str = "unknown";

/// Normalized region key. Blank regions collapse into [`UNKNOWN_REGION`].
pub fn region_key(region: &str) -> &str {
    let trimmed = region.trim();
    if trimmed.is_empty() {
        UNKNOWN_REGION
    } else {
        trimmed
    }
}

/// Teams that share a region, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup<'a> {
    pub region: String,
    pub teams: Vec<&'a Team>,
}

impl RegionGroup<'_> {
    /// A region needs at least two teams to play league fixtures.
    pub fn can_host_league(&self) -> bool {
        self.teams.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Partition `teams` by region.
///
/// Regions come out in first-appearance order and each group keeps the input
/// order of its teams, so the result is fully determined by the input slice.
pub fn group_by_region(teams: &[Team]) -> Vec<RegionGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<RegionGroup<'_>> = Vec::new();

    for team in teams {
        let key = region_key(&team.region);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(RegionGroup {
                region: key.to_string(),
                teams: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].teams.push(team);
    }

    groups
}
