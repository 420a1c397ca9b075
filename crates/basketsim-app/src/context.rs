// Shared league state handed to HTTP handlers and the sweep task.

use std::sync::{Arc, Mutex, MutexGuard};

use basketsim_core::model::MatchId;
use basketsim_core::sim::{MatchSimulator, SimulatedResult, SimulationConfig};
use basketsim_core::store::LeagueStore;
use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::LeagueConfig;
use crate::error::ServiceResult;
use crate::matches;

pub struct LeagueContext {
    pub store: Arc<dyn LeagueStore>,
    pub league: LeagueConfig,
    pub simulator: MatchSimulator,
    rng: Mutex<ChaCha8Rng>,
}

impl LeagueContext {
    /// Seeds the RNG from `simulation.seed` when set, otherwise from entropy.
    pub fn new(
        store: Arc<dyn LeagueStore>,
        league: LeagueConfig,
        simulation: SimulationConfig,
    ) -> Self {
        let rng = match simulation.seed {
            Some(seed) => {
                info!("match simulation seeded with {seed}");
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => ChaCha8Rng::from_entropy(),
        };
        LeagueContext {
            store,
            league,
            simulator: MatchSimulator::new(simulation),
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &dyn LeagueStore {
        self.store.as_ref()
    }

    /// Lock the shared RNG.
    ///
    /// Panics if the mutex is poisoned.
    pub fn rng(&self) -> MutexGuard<'_, ChaCha8Rng> {
        self.rng.lock().expect("rng mutex poisoned")
    }

    /// Simulate one match with the shared simulator and RNG.
    pub fn simulate_match(&self, id: MatchId, now: DateTime<Utc>) -> ServiceResult<SimulatedResult> {
        let mut rng = self.rng();
        matches::simulate_match(self.store(), &self.simulator, id, &mut *rng, now)
    }
}
