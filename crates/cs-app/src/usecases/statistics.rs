use std::sync::Arc;

use anyhow::Result;

use cs_core::analytics::{recommend, statistics, Recommendation, StatsRange, Statistics};
use cs_core::ports::ClockPort;

use crate::store::{lock_store, SharedItemStore};

/// Usage statistics over the current history.
pub struct ComputeStatistics {
    store: SharedItemStore,
    clock: Arc<dyn ClockPort>,
}

impl ComputeStatistics {
    pub fn new(store: SharedItemStore, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    #[tracing::instrument(name = "usecase.compute_statistics.execute", skip(self))]
    pub fn execute(&self, range: StatsRange) -> Result<Statistics> {
        let items = lock_store(&self.store)?.all().to_vec();
        Ok(statistics(&items, range, self.clock.now_ms()))
    }
}

/// Items ranked by frequency with a one-day recency decay.
pub struct GetRecommendations {
    store: SharedItemStore,
    clock: Arc<dyn ClockPort>,
}

impl GetRecommendations {
    pub fn new(store: SharedItemStore, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    #[tracing::instrument(name = "usecase.get_recommendations.execute", skip(self))]
    pub fn execute(&self, limit: usize) -> Result<Vec<Recommendation>> {
        let items = lock_store(&self.store)?.all().to_vec();
        Ok(recommend(&items, self.clock.now_ms(), limit))
    }
}
