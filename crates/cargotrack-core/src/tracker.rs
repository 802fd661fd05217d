//! The tracking pipeline.

use std::sync::Arc;

use tracing::{debug, info};

use cargotrack_protocols::{TrackerError, TrackingAgent, TrackingRecord};

use crate::history::HistoryStore;
use crate::normalizer::normalize;
use crate::route_map::{MapOutcome, RouteMapper};
use crate::task::TaskComposer;

/// Runs one lookup end to end: compose, run the agent, normalize, map, persist.
pub struct Tracker {
    agent: Arc<dyn TrackingAgent>,
    composer: TaskComposer,
    history: HistoryStore,
    mapper: Option<RouteMapper>,
}

impl Tracker {
    pub fn new(agent: Arc<dyn TrackingAgent>, composer: TaskComposer, history: HistoryStore) -> Self {
        Self {
            agent,
            composer,
            history,
            mapper: None,
        }
    }

    /// Draw route maps with `mapper` when both ports are known.
    pub fn with_route_mapper(mut self, mapper: RouteMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Track `reference_id` and append the result to the history.
    pub async fn track(&self, reference_id: &str) -> Result<TrackingRecord, TrackerError> {
        let task = self.composer.compose(reference_id);
        debug!("Agent task for {}:\n{}", reference_id, task);

        let raw = self.agent.run(&task).await?;
        let mut record = normalize(&raw, reference_id);
        info!(
            "Normalized {}: vessel={}, status={}",
            reference_id, record.vessel.name, record.schedule.status
        );

        if let Some(ref mapper) = self.mapper {
            if record.has_route() {
                if let MapOutcome::Generated(path) = mapper
                    .render(&record.ports.loading, &record.ports.discharge)
                    .await
                {
                    record.map_path = Some(path.to_string_lossy().into_owned());
                }
            } else {
                debug!("Ports unknown for {}, no route map", reference_id);
            }
        }

        let path = self.history.append(&record)?;
        info!("Saved {} to {}", reference_id, path.display());

        Ok(record)
    }

    /// Most recent stored record for `reference_id`, without running the agent.
    pub fn cached(&self, reference_id: &str) -> Option<TrackingRecord> {
        self.history.latest_record(reference_id)
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
