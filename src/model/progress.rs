//! Persistence boundary. The real store lives in the host application;
//! the core only ever consumes a resolved [`ProgressSnapshot`] and emits
//! fire-and-forget state writes.

use std::collections::BTreeMap;

use crate::foundation::error::WaymarkResult;
use crate::model::contract::NodeState;

/// A resolved progress snapshot for one journey.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ProgressSnapshot {
    /// Per-node state, keyed by node id.
    pub node_states: BTreeMap<String, NodeState>,
    /// Current week number.
    pub current_week: u32,
    /// Current day number within the week.
    pub current_day: u32,
}

/// Host-provided persistence for journey progress.
pub trait ProgressStore {
    /// Load the progress snapshot for a journey.
    fn load_progress(&self, journey_id: &str) -> WaymarkResult<ProgressSnapshot>;

    /// Persist one node-state write. Fire-and-forget from the core's
    /// point of view; failures are the host's to surface.
    fn save_node_state(&mut self, node_id: &str, state: NodeState) -> WaymarkResult<()>;
}

/// In-memory reference store for tests and offline rendering.
#[derive(Clone, Debug, Default)]
pub struct MemoryProgressStore {
    snapshot: ProgressSnapshot,
}

impl MemoryProgressStore {
    /// Create a store holding the given snapshot.
    pub fn new(snapshot: ProgressSnapshot) -> Self {
        Self { snapshot }
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load_progress(&self, _journey_id: &str) -> WaymarkResult<ProgressSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn save_node_state(&mut self, node_id: &str, state: NodeState) -> WaymarkResult<()> {
        self.snapshot.node_states.insert(node_id.to_string(), state);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/progress.rs"]
mod tests;
