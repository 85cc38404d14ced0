/*
Publishing a freshly computed topology.

A refresh always recomputes from scratch. The new topology is built in full
before it replaces the old one; a reader holding the previous Arc keeps a
consistent view and never sees old and new sites mixed.
*/

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::classify::{process, Topology};
use crate::core::snapshot::Snapshot;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct TopologyView {
    current: Arc<Topology>,
    generation: u64,
}

impl TopologyView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Arc<Topology> {
        Arc::clone(&self.current)
    }

    /// Number of successful refreshes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn refresh<S: AsRef<str>>(&mut self, snapshot: &Snapshot, allowed_domains: &[S]) -> Arc<Topology> {
        let next = Arc::new(process(snapshot, allowed_domains));
        self.publish(next)
    }

    /// Decode JSON text and refresh. On a decode error the previous topology
    /// stays published and the error is returned.
    pub fn refresh_str<S: AsRef<str>>(&mut self, text: &str, allowed_domains: &[S]) -> Result<Arc<Topology>> {
        let snapshot = Snapshot::from_json_str(text).inspect_err(|err| {
            warn!(%err, generation = self.generation, "refresh skipped; keeping current topology");
        })?;
        Ok(self.refresh(&snapshot, allowed_domains))
    }

    fn publish(&mut self, next: Arc<Topology>) -> Arc<Topology> {
        self.current = next;
        self.generation += 1;
        debug!(generation = self.generation, "topology published");
        self.current()
    }
}
