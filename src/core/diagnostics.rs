// counters for every recovery the pipeline makes, so operators can tell why a
// map shows fewer sites or edges than expected

use serde::Serialize;

use crate::core::snapshot::ShapeIssue;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub shape_issues: Vec<ShapeIssue>,
    /// Nodes missing an identifier or region code.
    pub partial_nodes: usize,
    /// Links missing an identifier or two port references.
    pub partial_links: usize,
    pub nodes_outside_domains: usize,
    pub nodes_without_region: usize,
    pub links_incomplete: usize,
    pub links_unresolved: usize,
    pub duplicate_port_claims: usize,
}

impl Diagnostics {
    pub fn is_malformed(&self) -> bool {
        self.shape_issues.iter().any(ShapeIssue::is_malformed)
    }

    pub fn dropped_nodes(&self) -> usize {
        self.nodes_outside_domains + self.nodes_without_region
    }

    pub fn dropped_links(&self) -> usize {
        self.links_incomplete + self.links_unresolved
    }

    /// Nothing was recovered from.
    pub fn is_clean(&self) -> bool {
        *self == Diagnostics::default()
    }
}
