/*
Operator-facing summary of one pipeline run.

    per site: sub-node count, port count, down-port count
    per edge: member link count, degraded flag
    plus the diagnostics of the run

Encoded as TOON for logs and terminals, or pretty JSON.
*/
use serde::Serialize;

use crate::core::classify::Topology;
use crate::core::diagnostics::Diagnostics;
use crate::core::state::EdgeState;
use crate::error::{Result, TopologyError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub region: String,
    pub sub_nodes: usize,
    pub ports: usize,
    pub down_ports: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSummary {
    pub key: String,
    pub links: usize,
    pub state: EdgeState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReport {
    pub sites: Vec<SiteSummary>,
    pub edges: Vec<EdgeSummary>,
    pub diagnostics: Diagnostics,
}

impl TopologyReport {
    pub fn from_topology(topology: &Topology) -> Self {
        let sites = topology
            .sites
            .iter()
            .map(|(region, site)| SiteSummary {
                region: region.clone(),
                sub_nodes: site.sub_nodes.len(),
                ports: site.port_count(),
                down_ports: site.down_port_count(),
            })
            .collect();

        let edges = topology
            .edges_by_key
            .iter()
            .map(|(key, edge)| EdgeSummary { key: key.clone(), links: edge.len(), state: edge.state() })
            .collect();

        Self { sites, edges, diagnostics: topology.diagnostics.clone() }
    }

    pub fn degraded_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.state.is_degraded()).count()
    }

    pub fn to_toon(&self) -> Result<String> {
        toon_format::encode_default(self).map_err(|e| TopologyError::Toon(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
