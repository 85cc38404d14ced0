// full pipeline run
use serde::Serialize;
use serde_json::Value;
use tracing::{debug_span, info, warn};

use crate::core::diagnostics::Diagnostics;
use crate::core::filter::filter_by_domain;
use crate::core::index::PortIndex;
use crate::core::lifting::{aggregate_links, EdgeBucket, EdgeMap};
use crate::core::mapping::{aggregate_locations, SiteMap};
use crate::core::propagate::resolve_links;
use crate::core::snapshot::{ShapeIssue, Snapshot};
use crate::core::types::Completeness;

/// Everything the renderer needs: sites keyed by region code and edges keyed
/// by ordered site pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub sites: SiteMap,
    pub edges_by_key: EdgeMap,
    #[serde(skip)]
    pub diagnostics: Diagnostics,
}

impl Topology {
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty() && self.edges_by_key.is_empty()
    }

    pub fn degraded_edges(&self) -> impl Iterator<Item = (&str, &EdgeBucket)> + '_ {
        self.edges_by_key
            .iter()
            .filter(|(_, e)| e.degraded)
            .map(|(k, e)| (k.as_str(), e))
    }
}

//Run the pipeline from scratch:
// - drop nodes outside the allowed domains
// - bucket the rest by region code
// - index ports by owning site
// - resolve both ends of every link, dropping the unresolvable ones
// - group resolved links by site-pair key and derive `degraded`
pub fn process<S: AsRef<str>>(snapshot: &Snapshot, allowed_domains: &[S]) -> Topology {
    let _span = debug_span!("process", nodes = snapshot.nodes.len(), links = snapshot.links.len()).entered();

    let mut diagnostics = Diagnostics {
        shape_issues: snapshot.shape.clone(),
        partial_nodes: snapshot.nodes.iter().filter(|n| n.completeness == Completeness::Partial).count(),
        partial_links: snapshot.links.iter().filter(|l| l.completeness == Completeness::Partial).count(),
        ..Default::default()
    };

    let nodes = filter_by_domain(&snapshot.nodes, allowed_domains, &mut diagnostics);
    let sites = aggregate_locations(nodes, &mut diagnostics);

    let edges_by_key = {
        let index = PortIndex::build(&sites, &mut diagnostics);
        let resolved = resolve_links(&snapshot.links, &index, &mut diagnostics);
        aggregate_links(resolved)
    };

    info!(
        sites = sites.len(),
        edges = edges_by_key.len(),
        dropped_nodes = diagnostics.dropped_nodes(),
        dropped_links = diagnostics.dropped_links(),
        duplicate_ports = diagnostics.duplicate_port_claims,
        partial_nodes = diagnostics.partial_nodes,
        partial_links = diagnostics.partial_links,
        "topology processed"
    );

    Topology { sites, edges_by_key, diagnostics }
}

/// Normalize a parsed-but-untyped snapshot, then run the pipeline.
pub fn process_value<S: AsRef<str>>(value: &Value, allowed_domains: &[S]) -> Topology {
    process(&Snapshot::from_value(value), allowed_domains)
}

/// Parse JSON text and run the pipeline. Unparsable text yields an empty
/// topology whose diagnostics say why.
pub fn process_str<S: AsRef<str>>(text: &str, allowed_domains: &[S]) -> Topology {
    let snapshot = Snapshot::from_json_str(text).unwrap_or_else(|err| {
        warn!(%err, "topology snapshot is not valid JSON; treating it as empty");
        Snapshot::malformed(ShapeIssue::Unparsable(err.to_string()))
    });
    process(&snapshot, allowed_domains)
}
