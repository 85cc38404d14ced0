// lifting resolved links into site-pair edges
/*

One edge per key. Each edge keeps every contributing link (provenance for the
link-detail table) and one coordinate pair per link, index-aligned with
member_links. Collisions append, never overwrite.

Degraded: at least one member link is not up (finalized after grouping).

*/
use indexmap::IndexMap;
use serde::Serialize;

use crate::core::propagate::ResolvedLink;
use crate::core::state::{is_edge_degraded, EdgeState};
use crate::core::types::{Coordinates, RawLink};

/// Edge key -> edge, in first-seen order.
pub type EdgeMap = IndexMap<String, EdgeBucket>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeBucket {
    pub member_links: Vec<RawLink>,
    pub coordinate_pairs: Vec<[Coordinates; 2]>,
    pub degraded: bool,
}

impl EdgeBucket {
    fn push(&mut self, link: &RawLink, coordinates: [Coordinates; 2]) {
        self.member_links.push(link.clone());
        self.coordinate_pairs.push(coordinates);
    }

    /// `(link id, [from, to])` per member link, for polylines and popups.
    pub fn segments(&self) -> impl Iterator<Item = (&str, [Coordinates; 2])> + '_ {
        self.member_links
            .iter()
            .zip(self.coordinate_pairs.iter())
            .map(|(link, pair)| (link.id.as_str(), *pair))
    }

    pub fn len(&self) -> usize {
        self.member_links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_links.is_empty()
    }

    pub fn state(&self) -> EdgeState {
        EdgeState::of(&self.member_links)
    }
}

pub fn aggregate_links<'a, I>(resolved: I) -> EdgeMap
where
    I: IntoIterator<Item = ResolvedLink<'a>>,
{
    let mut edges = EdgeMap::new();

    for ResolvedLink { key, coordinates, link } in resolved {
        edges.entry(key).or_default().push(link, coordinates);
    }

    finalize_degraded(&mut edges);
    edges
}

/// Recompute every edge's `degraded` flag from its members.
pub fn finalize_degraded(edges: &mut EdgeMap) {
    for bucket in edges.values_mut() {
        bucket.degraded = is_edge_degraded(&bucket.member_links);
    }
}
