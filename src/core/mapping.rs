/*
Location aggregation: node -> site.

    Input: nodes that passed the domain filter.
    Output: region code -> Site, in first-seen order.

    1. A node without a location or region code is dropped (counted, logged).
    2. The first node seen for a region fixes the site coordinates and address.
    3. Every kept node becomes one SubNode carrying its ports unchanged.
*/
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use tracing::debug;

use crate::core::diagnostics::Diagnostics;
use crate::core::state::is_port_down;
use crate::core::types::{Coordinates, RawNode, RawPort};

/// Region code -> site.
pub type SiteMap = IndexMap<String, Site>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubNode {
    pub label: String,
    pub ports: Vec<RawPort>,
}

impl SubNode {
    pub fn from_node(node: &RawNode) -> Self {
        Self { label: node.label().to_owned(), ports: node.ports.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub sub_nodes: Vec<SubNode>,
}

impl Site {
    fn seeded_by(node: &RawNode) -> Self {
        let location = node.location.clone().unwrap_or_default();
        let Coordinates { latitude, longitude } = location.coordinates();
        Self { latitude, longitude, address: location.address, sub_nodes: Vec::new() }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn ports(&self) -> impl Iterator<Item = &RawPort> + '_ {
        self.sub_nodes.iter().flat_map(|s| s.ports.iter())
    }

    pub fn port_count(&self) -> usize {
        self.ports().count()
    }

    pub fn down_port_count(&self) -> usize {
        self.ports().filter(|p| is_port_down(p)).count()
    }
}

pub fn aggregate_locations<'a, I>(nodes: I, diagnostics: &mut Diagnostics) -> SiteMap
where
    I: IntoIterator<Item = &'a RawNode>,
{
    let mut sites = SiteMap::new();

    for node in nodes {
        let Some(region) = node.region() else {
            debug!(node = %node.id, "node has no region code; leaving it off the map");
            diagnostics.nodes_without_region += 1;
            continue;
        };

        let site = match sites.entry(region.to_owned()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                debug!(region, node = %node.id, "new site");
                e.insert(Site::seeded_by(node))
            }
        };
        site.sub_nodes.push(SubNode::from_node(node));
    }

    sites
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Location;

    fn node(id: &str, region: Option<&str>, lat: Option<f64>, lng: Option<f64>) -> RawNode {
        RawNode {
            id: id.into(),
            name: format!("name-{id}"),
            location: Some(Location {
                latitude: lat,
                longitude: lng,
                address: Some(format!("addr-{id}")),
                region: region.map(str::to_owned),
            }),
            ports: vec![RawPort { id: format!("{id}-p1"), ..Default::default() }],
            ..Default::default()
        }
    }

    #[test]
    fn groups_nodes_by_region_in_first_seen_order() {
        let nodes = vec![
            node("a", Some("US-GA"), Some(33.7), Some(-84.3)),
            node("b", Some("US-FL"), Some(25.7), Some(-80.2)),
            node("c", Some("US-GA"), Some(34.0), Some(-84.0)),
        ];
        let mut diag = Diagnostics::default();

        let sites = aggregate_locations(&nodes, &mut diag);

        let keys: Vec<&str> = sites.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["US-GA", "US-FL"]);

        let ga = &sites["US-GA"];
        assert_eq!(ga.sub_nodes.len(), 2);
        assert_eq!(ga.sub_nodes[0].label, "name-a");
        assert_eq!(ga.sub_nodes[1].label, "name-c");
        assert_eq!(ga.sub_nodes[1].ports, nodes[2].ports);
        assert!(diag.is_clean());
    }

    #[test]
    fn first_node_fixes_site_coordinates() {
        let nodes = vec![
            node("a", Some("US-GA"), Some(33.7), Some(-84.3)),
            node("c", Some("US-GA"), Some(34.0), Some(-84.0)),
        ];
        let mut diag = Diagnostics::default();

        let sites = aggregate_locations(&nodes, &mut diag);

        let ga = &sites["US-GA"];
        assert_eq!(ga.coordinates(), Coordinates::new(33.7, -84.3));
        assert_eq!(ga.address.as_deref(), Some("addr-a"));
    }

    #[test]
    fn missing_coordinates_default_to_zero() {
        let nodes = vec![node("a", Some("BR-SP"), None, Some(-46.6))];
        let mut diag = Diagnostics::default();

        let sites = aggregate_locations(&nodes, &mut diag);

        assert_eq!(sites["BR-SP"].coordinates(), Coordinates::new(0.0, -46.6));
    }

    #[test]
    fn nodes_without_region_are_dropped() {
        let mut no_location = node("x", None, None, None);
        no_location.location = None;
        let nodes = vec![
            no_location,
            node("y", None, Some(1.0), Some(2.0)),
            node("z", Some(""), Some(1.0), Some(2.0)),
            node("a", Some("US-FL"), Some(25.7), Some(-80.2)),
        ];
        let mut diag = Diagnostics::default();

        let sites = aggregate_locations(&nodes, &mut diag);

        assert_eq!(sites.len(), 1);
        assert!(sites.contains_key("US-FL"));
        assert_eq!(diag.nodes_without_region, 3);
    }

    #[test]
    fn counts_down_ports() {
        let mut n = node("a", Some("US-FL"), Some(25.7), Some(-80.2));
        n.ports = vec![
            RawPort { id: "p1".into(), status: Some("up".into()), state: Some("enabled".into()), ..Default::default() },
            RawPort { id: "p2".into(), status: Some("up".into()), state: Some("disabled".into()), ..Default::default() },
        ];
        let mut diag = Diagnostics::default();

        let sites = aggregate_locations([&n], &mut diag);

        assert_eq!(sites["US-FL"].port_count(), 2);
        assert_eq!(sites["US-FL"].down_port_count(), 1);
    }
}
