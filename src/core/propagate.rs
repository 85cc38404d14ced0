use thiserror::Error;
use tracing::debug;

use crate::core::diagnostics::Diagnostics;
use crate::core::index::PortIndex;
use crate::core::types::{Coordinates, RawLink};

/// A link projected into site space.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink<'a> {
    /// `"<region(ports[0])>-<region(ports[1])>"`, in link order.
    pub key: String,
    pub coordinates: [Coordinates; 2],
    pub link: &'a RawLink,
}

/// Why a link could not be placed on the map. Expected, not exceptional.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkDrop {
    #[error("link references fewer than two ports")]
    TooFewPorts,

    #[error("port `{0}` does not belong to any site")]
    UnknownPort(String),
}

/// Edge key for an ordered site pair. `A-B` and `B-A` are different keys.
pub fn edge_key(from_region: &str, to_region: &str) -> String {
    format!("{from_region}-{to_region}")
}

/// Resolve `ports[0]` and `ports[1]` independently through the index.
pub fn resolve_link<'a>(link: &'a RawLink, index: &PortIndex<'_>) -> Result<ResolvedLink<'a>, LinkDrop> {
    let (from_port, to_port) = link.endpoints().ok_or(LinkDrop::TooFewPorts)?;

    let from = index.lookup(from_port).ok_or_else(|| LinkDrop::UnknownPort(from_port.to_owned()))?;
    let to = index.lookup(to_port).ok_or_else(|| LinkDrop::UnknownPort(to_port.to_owned()))?;

    Ok(ResolvedLink {
        key: edge_key(from.region, to.region),
        coordinates: [from.coordinates, to.coordinates],
        link,
    })
}

/// Resolve every link, dropping those whose endpoints are not both on the map.
pub fn resolve_links<'a>(
    links: &'a [RawLink],
    index: &PortIndex<'_>,
    diagnostics: &mut Diagnostics,
) -> Vec<ResolvedLink<'a>> {
    let mut resolved = Vec::with_capacity(links.len());

    for link in links {
        match resolve_link(link, index) {
            Ok(r) => resolved.push(r),
            Err(reason) => {
                debug!(link = %link.id, %reason, "dropping link");
                match reason {
                    LinkDrop::TooFewPorts => diagnostics.links_incomplete += 1,
                    LinkDrop::UnknownPort(_) => diagnostics.links_unresolved += 1,
                }
            }
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::{Site, SiteMap, SubNode};
    use crate::core::types::RawPort;

    fn sites() -> SiteMap {
        let mk = |lat, lng, ports: &[&str]| Site {
            latitude: lat,
            longitude: lng,
            address: None,
            sub_nodes: vec![SubNode {
                label: "n".into(),
                ports: ports.iter().map(|id| RawPort { id: (*id).into(), ..Default::default() }).collect(),
            }],
        };
        let mut sites = SiteMap::new();
        sites.insert("US-FL".into(), mk(25.7, -80.2, &["p1"]));
        sites.insert("US-GA".into(), mk(33.7, -84.3, &["p2"]));
        sites
    }

    fn link(id: &str, ports: &[&str]) -> RawLink {
        RawLink {
            id: id.into(),
            ports: Some(ports.iter().map(|p| (*p).to_owned()).collect()),
            status: Some("up".into()),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_both_endpoints_in_link_order() {
        let sites = sites();
        let mut diag = Diagnostics::default();
        let index = PortIndex::build(&sites, &mut diag);
        let l = link("L1", &["p2", "p1"]);

        let r = resolve_link(&l, &index).unwrap();

        assert_eq!(r.key, "US-GA-US-FL");
        assert_eq!(r.coordinates, [Coordinates::new(33.7, -84.3), Coordinates::new(25.7, -80.2)]);
        assert_eq!(r.link, &l);
    }

    #[test]
    fn unknown_port_drops_the_link() {
        let sites = sites();
        let mut diag = Diagnostics::default();
        let index = PortIndex::build(&sites, &mut diag);
        let links = vec![link("L2", &["p1", "p9"]), link("L3", &["p1"]), link("L4", &[])];

        let resolved = resolve_links(&links, &index, &mut diag);

        assert!(resolved.is_empty());
        assert_eq!(diag.links_unresolved, 1);
        assert_eq!(diag.links_incomplete, 2);
        assert_eq!(resolve_link(&links[0], &index), Err(LinkDrop::UnknownPort("p9".into())));
    }

    #[test]
    fn extra_ports_beyond_two_are_ignored() {
        let sites = sites();
        let mut diag = Diagnostics::default();
        let index = PortIndex::build(&sites, &mut diag);
        let l = link("L5", &["p1", "p2", "p9"]);

        assert_eq!(resolve_link(&l, &index).unwrap().key, "US-FL-US-GA");
    }
}
