// port id -> owning site, built once per run
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::warn;

use crate::core::diagnostics::Diagnostics;
use crate::core::mapping::SiteMap;
use crate::core::types::Coordinates;

/// The site that owns a port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortSite<'a> {
    pub region: &'a str,
    pub coordinates: Coordinates,
}

/// Reverse index from port identifier to owning site.
///
/// Built in one pass over sites, sub-nodes and ports in their stored order.
/// When two sites claim the same port the first claim wins; later claims are
/// counted and logged but never replace it.
#[derive(Debug, Default)]
pub struct PortIndex<'a> {
    by_port: HashMap<&'a str, PortSite<'a>>,
}

impl<'a> PortIndex<'a> {
    pub fn build(sites: &'a SiteMap, diagnostics: &mut Diagnostics) -> Self {
        let mut by_port = HashMap::new();

        for (region, site) in sites {
            let owner = PortSite { region: region.as_str(), coordinates: site.coordinates() };

            for port in site.ports().filter(|p| !p.id.is_empty()) {
                match by_port.entry(port.id.as_str()) {
                    Entry::Vacant(e) => {
                        e.insert(owner);
                    }
                    Entry::Occupied(e) => {
                        let first: &PortSite<'a> = e.get();
                        warn!(
                            port = %port.id,
                            kept = first.region,
                            ignored = region.as_str(),
                            "port claimed by more than one site"
                        );
                        diagnostics.duplicate_port_claims += 1;
                    }
                }
            }
        }

        Self { by_port }
    }

    pub fn lookup(&self, port_id: &str) -> Option<PortSite<'a>> {
        self.by_port.get(port_id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_port.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_port.is_empty()
    }
}
