// domain allow-list filtering
use tracing::debug;

use crate::core::diagnostics::Diagnostics;
use crate::core::types::RawNode;

/// Literal, case-sensitive substring match against the node identifier.
pub fn is_allowed<S: AsRef<str>>(node_id: &str, allowed_domains: &[S]) -> bool {
    allowed_domains.is_empty() || allowed_domains.iter().any(|d| node_id.contains(d.as_ref()))
}

/// Keep nodes whose identifier contains at least one allowed domain.
///
/// An empty allow-list passes every node through.
pub fn filter_by_domain<'a, S: AsRef<str>>(
    nodes: &'a [RawNode],
    allowed_domains: &[S],
    diagnostics: &mut Diagnostics,
) -> Vec<&'a RawNode> {
    nodes
        .iter()
        .filter(|node| {
            let keep = is_allowed(&node.id, allowed_domains);
            if !keep {
                debug!(node = %node.id, "node outside allowed domains");
                diagnostics.nodes_outside_domains += 1;
            }
            keep
        })
        .collect()
}
