// status predicates; the renderer and the report both go through these

use serde::Serialize;

use crate::core::types::{RawLink, RawPort};

pub const UP: &str = "up";
pub const ENABLED: &str = "enabled";
pub const DISABLED: &str = "disabled";

/// Down = (status != "up" and state == "enabled") or state == "disabled".
///
/// A port with no administrative state is only down if it is disabled, so a
/// missing state never counts as down.
pub fn port_down(status: Option<&str>, state: Option<&str>) -> bool {
    let disabled = state == Some(DISABLED);
    let enabled_not_up = state == Some(ENABLED) && status != Some(UP);
    disabled || enabled_not_up
}

pub fn is_port_down(port: &RawPort) -> bool {
    port_down(port.status.as_deref(), port.state.as_deref())
}

/// A link with no status is not "up".
pub fn is_link_down(link: &RawLink) -> bool {
    link.status.as_deref() != Some(UP)
}

/// True iff at least one member link is not up.
pub fn is_edge_degraded(members: &[RawLink]) -> bool {
    members.iter().any(is_link_down)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeState {
    Healthy,
    Degraded,
}

impl EdgeState {
    pub fn of(members: &[RawLink]) -> Self {
        if is_edge_degraded(members) { EdgeState::Degraded } else { EdgeState::Healthy }
    }

    pub fn is_degraded(self) -> bool {
        matches!(self, EdgeState::Degraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(status: Option<&str>, state: Option<&str>) -> RawPort {
        RawPort {
            id: "p".into(),
            status: status.map(str::to_owned),
            state: state.map(str::to_owned),
            ..Default::default()
        }
    }

    fn link(id: &str, status: Option<&str>) -> RawLink {
        RawLink { id: id.into(), status: status.map(str::to_owned), ..Default::default() }
    }

    #[test]
    fn port_down_truth_table() {
        assert!(is_port_down(&port(Some("down"), Some("enabled"))));
        assert!(is_port_down(&port(Some("up"), Some("disabled"))));
        assert!(is_port_down(&port(Some("down"), Some("disabled"))));
        assert!(is_port_down(&port(None, Some("enabled"))));
        assert!(!is_port_down(&port(Some("up"), Some("enabled"))));
    }

    #[test]
    fn port_without_state_is_not_down() {
        assert!(!is_port_down(&port(Some("down"), None)));
        assert!(!is_port_down(&port(None, None)));
        assert!(!is_port_down(&port(Some("down"), Some("maintenance"))));
    }

    #[test]
    fn status_comparison_is_case_sensitive() {
        assert!(is_port_down(&port(Some("UP"), Some("enabled"))));
        assert!(is_link_down(&link("L1", Some("Up"))));
    }

    #[test]
    fn edge_degraded_iff_any_member_down() {
        let up = link("L1", Some("up"));
        let down = link("L2", Some("down"));
        let unknown = link("L3", None);

        assert!(!is_edge_degraded(&[up.clone(), up.clone()]));
        assert!(is_edge_degraded(&[up.clone(), down]));
        assert!(is_edge_degraded(&[up, unknown]));
        assert!(!is_edge_degraded(&[]));
    }

    #[test]
    fn edge_state_follows_predicate() {
        assert_eq!(EdgeState::of(&[link("L1", Some("up"))]), EdgeState::Healthy);
        assert!(EdgeState::of(&[link("L1", Some("down"))]).is_degraded());
    }
}
