// topology core: flat snapshot of devices, ports and links -> sites keyed by
// region code and edges keyed by ordered site pair, ready for map rendering.
// Pure and synchronous; logs through `tracing`, the caller picks the subscriber.

pub mod config;
pub mod core;
pub mod error;
pub mod report;

pub use crate::config::TopologyConfig;
pub use crate::core::classify::{process, process_str, process_value, Topology};
pub use crate::core::diagnostics::Diagnostics;
pub use crate::core::lifting::{EdgeBucket, EdgeMap};
pub use crate::core::mapping::{Site, SiteMap, SubNode};
pub use crate::core::refresh::TopologyView;
pub use crate::core::snapshot::{ShapeIssue, Snapshot};
pub use crate::core::state::{is_edge_degraded, is_port_down, EdgeState};
pub use crate::core::types::{Completeness, Coordinates, Location, RawLink, RawNode, RawPort};
pub use crate::error::{Result, TopologyError};
pub use crate::report::TopologyReport;
