// typed snapshot records, produced once by the boundary pass in snapshot.rs
//
// Ports and links reach the renderer unmodified: a field the pipeline reads is
// typed, anything else (including a known field with an unexpected shape)
// stays verbatim in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Whether the boundary pass found every field the pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Completeness {
    #[default]
    Complete,
    Partial,
}

/// A `[latitude, longitude]` point. Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self { latitude, longitude }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.latitude, c.longitude]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// ISO 3166-2 subdivision code; the site grouping key.
    #[serde(rename = "iso3166_2_lvl4", default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Location {
    /// Missing coordinates default to 0.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude.unwrap_or(0.0), self.longitude.unwrap_or(0.0))
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPort {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Value>>,
    /// Fields the pipeline does not interpret, passed through to the renderer.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPort {
    pub fn is_down(&self) -> bool {
        crate::core::state::is_port_down(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub ports: Vec<RawPort>,
    #[serde(skip)]
    pub completeness: Completeness,
}

impl RawNode {
    pub fn region(&self) -> Option<&str> {
        self.location.as_ref().and_then(Location::region)
    }

    /// Display name, or the identifier when the name is empty.
    pub fn label(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLink {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port identifiers in source order. `None` when the list was missing or
    /// held something other than identifiers (the raw value is in `extra`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual_bandwidth: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_loss: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub completeness: Completeness,
}

impl RawLink {
    /// `(ports[0], ports[1])` when the link references at least two ports.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        match self.ports.as_deref()? {
            [a, b, ..] => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }

    pub fn is_down(&self) -> bool {
        crate::core::state::is_link_down(self)
    }
}
