/*
Boundary pass over the loosely shaped snapshot returned by the topology source.

    { nodes: [ {id, name, location?, ports?} ], links: [ {id, ports?, status?, ...} ] }

Every optional or wrongly typed field is resolved here, once. Nothing in this
module fails: wrong container shapes become empty lists or omitted entries and
are recorded as ShapeIssue values for the caller to log. Port and link fields
of an unexpected shape are not dropped; they stay verbatim in `extra`.
*/
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use tracing::warn;

use crate::core::types::{Completeness, Location, RawLink, RawNode, RawPort};
use crate::error::{Result, TopologyError};

const NODES: &str = "nodes";
const LINKS: &str = "links";

/// A structural problem found while normalizing the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ShapeIssue {
    #[error("snapshot could not be parsed: {0}")]
    Unparsable(String),

    #[error("snapshot is not a record")]
    NotARecord,

    #[error("snapshot has no `{0}` container")]
    MissingContainer(&'static str),

    #[error("`{0}` is not a list")]
    NotAList(&'static str),

    #[error("`{container}[{index}]` is not a record")]
    NotAnEntry { container: &'static str, index: usize },

    #[error("port {index} of node `{node}` is not a record")]
    NotAPort { node: String, index: usize },
}

impl ShapeIssue {
    /// True when the top level itself was unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ShapeIssue::Unparsable(_) | ShapeIssue::NotARecord)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub nodes: Vec<RawNode>,
    pub links: Vec<RawLink>,
    pub shape: Vec<ShapeIssue>,
}

impl Snapshot {
    pub fn new(nodes: Vec<RawNode>, links: Vec<RawLink>) -> Self {
        Self { nodes, links, shape: Vec::new() }
    }

    /// Snapshot standing in for input that could not be read at all.
    pub fn malformed(issue: ShapeIssue) -> Self {
        Self { shape: vec![issue], ..Default::default() }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_toon_str(text: &str) -> Result<Self> {
        let value: Value =
            toon_format::decode_default(text).map_err(|e| TopologyError::Toon(e.to_string()))?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            warn!("topology snapshot is not a record; treating it as empty");
            return Self::malformed(ShapeIssue::NotARecord);
        };

        let mut shape = Vec::new();
        let nodes = entries(root, NODES, &mut shape)
            .into_iter()
            .map(|obj| node_from_object(obj, &mut shape))
            .collect();
        let links = entries(root, LINKS, &mut shape)
            .into_iter()
            .map(link_from_object)
            .collect();

        for issue in &shape {
            warn!(%issue, "topology snapshot shape issue");
        }

        Self { nodes, links, shape }
    }

    pub fn is_malformed(&self) -> bool {
        self.shape.iter().any(ShapeIssue::is_malformed)
    }
}

//collect the record entries of a top-level list, noting anything that isn't one
fn entries<'a>(
    root: &'a Map<String, Value>,
    container: &'static str,
    shape: &mut Vec<ShapeIssue>,
) -> Vec<&'a Map<String, Value>> {
    let list = match root.get(container) {
        None | Some(Value::Null) => {
            shape.push(ShapeIssue::MissingContainer(container));
            return Vec::new();
        }
        Some(Value::Array(list)) => list,
        Some(_) => {
            shape.push(ShapeIssue::NotAList(container));
            return Vec::new();
        }
    };

    list.iter()
        .enumerate()
        .filter_map(|(index, v)| match v.as_object() {
            Some(obj) => Some(obj),
            None => {
                shape.push(ShapeIssue::NotAnEntry { container, index });
                None
            }
        })
        .collect()
}

fn node_from_object(obj: &Map<String, Value>, shape: &mut Vec<ShapeIssue>) -> RawNode {
    let id = id_field(obj, "id");
    let location = obj.get("location").and_then(Value::as_object).map(location_from_object);

    let mut ports = Vec::new();
    for (index, entry) in obj.get("ports").and_then(Value::as_array).into_iter().flatten().enumerate() {
        match entry.as_object() {
            Some(port) => ports.push(port_from_object(port)),
            None => shape.push(ShapeIssue::NotAPort { node: id.clone().unwrap_or_default(), index }),
        }
    }

    let has_region = location.as_ref().and_then(Location::region).is_some();
    let completeness = if id.is_some() && has_region {
        Completeness::Complete
    } else {
        Completeness::Partial
    };

    RawNode {
        id: id.unwrap_or_default(),
        name: string_field(obj, "name").unwrap_or_default(),
        location,
        ports,
        completeness,
    }
}

// the region code is the site key and is kept verbatim; only "" is missing
fn location_from_object(obj: &Map<String, Value>) -> Location {
    Location {
        latitude: number_field(obj, "latitude"),
        longitude: number_field(obj, "longitude"),
        address: string_field(obj, "address"),
        region: string_field(obj, "iso3166_2_lvl4").filter(|r| !r.is_empty()),
    }
}

/*
Typed reads over one port or link record.

A field is taken only when it has the expected shape. Everything not taken,
including a known field with some other shape, is returned by `rest()` and
kept verbatim in `extra`, so the record serializes back unmodified.
*/
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    taken: Vec<&'static str>,
}

impl<'a> Fields<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self { obj, taken: Vec::new() }
    }

    fn take<T>(&mut self, key: &'static str, read: impl FnOnce(&'a Value) -> Option<T>) -> Option<T> {
        let value = self.obj.get(key).and_then(read);
        if value.is_some() {
            self.taken.push(key);
        }
        value
    }

    fn string(&mut self, key: &'static str) -> Option<String> {
        self.take(key, |v| v.as_str().map(str::to_owned))
    }

    fn number(&mut self, key: &'static str) -> Option<Number> {
        self.take(key, |v| match v {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        })
    }

    fn id(&mut self) -> String {
        self.take("id", |v| v.as_str().filter(|s| !s.is_empty()).map(str::to_owned))
            .unwrap_or_default()
    }

    fn rest(self) -> Map<String, Value> {
        self.obj
            .iter()
            .filter(|(k, _)| !self.taken.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

fn port_from_object(obj: &Map<String, Value>) -> RawPort {
    let mut f = Fields::new(obj);
    RawPort {
        id: f.id(),
        name: f.string("name"),
        node: f.string("node"),
        port_type: f.string("type"),
        status: f.string("status"),
        state: f.string("state"),
        entities: f.take("entities", |v| v.as_array().cloned()),
        extra: f.rest(),
    }
}

fn link_from_object(obj: &Map<String, Value>) -> RawLink {
    let mut f = Fields::new(obj);
    let id = f.id();
    let ports = f.take("ports", |v| {
        v.as_array()?
            .iter()
            .map(|p| p.as_str().map(str::to_owned))
            .collect::<Option<Vec<String>>>()
    });

    let endpoints_present = ports
        .as_ref()
        .is_some_and(|ports| ports.len() >= 2 && ports[..2].iter().all(|p| !p.is_empty()));
    let completeness = if !id.is_empty() && endpoints_present {
        Completeness::Complete
    } else {
        Completeness::Partial
    };

    RawLink {
        id,
        name: f.string("name"),
        ports,
        bandwidth: f.number("bandwidth"),
        residual_bandwidth: f.number("residual_bandwidth"),
        latency: f.number("latency"),
        packet_loss: f.number("packet_loss"),
        availability: f.number("availability"),
        status: f.string("status"),
        state: f.string("state"),
        extra: f.rest(),
        completeness,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

// node identifiers may arrive as numbers
fn id_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// coordinates accept numeric strings; non-finite values count as absent
fn number_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let n = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
