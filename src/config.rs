/*
Administrator configuration: which network domains appear on the map.

    let config = TopologyConfig::load("topology.toon")?;
    let topology = config.process(&snapshot);
*/

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::classify::{process, Topology};
use crate::core::snapshot::Snapshot;
use crate::error::{Result, TopologyError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Substrings matched against node identifiers. Empty keeps every node.
    #[serde(default)]
    pub allowed_domains: Vec<String>,
}

impl TopologyConfig {
    pub fn new<I, S>(allowed_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let config = Self { allowed_domains: allowed_domains.into_iter().map(Into::into).collect() };
        config.warn_on_empty_entries();
        config
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.warn_on_empty_entries();
        Ok(config)
    }

    pub fn from_toon_str(text: &str) -> Result<Self> {
        let value: Value =
            toon_format::decode_default(text).map_err(|e| TopologyError::Toon(e.to_string()))?;
        let config: Self = serde_json::from_value(value)?;
        config.warn_on_empty_entries();
        Ok(config)
    }

    /// Load from a `.json` or `.toon` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| TopologyError::Io { path: path.to_path_buf(), source })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("toon") => Self::from_toon_str(&text),
            other => Err(TopologyError::UnsupportedFormat(other.unwrap_or("").to_owned())),
        }
    }

    pub fn to_toon(&self) -> Result<String> {
        toon_format::encode_default(self).map_err(|e| TopologyError::Toon(e.to_string()))
    }

    pub fn is_pass_through(&self) -> bool {
        self.allowed_domains.is_empty()
    }

    pub fn process(&self, snapshot: &Snapshot) -> Topology {
        process(snapshot, &self.allowed_domains)
    }

    // an empty entry matches every identifier, which disables filtering
    fn warn_on_empty_entries(&self) {
        if self.allowed_domains.iter().any(String::is_empty) {
            warn!("allowed_domains contains an empty entry; every node will pass the domain filter");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_field_means_pass_through() {
        let config = TopologyConfig::from_json_str("{}").unwrap();
        assert!(config.is_pass_through());
    }

    #[test]
    fn parses_json_allow_list_in_order() {
        let config =
            TopologyConfig::from_json_str(r#"{"allowed_domains": ["ampath.net", "sax.net"]}"#).unwrap();
        assert_eq!(config, TopologyConfig::new(["ampath.net", "sax.net"]));
    }

    #[test]
    fn toon_text_produced_by_to_toon_loads_back() {
        let config = TopologyConfig::new(["ampath.net", "tenet.ac.za"]);
        let text = config.to_toon().unwrap();
        assert_eq!(TopologyConfig::from_toon_str(&text).unwrap(), config);
    }

    #[test]
    fn load_picks_format_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"allowed_domains": ["ampath.net"]}}"#).unwrap();

        let config = TopologyConfig::load(file.path()).unwrap();
        assert_eq!(config.allowed_domains, vec!["ampath.net".to_owned()]);
    }

    #[test]
    fn load_rejects_unknown_extension_and_missing_file() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(TopologyConfig::load(file.path()), Err(TopologyError::UnsupportedFormat(ext)) if ext == "yaml"));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(TopologyConfig::load(dir.path().join("absent.json")), Err(TopologyError::Io { .. })));
    }
}
