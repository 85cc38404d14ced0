// errors for the fallible outer layer (text decoding, config files);
// the pipeline itself degrades by omission and reports through Diagnostics

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOON error: {0}")]
    Toon(String),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, TopologyError>;
