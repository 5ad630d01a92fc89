//! JSON file edge store.
//!
//! Reads the edge table from a JSON file on every fetch, so editing the file
//! and reloading picks up the change. Two layouts are accepted:
//!
//! ```text
//! [ {"origen": "A", "destino": "B", "distancia_km": 1.2, "adyacente": 1}, ... ]
//! { "count": 1, "data": [ { ... } ] }
//! ```
//!
//! The second is what `export::export_edges_json` writes. Records may also
//! use the English field names (`origin`, `destination`, `distance_km`,
//! `adjacent`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::model::EdgeRecord;
use crate::{Error, Result};
use super::EdgeStore;

#[derive(Deserialize)]
#[serde(untagged)]
enum EdgeFile {
    List(Vec<EdgeRecord>),
    Envelope { data: Vec<EdgeRecord> },
}

/// Edge table stored as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse a JSON edge document in either accepted layout.
pub fn parse_edges(bytes: &[u8]) -> Result<Vec<EdgeRecord>> {
    let file: EdgeFile = serde_json::from_slice(bytes)?;
    Ok(match file {
        EdgeFile::List(records) => records,
        EdgeFile::Envelope { data } => data,
    })
}

#[async_trait]
impl EdgeStore for JsonFileStore {
    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::StorageError(format!("cannot read edge file {}: {e}", self.path.display()))
        })?;
        parse_edges(&bytes).map_err(|e| {
            Error::StorageError(format!("malformed edge file {}: {e}", self.path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
