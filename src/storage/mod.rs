//! # Edge Store Trait
//!
//! The contract between the loader and whatever persists the city's edge
//! list. The loader only ever asks for the full, unordered record set; how
//! the records are stored or transported is the store's business.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory, for tests and embedding |
//! | `JsonFileStore` | `json` | JSON export of the edge table on disk |

pub mod memory;
pub mod json;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::EdgeRecord;
use crate::Result;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

// ============================================================================
// Store configuration
// ============================================================================

/// Which edge store to open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Empty in-memory store (records are added programmatically).
    Memory,

    /// JSON file holding the edge table.
    Json { path: PathBuf },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json { path: PathBuf::from("data/edges.json") }
    }
}

impl StoreConfig {
    /// Open the configured store behind a trait object.
    pub fn open(&self) -> Box<dyn EdgeStore> {
        match self {
            StoreConfig::Memory => Box::new(MemoryStore::new()),
            StoreConfig::Json { path } => Box::new(JsonFileStore::new(path.clone())),
        }
    }
}

// ============================================================================
// EdgeStore trait
// ============================================================================

/// Source of edge records.
///
/// `fetch_edges` must return the complete record set in one go; the loader
/// never publishes a partial graph.
#[async_trait]
pub trait EdgeStore: Send + Sync + 'static {
    /// Every edge record, in no particular order.
    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    /// Release any resources held by the store.
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: EdgeStore + ?Sized> EdgeStore for Box<T> {
    async fn fetch_edges(&self) -> Result<Vec<EdgeRecord>> {
        (**self).fetch_edges().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn shutdown(&self) -> Result<()> {
        (**self).shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_from_toml() {
        let cfg: StoreConfig = toml::from_str("kind = \"json\"\npath = \"edges.json\"").unwrap();
        assert_eq!(cfg, StoreConfig::Json { path: PathBuf::from("edges.json") });
        let cfg: StoreConfig = toml::from_str("kind = \"memory\"").unwrap();
        assert_eq!(cfg, StoreConfig::Memory);
    }

    #[tokio::test]
    async fn test_boxed_store_delegates() {
        let store: Box<dyn EdgeStore> = Box::new(MemoryStore::with_records(vec![EdgeRecord::direct("A", "A", 1.0)]));
        assert_eq!(store.fetch_edges().await.unwrap().len(), 1);
        assert!(store.describe().starts_with("memory"));
    }
}
