//! # city-graph: Directed Place Graph for One City
//!
//! Answers two questions about a fixed, directed, weighted graph of places:
//!
//! - are A and B connected, directly or through other places? (Warshall
//!   transitive closure)
//! - what is the shortest route from A to B, and how long is it? (Dijkstra
//!   with path reconstruction)
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `EdgeStore` is the contract between the loader and persistence
//! 2. **Immutable snapshots**: a loaded graph is never mutated; reload builds and swaps a new one
//! 3. **Pure engines**: reachability and shortest path are functions of the matrices
//! 4. **Distinct failures**: unknown place, missing parameter and "no path" never collapse into each other
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use city_graph::{EdgeRecord, RouteGraph};
//!
//! # async fn example() -> city_graph::Result<()> {
//! let graph = RouteGraph::open_memory(vec![
//!     EdgeRecord::direct("X", "Y", 1.0),
//!     EdgeRecord::direct("Y", "Z", 2.0),
//!     EdgeRecord::new("Z", "X", 0.0, false),
//! ])
//! .await?;
//!
//! let link = graph.connectivity("X", "Z")?;
//! assert!(link.connected && !link.direct_edge);
//!
//! if let Some(route) = graph.shortest_route("X", "Z")? {
//!     println!("{route}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Edge Stores
//!
//! | Store | Description |
//! |-------|-------------|
//! | `MemoryStore` | In-memory edge table for tests and embedding |
//! | `JsonFileStore` | JSON export of the edge table |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod graph;
pub mod algo;
pub mod export;
pub mod config;
pub mod logging;
#[cfg(feature = "server")]
pub mod server;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Connectivity, DirectEdge, EdgeRecord, Matrix, PlaceId, Route};

// ============================================================================
// Re-exports: Storage and graph index
// ============================================================================

pub use storage::{EdgeStore, JsonFileStore, MemoryStore, StoreConfig};
pub use graph::Snapshot;
pub use config::Config;

// ============================================================================
// Query facade
// ============================================================================

/// The primary entry point. A `RouteGraph` owns an edge store and the
/// currently published graph snapshot, and answers queries by place name.
///
/// Queries grab the current `Arc<Snapshot>` and compute on it without
/// holding any lock, so a concurrent [`reload`](Self::reload) can never
/// expose a half-built graph: each query sees the old snapshot or the new
/// one.
pub struct RouteGraph<S: EdgeStore> {
    store: S,
    snapshot: RwLock<Arc<Snapshot>>,
    /// Generation for the next successful load. Held for the whole reload,
    /// so reloads run one at a time and generations have no gaps.
    next_generation: tokio::sync::Mutex<u64>,
}

impl<S: EdgeStore> RouteGraph<S> {
    /// Wrap `store` and load the first snapshot. Fails if the edge list
    /// cannot be read or is inconsistent.
    pub async fn open(store: S) -> Result<Self> {
        let graph = Self::unloaded(store);
        graph.reload().await?;
        Ok(graph)
    }

    /// Wrap `store` without loading. Queries see an empty graph until
    /// [`reload`](Self::reload) succeeds.
    pub fn unloaded(store: S) -> Self {
        Self {
            store,
            snapshot: RwLock::new(Arc::new(Snapshot::empty())),
            next_generation: tokio::sync::Mutex::new(1),
        }
    }

    /// Rebuild the snapshot from the store and publish it.
    ///
    /// On failure the previously published snapshot stays in place.
    pub async fn reload(&self) -> Result<Arc<Snapshot>> {
        let mut next_generation = self.next_generation.lock().await;
        let generation = *next_generation;

        match graph::load_snapshot(&self.store, generation).await {
            Ok(fresh) => {
                *next_generation += 1;
                let fresh = Arc::new(fresh);
                let previous = std::mem::replace(&mut *self.snapshot.write(), Arc::clone(&fresh));
                info!(
                    generation,
                    previous = previous.generation(),
                    places = fresh.place_count(),
                    "published place graph snapshot"
                );
                Ok(fresh)
            }
            Err(e) => {
                warn!(generation, error = %e, "reload failed; keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Place names in index order.
    pub fn places(&self) -> Vec<String> {
        self.snapshot().places().to_vec()
    }

    /// Raw edge records as the store currently holds them.
    pub async fn edges(&self) -> Result<Vec<EdgeRecord>> {
        self.store.fetch_edges().await
    }

    /// Is `destination` reachable from `origin`, and is there a direct edge?
    ///
    /// Every place counts as reachable from itself.
    pub fn connectivity(&self, origin: &str, destination: &str) -> Result<Connectivity> {
        let snap = self.snapshot();
        let (i, j) = resolve_pair(&snap, origin, destination)?;
        let result = Connectivity {
            connected: snap.is_reachable(i, j),
            direct_edge: snap.is_adjacent(i, j),
        };
        debug!(origin, destination, connected = result.connected, direct = result.direct_edge, "connectivity query");
        Ok(result)
    }

    /// Minimum-distance route from `origin` to `destination`.
    ///
    /// `Ok(None)` means both places exist but no usable path joins them.
    pub fn shortest_route(&self, origin: &str, destination: &str) -> Result<Option<Route>> {
        let snap = self.snapshot();
        let (i, j) = resolve_pair(&snap, origin, destination)?;

        let route = snap.shortest_path(i, j).map(|(distance_km, ids)| Route {
            places: ids
                .into_iter()
                .filter_map(|id| snap.place(id).map(str::to_owned))
                .collect(),
            distance_km,
        });
        debug!(origin, destination, found = route.is_some(), "shortest route query");
        Ok(route)
    }

    /// Like [`shortest_route`](Self::shortest_route) but reports a missing
    /// path as [`Error::NoPath`], for callers that surface it as a failure.
    pub fn require_route(&self, origin: &str, destination: &str) -> Result<Route> {
        self.shortest_route(origin, destination)?.ok_or_else(|| Error::NoPath {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })
    }

    /// The declared direct edge from `origin` to `destination`.
    pub fn direct_distance(&self, origin: &str, destination: &str) -> Result<DirectEdge> {
        let snap = self.snapshot();
        let (i, j) = resolve_pair(&snap, origin, destination)?;
        Ok(DirectEdge {
            adjacent: snap.is_adjacent(i, j),
            distance_km: snap.distance_of(i, j),
        })
    }
}

/// In-memory route graph for tests and embedding.
impl RouteGraph<MemoryStore> {
    pub async fn open_memory(records: impl IntoIterator<Item = EdgeRecord>) -> Result<Self> {
        Self::open(MemoryStore::with_records(records)).await
    }
}

/// Resolve both names, rejecting empty ones before touching the graph.
fn resolve_pair(snap: &Snapshot, origin: &str, destination: &str) -> Result<(PlaceId, PlaceId)> {
    if origin.is_empty() {
        return Err(Error::MissingParameter("origin".into()));
    }
    if destination.is_empty() {
        return Err(Error::MissingParameter("destination".into()));
    }
    let i = snap.index_of(origin).ok_or_else(|| Error::NotFound(origin.to_string()))?;
    let j = snap.index_of(destination).ok_or_else(|| Error::NotFound(destination.to_string()))?;
    Ok((i, j))
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Edge {origin} -> {destination} references unknown place '{place}'")]
    UnknownPlace { origin: String, destination: String, place: String },

    #[error("Invalid edge {origin} -> {destination}: {reason}")]
    InvalidRecord { origin: String, destination: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Place not found: {0}")]
    NotFound(String),

    #[error("No path exists from {origin} to {destination}")]
    NoPath { origin: String, destination: String },

    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors that abort graph construction (bad store, bad data, bad
    /// configuration) as opposed to per-query failures.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::StorageError(_)
                | Error::UnknownPlace { .. }
                | Error::InvalidRecord { .. }
                | Error::Config(_)
                | Error::Io(_)
                | Error::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
