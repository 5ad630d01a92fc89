//! # Graph Index
//!
//! A [`Snapshot`] is one fully built, immutable view of the city graph: the
//! ordered place list, a name index, and the adjacency and distance matrices.
//! Snapshots are produced only by [`loader`] and are never mutated after that;
//! a reload builds a fresh one.

pub mod loader;

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;

use crate::algo;
use crate::model::{Matrix, PlaceId};

pub use loader::{build_snapshot, load_snapshot};

/// Immutable place graph.
///
/// Invariants: `places` has unique entries in ascending order; `index` maps
/// every entry back to its position; both matrices have dimension
/// `places.len()`.
#[derive(Debug)]
pub struct Snapshot {
    places: Vec<String>,
    index: HashMap<String, PlaceId>,
    adjacency: Matrix<bool>,
    distance: Matrix<f64>,
    generation: u64,
    loaded_at: DateTime<Utc>,
    /// Reflexive-transitive closure, computed on first use.
    closure: OnceLock<Matrix<bool>>,
}

impl Snapshot {
    /// The graph with no places. Published before anything has been loaded.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Matrix::new(0, false), Matrix::new(0, 0.0), 0)
    }

    /// Assemble a snapshot. Callers (the loader) guarantee the invariants.
    pub(crate) fn from_parts(
        places: Vec<String>,
        adjacency: Matrix<bool>,
        distance: Matrix<f64>,
        generation: u64,
    ) -> Self {
        debug_assert_eq!(adjacency.dim(), places.len());
        debug_assert_eq!(distance.dim(), places.len());

        let index = places
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), PlaceId(i)))
            .collect();

        Self {
            places,
            index,
            adjacency,
            distance,
            generation,
            loaded_at: Utc::now(),
            closure: OnceLock::new(),
        }
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Exact, case-sensitive lookup.
    pub fn index_of(&self, name: &str) -> Option<PlaceId> {
        self.index.get(name).copied()
    }

    pub fn place(&self, id: PlaceId) -> Option<&str> {
        self.places.get(id.index()).map(String::as_str)
    }

    pub fn places(&self) -> &[String] {
        &self.places
    }

    /// Whether a direct edge i -> j is declared. False for out-of-range ids.
    pub fn is_adjacent(&self, i: PlaceId, j: PlaceId) -> bool {
        self.adjacency.get(i.index(), j.index()).copied().unwrap_or(false)
    }

    /// Direct-edge distance i -> j; 0.0 when there is none or an id is out
    /// of range.
    pub fn distance_of(&self, i: PlaceId, j: PlaceId) -> f64 {
        self.distance.get(i.index(), j.index()).copied().unwrap_or(0.0)
    }

    pub fn adjacency(&self) -> &Matrix<bool> {
        &self.adjacency
    }

    pub fn distances(&self) -> &Matrix<f64> {
        &self.distance
    }

    /// Number of declared direct edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.rows().map(|r| r.iter().filter(|&&a| a).count()).sum()
    }

    /// Reflexive-transitive closure of the adjacency matrix. Computed once per
    /// snapshot, so it can never outlive a reload.
    pub fn closure(&self) -> &Matrix<bool> {
        self.closure.get_or_init(|| algo::reachability_closure(&self.adjacency))
    }

    pub fn is_reachable(&self, i: PlaceId, j: PlaceId) -> bool {
        self.closure().get(i.index(), j.index()).copied().unwrap_or(false)
    }

    /// Minimum-distance path i -> j as place ids, with its total distance.
    pub fn shortest_path(&self, i: PlaceId, j: PlaceId) -> Option<(f64, Vec<PlaceId>)> {
        algo::shortest_path(&self.adjacency, &self.distance, i, j)
    }

    /// Sequence number of the load that produced this snapshot: 0 for the
    /// empty placeholder, then 1, 2, ... per successful load. Failed loads
    /// do not consume a number.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeRecord;

    fn xyz() -> Snapshot {
        build_snapshot(
            vec![
                EdgeRecord::direct("X", "Y", 1.0),
                EdgeRecord::direct("Y", "Z", 2.0),
                EdgeRecord::new("Z", "Z", 0.0, false),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let g = xyz();
        assert_eq!(g.place_count(), 3);
        assert_eq!(g.places(), &["X", "Y", "Z"]);
        let (x, y, z) = (g.index_of("X").unwrap(), g.index_of("Y").unwrap(), g.index_of("Z").unwrap());
        assert!(g.is_adjacent(x, y));
        assert!(!g.is_adjacent(y, x));
        assert_eq!(g.distance_of(y, z), 2.0);
        assert_eq!(g.distance_of(x, z), 0.0);
        assert_eq!(g.place(z), Some("Z"));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.generation(), 1);
    }

    #[test]
    fn test_lookup_is_exact() {
        let g = xyz();
        assert_eq!(g.index_of("x"), None);
        assert_eq!(g.index_of("X "), None);
        assert_eq!(g.index_of(""), None);
    }

    #[test]
    fn test_out_of_range_ids_are_harmless() {
        let g = xyz();
        assert!(!g.is_adjacent(PlaceId(0), PlaceId(99)));
        assert_eq!(g.distance_of(PlaceId(99), PlaceId(0)), 0.0);
        assert!(!g.is_reachable(PlaceId(99), PlaceId(99)));
        assert_eq!(g.place(PlaceId(3)), None);
    }

    #[test]
    fn test_closure_cached() {
        let g = xyz();
        let first: *const Matrix<bool> = g.closure();
        let second: *const Matrix<bool> = g.closure();
        assert_eq!(first, second);
        assert!(g.is_reachable(PlaceId(0), PlaceId(2)));
        assert!(!g.is_reachable(PlaceId(2), PlaceId(0)));
    }

    #[test]
    fn test_empty() {
        let g = Snapshot::empty();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
        assert!(g.closure().is_empty());
        assert_eq!(g.generation(), 0);
    }
}
