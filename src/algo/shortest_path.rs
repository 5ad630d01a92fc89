//! Dijkstra over the adjacency/distance matrices.
//!
//! Plain O(N^2) selection: the unsettled place with the smallest tentative
//! distance is settled next, lowest index first on ties. An edge u -> v is
//! usable only when it is declared adjacent AND its distance is strictly
//! positive.

use crate::model::{Matrix, PlaceId};

/// Single-source result: tentative distances and predecessors for every
/// place, as left by a full run from `origin`.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    origin: PlaceId,
    dist: Vec<f64>,
    pred: Vec<Option<PlaceId>>,
}

impl ShortestPaths {
    pub fn origin(&self) -> PlaceId {
        self.origin
    }

    /// Minimum distance to `to`, or `None` when unreachable.
    pub fn dist(&self, to: PlaceId) -> Option<f64> {
        self.dist.get(to.0).copied().filter(|d| d.is_finite())
    }

    pub fn predecessor(&self, to: PlaceId) -> Option<PlaceId> {
        self.pred.get(to.0).copied().flatten()
    }

    /// Walk predecessors back from `to`. `None` when `to` is unreachable or
    /// out of range; `[origin]` when `to` is the origin.
    pub fn reconstruct(&self, to: PlaceId) -> Option<Vec<PlaceId>> {
        if to.0 >= self.dist.len() {
            return None;
        }
        if to == self.origin {
            return Some(vec![to]);
        }
        self.predecessor(to)?;

        let mut path = vec![to];
        let mut current = to;
        while let Some(prev) = self.predecessor(current) {
            path.push(prev);
            current = prev;
            // predecessors form a tree rooted at the origin; bail out on anything else
            if path.len() > self.dist.len() {
                return None;
            }
        }
        if current != self.origin {
            return None;
        }
        path.reverse();
        Some(path)
    }
}

/// Run Dijkstra from `origin` to every place.
///
/// `adjacency` and `distance` must share one dimension; cells outside either
/// are treated as "no edge". An out-of-range origin yields a result where
/// nothing is reachable.
pub fn dijkstra(adjacency: &Matrix<bool>, distance: &Matrix<f64>, origin: PlaceId) -> ShortestPaths {
    let n = adjacency.dim();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<PlaceId>> = vec![None; n];
    let mut settled = vec![false; n];

    if origin.0 < n {
        dist[origin.0] = 0.0;
    }

    for _ in 0..n {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if settled[v] {
                continue;
            }
            match next {
                Some(best) if dist[v] >= dist[best] => {}
                _ => next = Some(v),
            }
        }
        let Some(u) = next else { break };
        if dist[u].is_infinite() {
            // everything still unsettled is unreachable
            break;
        }
        settled[u] = true;

        for v in 0..n {
            if settled[v] || !adjacency.get(u, v).copied().unwrap_or(false) {
                continue;
            }
            let w = distance.get(u, v).copied().unwrap_or(0.0);
            if w <= 0.0 {
                continue;
            }
            let candidate = dist[u] + w;
            if candidate < dist[v] {
                dist[v] = candidate;
                pred[v] = Some(PlaceId(u));
            }
        }
    }

    ShortestPaths { origin, dist, pred }
}

/// Minimum-distance path from `origin` to `destination` with its total
/// distance, or `None` when no usable path exists.
pub fn shortest_path(
    adjacency: &Matrix<bool>,
    distance: &Matrix<f64>,
    origin: PlaceId,
    destination: PlaceId,
) -> Option<(f64, Vec<PlaceId>)> {
    let paths = dijkstra(adjacency, distance, origin);
    let path = paths.reconstruct(destination)?;
    let total = paths.dist(destination)?;
    Some((total, path))
}
