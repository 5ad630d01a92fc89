//! Query results: routes, connectivity and direct edges.

use serde::{Deserialize, Serialize};

/// A minimum-distance route: place names in travel order and the summed
/// edge distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Places along the route. Never empty; origin first, destination last.
    pub places: Vec<String>,
    pub distance_km: f64,
}

impl Route {
    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.places.len().saturating_sub(1)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} km)", self.places.join(" -> "), self.distance_km)
    }
}

/// Answer to "are these two places connected?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    /// A directed path of any length exists.
    pub connected: bool,
    /// A direct edge is declared.
    pub direct_edge: bool,
}

/// The declared direct edge between two places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectEdge {
    pub adjacent: bool,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let r = Route { places: vec!["X".into(), "Y".into(), "Z".into()], distance_km: 3.0 };
        assert_eq!(r.to_string(), "X -> Y -> Z (3 km)");
        assert_eq!(r.hops(), 2);
    }
}
