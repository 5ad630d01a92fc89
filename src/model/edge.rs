//! Edge records as supplied by the persistence collaborator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One persisted (origin, destination) row.
///
/// Serialized with the edge table's column names (`origen`, `destino`,
/// `distancia_km`, `adyacente`); the English names are accepted on input.
///
/// `adjacent` declares a direct edge regardless of `distance_km`; a zero
/// distance never counts as a usable edge for routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "origen", alias = "origin")]
    pub origin: String,
    #[serde(rename = "destino", alias = "destination")]
    pub destination: String,
    #[serde(rename = "distancia_km", alias = "distance_km", alias = "distanceKm")]
    pub distance_km: f64,
    #[serde(
        rename = "adyacente",
        alias = "adjacent",
        serialize_with = "adjacent_as_flag",
        deserialize_with = "adjacent_from_flag"
    )]
    pub adjacent: bool,
}

impl EdgeRecord {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: f64,
        adjacent: bool,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
            adjacent,
        }
    }

    /// Shorthand for a declared direct edge.
    pub fn direct(origin: impl Into<String>, destination: impl Into<String>, distance_km: f64) -> Self {
        Self::new(origin, destination, distance_km, true)
    }
}

/// Stores write the flag as 0/1, the way the source table holds it.
fn adjacent_as_flag<S: Serializer>(adjacent: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*adjacent))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

fn adjacent_from_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(serde::de::Error::custom(format!(
            "adjacency flag must be 0 or 1, got {other}"
        ))),
    }
}
