//! Place identifiers.

use serde::{Deserialize, Serialize};

/// Position of a place in the snapshot's place list.
///
/// Doubles as the row/column index into both matrices. Only meaningful for
/// the snapshot that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlaceId(pub usize);

impl PlaceId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for PlaceId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let id = PlaceId::from(4);
        assert_eq!(id.index(), 4);
        assert_eq!(id.to_string(), "4");
    }
}
