//! Edge store loader: edge records in, snapshot out.
//!
//! 1. the distinct origin names, sorted, fix the place list and dimension N;
//! 2. both N x N matrices start empty (false / 0.0);
//! 3. each record writes its adjacency flag and distance into cell
//!    (origin, destination), later records for the same pair winning.
//!
//! Every record is validated before any matrix is allocated, so a bad edge
//! list fails the whole load and nothing half-built escapes.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::graph::Snapshot;
use crate::model::{EdgeRecord, Matrix};
use crate::storage::EdgeStore;
use crate::{Error, Result};

/// Build a snapshot from an unordered collection of edge records.
pub fn build_snapshot<I>(records: I, generation: u64) -> Result<Snapshot>
where
    I: IntoIterator<Item = EdgeRecord>,
{
    let records: Vec<EdgeRecord> = records.into_iter().collect();

    let places: Vec<String> = records
        .iter()
        .map(|r| r.origin.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    // scoped: `position` borrows `places`, which moves into the snapshot below
    let cells = {
        let position: HashMap<&str, usize> = places
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut cells = Vec::with_capacity(records.len());
        for rec in &records {
            validate_distance(rec)?;
            let i = position[rec.origin.as_str()];
            let j = *position.get(rec.destination.as_str()).ok_or_else(|| Error::UnknownPlace {
                origin: rec.origin.clone(),
                destination: rec.destination.clone(),
                place: rec.destination.clone(),
            })?;
            cells.push((i, j, rec.adjacent, rec.distance_km));
        }
        cells
    };

    let n = places.len();
    let mut adjacency = Matrix::new(n, false);
    let mut distance = Matrix::new(n, 0.0);
    for (i, j, adjacent, km) in cells {
        adjacency.set(i, j, adjacent);
        distance.set(i, j, km);
    }

    debug!(places = n, records = records.len(), generation, "built place graph snapshot");
    Ok(Snapshot::from_parts(places, adjacency, distance, generation))
}

/// Fetch every record from `store` and build a snapshot from them.
pub async fn load_snapshot<S: EdgeStore + ?Sized>(store: &S, generation: u64) -> Result<Snapshot> {
    let records = store.fetch_edges().await?;
    let count = records.len();
    let snapshot = build_snapshot(records, generation)?;
    info!(
        store = %store.describe(),
        places = snapshot.place_count(),
        edges = snapshot.edge_count(),
        records = count,
        generation,
        "loaded place graph"
    );
    Ok(snapshot)
}

fn validate_distance(rec: &EdgeRecord) -> Result<()> {
    if rec.distance_km.is_finite() && rec.distance_km >= 0.0 {
        return Ok(());
    }
    Err(Error::InvalidRecord {
        origin: rec.origin.clone(),
        destination: rec.destination.clone(),
        reason: format!("distance must be a non-negative number of km, got {}", rec.distance_km),
    })
}
