//! Edge list and matrix export.
//!
//! `export_edges_json` dumps a store's edge table as the JSON envelope that
//! `JsonFileStore` reads back:
//!
//! ```text
//! EdgeStore → export_edges_json() → {"count": n, "data": [...]}
//!   → save as edges.json → JsonFileStore::new("edges.json")
//! ```
//!
//! `write_matrix_report` prints a loaded snapshot's matrices as plain-text
//! grids for eyeballing the data.

use std::io::Write;

use serde::Serialize;

use crate::graph::Snapshot;
use crate::model::EdgeRecord;
use crate::storage::EdgeStore;
use crate::Result;

#[derive(Serialize)]
struct Envelope<'a> {
    count: usize,
    data: &'a [EdgeRecord],
}

/// Export every record in `store` as a pretty-printed JSON envelope.
pub async fn export_edges_json<S: EdgeStore + ?Sized>(store: &S, writer: &mut dyn Write) -> Result<usize> {
    let records = store.fetch_edges().await?;
    write_edges_json(&records, writer)?;
    Ok(records.len())
}

/// Write `records` as a pretty-printed JSON envelope.
pub fn write_edges_json(records: &[EdgeRecord], writer: &mut dyn Write) -> Result<()> {
    let envelope = Envelope { count: records.len(), data: records };
    serde_json::to_writer_pretty(&mut *writer, &envelope)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the adjacency, distance and reachability matrices of `snapshot`.
pub fn write_matrix_report(snapshot: &Snapshot, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "# places: {}", snapshot.place_count())?;
    writeln!(writer, "# direct edges: {}", snapshot.edge_count())?;
    writeln!(writer, "# generation: {}", snapshot.generation())?;
    for (i, place) in snapshot.places().iter().enumerate() {
        writeln!(writer, "{i:>4}  {place}")?;
    }

    writeln!(writer)?;
    writeln!(writer, "## adjacency")?;
    write_grid(writer, snapshot.place_count(), |i, j| {
        flag(snapshot.adjacency().get(i, j).copied().unwrap_or(false))
    })?;

    writeln!(writer)?;
    writeln!(writer, "## distance (km)")?;
    write_grid(writer, snapshot.place_count(), |i, j| {
        let km = snapshot.distances().get(i, j).copied().unwrap_or(0.0);
        if km == 0.0 { "-".to_string() } else { format!("{km}") }
    })?;

    writeln!(writer)?;
    writeln!(writer, "## reachability")?;
    let closure = snapshot.closure();
    write_grid(writer, snapshot.place_count(), |i, j| {
        flag(closure.get(i, j).copied().unwrap_or(false))
    })?;
    Ok(())
}

fn flag(b: bool) -> String {
    if b { "1" } else { "0" }.to_string()
}

/// Square grid with place indices as headers; cells right-aligned to the
/// widest entry.
fn write_grid(writer: &mut dyn Write, n: usize, cell: impl Fn(usize, usize) -> String) -> Result<()> {
    let cells: Vec<Vec<String>> = (0..n).map(|i| (0..n).map(|j| cell(i, j)).collect()).collect();
    let width = cells
        .iter()
        .flatten()
        .map(String::len)
        .chain(std::iter::once(n.to_string().len()))
        .max()
        .unwrap_or(1);

    write!(writer, "{:>4} ", "")?;
    for j in 0..n {
        write!(writer, " {j:>width$}")?;
    }
    writeln!(writer)?;
    for (i, row) in cells.iter().enumerate() {
        write!(writer, "{i:>4} ")?;
        for c in row {
            write!(writer, " {c:>width$}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
