//! Property tests over random small place graphs.
//!
//! Distances are whole kilometres so totals compare exactly against a
//! Floyd-Warshall reference.

use city_graph::graph::build_snapshot;
use city_graph::{EdgeRecord, PlaceId, Snapshot};
use proptest::prelude::*;

/// Up to six places; each ordered pair gets an adjacency flag and a
/// distance in 0..=20 km.
fn arb_table() -> impl Strategy<Value = (usize, Vec<(bool, u8)>)> {
    (1usize..=6).prop_flat_map(|n| (Just(n), prop::collection::vec((any::<bool>(), 0u8..=20), n * n)))
}

fn name(i: usize) -> String {
    format!("P{i:02}")
}

fn records(n: usize, cells: &[(bool, u8)]) -> Vec<EdgeRecord> {
    let mut out = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let (adjacent, km) = cells[i * n + j];
            out.push(EdgeRecord::new(name(i), name(j), f64::from(km), adjacent));
        }
    }
    out
}

/// All-pairs shortest distances over usable edges (adjacent and > 0 km).
fn floyd_reference(snap: &Snapshot) -> Vec<Vec<Option<f64>>> {
    let n = snap.place_count();
    let mut best = vec![vec![None; n]; n];
    for i in 0..n {
        best[i][i] = Some(0.0);
        for j in 0..n {
            let (a, b) = (PlaceId(i), PlaceId(j));
            let km = snap.distance_of(a, b);
            if i != j && snap.is_adjacent(a, b) && km > 0.0 {
                best[i][j] = Some(km);
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(ik), Some(kj)) = (best[i][k], best[k][j]) {
                    if best[i][j].is_none_or(|cur| ik + kj < cur) {
                        best[i][j] = Some(ik + kj);
                    }
                }
            }
        }
    }
    best
}

proptest! {
    #[test]
    fn prop_direct_edge_implies_reachable((n, cells) in arb_table()) {
        let snap = build_snapshot(records(n, &cells), 1).unwrap();
        for i in 0..n {
            for j in 0..n {
                if snap.is_adjacent(PlaceId(i), PlaceId(j)) {
                    prop_assert!(snap.is_reachable(PlaceId(i), PlaceId(j)));
                }
            }
        }
    }

    #[test]
    fn prop_closure_is_transitive((n, cells) in arb_table()) {
        let snap = build_snapshot(records(n, &cells), 1).unwrap();
        let reach = |a: usize, b: usize| snap.is_reachable(PlaceId(a), PlaceId(b));
        for i in 0..n {
            prop_assert!(reach(i, i));
            for j in 0..n {
                for k in 0..n {
                    if reach(i, j) && reach(j, k) {
                        prop_assert!(reach(i, k), "{i}->{j}->{k}");
                    }
                }
            }
        }
    }

    #[test]
    fn prop_route_sums_to_reported_total((n, cells) in arb_table()) {
        let snap = build_snapshot(records(n, &cells), 1).unwrap();
        for i in 0..n {
            for j in 0..n {
                let Some((total, path)) = snap.shortest_path(PlaceId(i), PlaceId(j)) else {
                    continue;
                };
                prop_assert_eq!(path.first().copied(), Some(PlaceId(i)));
                prop_assert_eq!(path.last().copied(), Some(PlaceId(j)));

                let mut sum = 0.0;
                for hop in path.windows(2) {
                    prop_assert!(snap.is_adjacent(hop[0], hop[1]));
                    let km = snap.distance_of(hop[0], hop[1]);
                    prop_assert!(km > 0.0);
                    sum += km;
                }
                prop_assert!((sum - total).abs() < 1e-9);
                prop_assert!(snap.is_reachable(PlaceId(i), PlaceId(j)));
            }
        }
    }

    #[test]
    fn prop_route_is_minimal((n, cells) in arb_table()) {
        let snap = build_snapshot(records(n, &cells), 1).unwrap();
        let reference = floyd_reference(&snap);
        for i in 0..n {
            for j in 0..n {
                let found = snap.shortest_path(PlaceId(i), PlaceId(j)).map(|(km, _)| km);
                prop_assert_eq!(found, reference[i][j], "{} -> {}", i, j);
            }
        }
    }

    #[test]
    fn prop_load_ignores_record_order((n, cells) in arb_table()) {
        let forward = build_snapshot(records(n, &cells), 1).unwrap();
        let mut reversed = records(n, &cells);
        reversed.reverse();
        let backward = build_snapshot(reversed, 1).unwrap();

        prop_assert_eq!(forward.places(), backward.places());
        prop_assert_eq!(forward.adjacency(), backward.adjacency());
        prop_assert_eq!(forward.distances(), backward.distances());
        prop_assert_eq!(forward.closure(), backward.closure());
    }
}

#[test]
fn test_single_edge_stays_one_way() {
    let snap = build_snapshot(
        vec![
            EdgeRecord::direct("A", "B", 1.0),
            EdgeRecord::new("B", "B", 0.0, false),
        ],
        1,
    )
    .unwrap();
    let (a, b) = (PlaceId(0), PlaceId(1));
    assert!(snap.is_reachable(a, b));
    assert!(!snap.is_reachable(b, a));
    assert_eq!(snap.shortest_path(b, a), None);
}
