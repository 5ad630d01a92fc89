//! End-to-end tests for snapshot publication and reload.
//!
//! The store is edited through a cloned `MemoryStore` handle, then the graph
//! is reloaded; queries must see either the old snapshot or the new one.

use std::sync::Arc;

use city_graph::{EdgeRecord, Error, MemoryStore, RouteGraph};
use pretty_assertions::assert_eq;

fn two_way(a: &str, b: &str, km: f64) -> Vec<EdgeRecord> {
    vec![EdgeRecord::direct(a, b, km), EdgeRecord::direct(b, a, km)]
}

// ============================================================================
// 1. Reload picks up store changes and bumps the generation
// ============================================================================

#[tokio::test]
async fn test_reload_publishes_new_snapshot() {
    let store = MemoryStore::with_records(two_way("A", "B", 1.0));
    let graph = RouteGraph::open(store.clone()).await.unwrap();
    let first = graph.snapshot();
    assert_eq!(first.generation(), 1);
    assert_eq!(graph.places(), vec!["A", "B"]);

    store.extend(two_way("B", "C", 2.0));
    let second = graph.reload().await.unwrap();

    assert_eq!(second.generation(), 2);
    assert_eq!(graph.snapshot().generation(), 2);
    assert_eq!(graph.places(), vec!["A", "B", "C"]);
    assert_eq!(graph.shortest_route("A", "C").unwrap().unwrap().distance_km, 3.0);

    // a snapshot taken before the reload is untouched
    assert_eq!(first.place_count(), 2);
    assert_eq!(first.index_of("C"), None);
}

// ============================================================================
// 2. A failed reload keeps the previous snapshot published
// ============================================================================

#[tokio::test]
async fn test_failed_reload_keeps_previous_snapshot() {
    let store = MemoryStore::with_records(two_way("A", "B", 1.0));
    let graph = RouteGraph::open(store.clone()).await.unwrap();

    store.insert(EdgeRecord::direct("A", "Ghost", 1.0));
    let err = graph.reload().await.unwrap_err();
    assert!(matches!(err, Error::UnknownPlace { .. }));
    assert!(err.is_load_failure());
    assert!(graph.reload().await.is_err());

    assert_eq!(graph.snapshot().generation(), 1);
    assert_eq!(graph.places(), vec!["A", "B"]);
    assert!(graph.connectivity("A", "B").unwrap().connected);

    // failed reloads leave no gap in the generation sequence
    store.replace_all(two_way("A", "B", 1.0));
    assert_eq!(graph.reload().await.unwrap().generation(), 2);
}

// ============================================================================
// 3. Unloaded graph answers NotFound until the first reload
// ============================================================================

#[tokio::test]
async fn test_unloaded_graph_is_empty() {
    let graph = RouteGraph::unloaded(MemoryStore::with_records(two_way("A", "B", 1.0)));
    assert!(graph.places().is_empty());
    assert_eq!(graph.snapshot().generation(), 0);
    assert!(matches!(graph.connectivity("A", "B"), Err(Error::NotFound(_))));

    graph.reload().await.unwrap();
    assert!(graph.connectivity("A", "B").unwrap().direct_edge);
}

// ============================================================================
// 4. Concurrent readers never observe a half-built graph
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_queries_during_reloads() {
    let small = two_way("A", "B", 1.0);
    let mut large = two_way("A", "B", 1.0);
    large.extend(two_way("B", "C", 1.0));
    large.extend(two_way("C", "D", 1.0));

    let store = MemoryStore::with_records(small.clone());
    let graph = Arc::new(RouteGraph::open(store.clone()).await.unwrap());

    let mut readers = Vec::new();
    for _ in 0..4 {
        let graph = Arc::clone(&graph);
        readers.push(tokio::spawn(async move {
            for _ in 0..200 {
                let snap = graph.snapshot();
                // every published snapshot is internally consistent
                assert_eq!(snap.adjacency().dim(), snap.place_count());
                assert_eq!(snap.distances().dim(), snap.place_count());
                assert!(snap.place_count() == 2 || snap.place_count() == 4);
                assert!(graph.connectivity("A", "B").unwrap().connected);
                tokio::task::yield_now().await;
            }
        }));
    }

    for round in 0..20 {
        store.replace_all(if round % 2 == 0 { large.clone() } else { small.clone() });
        graph.reload().await.unwrap();
    }

    for reader in readers {
        reader.await.unwrap();
    }
    assert_eq!(graph.snapshot().generation(), 21);
}
