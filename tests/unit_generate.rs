// tests/unit_generate.rs
//! Properties every generated map must satisfy, across sizes and seeds.

use std::collections::HashSet;

use cavemap_core::generate::{max_vertices, min_vertices};
use cavemap_core::graph::traversal;
use cavemap_core::{CaveMap, MapError};

fn sample_maps() -> Vec<(u32, CaveMap)> {
    let mut maps = Vec::new();
    for size in 2..=3 {
        for seed in [1u64, 7, 42] {
            let map = CaveMap::generate_seeded(size, seed)
                .unwrap_or_else(|e| panic!("generation failed for size {size} seed {seed}: {e}"));
            maps.push((size, map));
        }
    }
    maps
}

#[test]
fn vertex_count_within_density_bounds() {
    for (size, map) in sample_maps() {
        let n = map.vertices().len();
        assert!(
            n >= min_vertices(size) && n <= max_vertices(size),
            "size {size}: vertex count {n} outside [{}, {}]",
            min_vertices(size),
            max_vertices(size)
        );
    }
}

#[test]
fn every_vertex_reaches_the_exit() {
    for (size, map) in sample_maps() {
        let exit = map.exit();
        for (v, _) in map.vertices() {
            // Re-check through the public query surface: walk out-edges.
            let mut explored = HashSet::from([v]);
            let mut stack = vec![v];
            let mut reached = v == exit;
            while let Some(u) = stack.pop() {
                for &(w, _) in map.out_edges(u) {
                    if w == exit {
                        reached = true;
                    }
                    if explored.insert(w) {
                        stack.push(w);
                    }
                }
            }
            assert!(reached, "size {size}: vertex {v} cannot reach exit {exit}");
        }
    }
}

#[test]
fn edge_weights_are_small_integers() {
    for (size, map) in sample_maps() {
        for edge in map.edges() {
            assert!(
                (1..=3).contains(&edge.weight),
                "size {size}: edge {edge:?} has weight outside 1..=3"
            );
        }
    }
}

#[test]
fn coordinates_are_injective_and_bounded() {
    for (size, map) in sample_maps() {
        let bound = size as i32;
        let mut seen = HashSet::new();
        for (v, coord) in map.vertices() {
            assert!(seen.insert(coord), "size {size}: duplicate coordinate {coord:?}");
            assert!(
                coord.0.abs() <= bound && coord.1.abs() <= bound,
                "size {size}: vertex {v} at {coord:?} outside the field"
            );
        }
    }
}

#[test]
fn ids_are_contiguous_from_zero() {
    for (_, map) in sample_maps() {
        let ids: Vec<_> = map.vertices().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, (0..ids.len()).collect::<Vec<_>>());
    }
}

#[test]
fn entities_avoid_start_and_exit() {
    for (size, map) in sample_maps() {
        let n = map.vertices().len();
        assert_eq!(map.entities().len(), n / 5 + 1, "size {size}: entity count");
        for &(id, power) in map.entities() {
            assert!(id != 0 && id != map.exit(), "size {size}: entity on start/exit");
            assert!((1..=3).contains(&power), "size {size}: power {power} out of range");
        }
    }
}

#[test]
fn exit_matches_bfs_rule() {
    for (_, map) in sample_maps() {
        // Rebuild the store through the query interface and re-run the rule.
        let mut g = cavemap_core::graph::GraphStore::new();
        for (id, coord) in map.vertices() {
            g.insert_vertex(id, coord);
        }
        for e in map.edges() {
            g.insert_edge(e.from, e.to, e.weight);
        }
        assert_eq!(traversal::select_exit(&g), map.exit());
    }
}

#[test]
fn same_seed_reproduces_the_map() {
    let a = CaveMap::generate_seeded(3, 99).expect("generation succeeds");
    let b = CaveMap::generate_seeded(3, 99).expect("generation succeeds");
    assert_eq!(a.to_text(), b.to_text(), "seeded generation must be reproducible");
}

#[test]
fn invalid_size_is_rejected() {
    assert!(matches!(CaveMap::generate_seeded(1, 0), Err(MapError::InvalidSize(1))));
    assert!(matches!(CaveMap::generate_seeded(6, 0), Err(MapError::InvalidSize(6))));
}
