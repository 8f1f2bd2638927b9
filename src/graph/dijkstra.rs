// src/graph/dijkstra.rs
//! Dijkstra search with a per-call vertex exclusion set.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::store::{GraphStore, VertexId};

/// A shortest route: total edge weight plus the vertex sequence walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub cost: u32,
    pub path: Vec<VertexId>,
}

/// Heap entry. Ordered so the minimum distance pops first; equal distances
/// settle the lowest vertex id first, which makes tie-breaking deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    dist: u32,
    vertex: VertexId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest directed route from `start` to `end` that never touches a
/// vertex in `excluded`. Neither endpoint may be excluded.
///
/// Uses lazy deletion (stale heap entries for settled vertices are popped
/// and dropped) and predecessor pointers for the final path walk-back.
/// Returns `None` when `end` is unreachable under the exclusions; this is
/// the sentinel the frontier solver consumes, not an error.
#[must_use]
pub fn shortest_path(
    graph: &GraphStore,
    start: VertexId,
    end: VertexId,
    excluded: &[VertexId],
) -> Option<Route> {
    debug_assert!(!excluded.contains(&start) && !excluded.contains(&end));
    if start == end {
        return Some(Route { cost: 0, path: vec![start] });
    }

    let n = graph.arena_len();
    let mut dist = vec![u32::MAX; n];
    let mut prev: Vec<Option<VertexId>> = vec![None; n];
    let mut settled = vec![false; n];
    for &v in excluded {
        if v < n {
            settled[v] = true;
        }
    }

    dist[start] = 0;
    let mut heap = BinaryHeap::new();
    heap.push(State { dist: 0, vertex: start });

    while let Some(State { dist: d, vertex: u }) = heap.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;
        if u == end {
            return Some(Route { cost: d, path: walk_back(&prev, start, end) });
        }
        for &(v, weight) in graph.out_edges(u) {
            if settled[v] {
                continue;
            }
            let candidate = d + weight;
            if candidate < dist[v] {
                dist[v] = candidate;
                prev[v] = Some(u);
                heap.push(State { dist: candidate, vertex: v });
            }
        }
    }
    None
}

fn walk_back(prev: &[Option<VertexId>], start: VertexId, end: VertexId) -> Vec<VertexId> {
    let mut path = vec![end];
    let mut current = end;
    while current != start {
        match prev[current] {
            Some(p) => current = p,
            None => break,
        }
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> GraphStore {
        // 0 -> 1 -> 3 (cost 4) and 0 -> 2 -> 3 (cost 2)
        let mut g = GraphStore::new();
        g.insert_vertex(0, (0, 0));
        g.insert_vertex(1, (1, 1));
        g.insert_vertex(2, (1, -1));
        g.insert_vertex(3, (2, 0));
        g.insert_edge(0, 1, 3);
        g.insert_edge(0, 2, 1);
        g.insert_edge(1, 3, 1);
        g.insert_edge(2, 3, 1);
        g
    }

    #[test]
    fn picks_cheapest_route() {
        let route = shortest_path(&diamond(), 0, 3, &[]).expect("path exists");
        assert_eq!(route.cost, 2);
        assert_eq!(route.path, vec![0, 2, 3]);
    }

    #[test]
    fn exclusion_forces_detour() {
        let route = shortest_path(&diamond(), 0, 3, &[2]).expect("detour exists");
        assert_eq!(route.cost, 4);
        assert_eq!(route.path, vec![0, 1, 3]);
    }

    #[test]
    fn unreachable_is_none() {
        assert!(shortest_path(&diamond(), 0, 3, &[1, 2]).is_none());
        assert!(shortest_path(&diamond(), 3, 0, &[]).is_none());
    }

    #[test]
    fn start_equals_end() {
        let route = shortest_path(&diamond(), 2, 2, &[]).expect("trivial route");
        assert_eq!(route.cost, 0);
        assert_eq!(route.path, vec![2]);
    }

    #[test]
    fn excluding_off_route_vertex_changes_nothing() {
        let g = diamond();
        let base = shortest_path(&g, 0, 3, &[]).expect("path exists");
        assert!(!base.path.contains(&1));
        let narrowed = shortest_path(&g, 0, 3, &[1]).expect("still reachable");
        assert_eq!(base, narrowed);
    }
}
