// src/graph/traversal.rs
//! Reachability checking and exit selection.

use std::collections::VecDeque;

use super::store::{GraphStore, VertexId};

/// Returns true if a directed path from `start` to `target` exists.
///
/// Iterative DFS over out-edges with an explicit stack and an explored
/// array sized to the vertex arena.
#[must_use]
pub fn reaches(graph: &GraphStore, start: VertexId, target: VertexId) -> bool {
    if start == target {
        return true;
    }
    let mut explored = vec![false; graph.arena_len()];
    explored[start] = true;
    let mut stack = vec![start];
    while let Some(u) = stack.pop() {
        for &(v, _) in graph.out_edges(u) {
            if !explored[v] {
                if v == target {
                    return true;
                }
                explored[v] = true;
                stack.push(v);
            }
        }
    }
    false
}

/// Chooses the exit vertex: the last vertex dequeued by a BFS from the
/// start, with out-edges explored in insertion order. This is deliberately
/// the traversal-order rule, not a farthest-vertex rule.
#[must_use]
pub fn select_exit(graph: &GraphStore) -> VertexId {
    let start: VertexId = 0;
    let mut explored = vec![false; graph.arena_len()];
    explored[start] = true;
    let mut queue = VecDeque::from([start]);
    let mut last = start;
    while let Some(u) = queue.pop_front() {
        last = u;
        for &(v, _) in graph.out_edges(u) {
            if !explored[v] {
                explored[v] = true;
                queue.push_back(v);
            }
        }
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(weights: &[u32]) -> GraphStore {
        let mut g = GraphStore::new();
        g.insert_vertex(0, (0, 0));
        for (i, &w) in weights.iter().enumerate() {
            g.insert_vertex(i + 1, (i as i32 + 1, 0));
            g.insert_edge(i, i + 1, w);
        }
        g
    }

    #[test]
    fn reaches_follows_edge_direction() {
        let g = chain(&[1, 1, 1]);
        assert!(reaches(&g, 0, 3));
        assert!(!reaches(&g, 3, 0), "edges are directed");
    }

    #[test]
    fn reaches_is_reflexive() {
        let g = chain(&[1]);
        assert!(reaches(&g, 1, 1));
    }

    #[test]
    fn exit_is_last_dequeued() {
        // 0 -> 1 and 0 -> 2 inserted in that order, so BFS dequeues
        // 0, 1, 2 and the exit is 2 regardless of distance.
        let mut g = GraphStore::new();
        g.insert_vertex(0, (0, 0));
        g.insert_vertex(1, (1, 0));
        g.insert_vertex(2, (0, 1));
        g.insert_edge(0, 1, 1);
        g.insert_edge(0, 2, 1);
        assert_eq!(select_exit(&g), 2);
    }

    #[test]
    fn exit_on_isolated_start_is_start() {
        let mut g = GraphStore::new();
        g.insert_vertex(0, (0, 0));
        assert_eq!(select_exit(&g), 0);
    }
}
