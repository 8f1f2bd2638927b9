// src/generate.rs
//! Randomized, constraint-checked construction of the cave graph.
//!
//! One attempt grows a graph outward from the start vertex on the fine
//! occupancy grid; the attempt is rejected wholesale if the result is too
//! sparse or not fully connected to the exit, and the caller retries from
//! scratch up to a bounded attempt count.

use rand::Rng;

use crate::error::{MapError, Result};
use crate::graph::{traversal, GraphStore, VertexId};
use crate::grid::Grid;

pub const MIN_SIZE: u32 = 2;
pub const MAX_SIZE: u32 = 5;

/// Bound on the retry-until-valid loop. A cap turns pathological
/// non-termination into an error instead of hanging the caller.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Bound on direction/step rejection sampling for one growth attempt. A
/// boxed-in vertex simply stops growing once the draws are spent.
const MAX_MOVE_DRAWS: u32 = 64;

const DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const MAX_STEP: i32 = 3;
const REVERSE_EDGE_PROBABILITY: f64 = 0.5;

/// Upper vertex bound for size parameter `b`: ⌊(2b+1)²/4⌋.
#[must_use]
pub fn max_vertices(size: u32) -> usize {
    let side = (2 * size + 1) as usize;
    side * side / 4
}

/// Minimum density for size parameter `b`: ⌊(2b+1)²/5⌋.
#[must_use]
pub fn min_vertices(size: u32) -> usize {
    let side = (2 * size + 1) as usize;
    side * side / 5
}

/// Why one generation attempt was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reject {
    TooSparse,
    Disconnected,
}

/// Builds a valid graph for the given size parameter, retrying rejected
/// attempts up to `max_attempts` times. Returns the store and the selected
/// exit vertex.
///
/// # Errors
/// [`MapError::InvalidSize`] for a size outside 2..=5, and
/// [`MapError::Generation`] once the attempt budget is spent.
pub fn generate<R: Rng>(
    size: u32,
    rng: &mut R,
    max_attempts: u32,
) -> Result<(GraphStore, VertexId)> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(MapError::InvalidSize(size));
    }
    for _ in 0..max_attempts {
        if let Ok(built) = attempt(size, rng) {
            return Ok(built);
        }
    }
    Err(MapError::Generation { attempts: max_attempts })
}

/// One all-or-nothing construction attempt from an empty store.
fn attempt<R: Rng>(size: u32, rng: &mut R) -> std::result::Result<(GraphStore, VertexId), Reject> {
    let bound = size as i32;
    let cap = max_vertices(size);
    let mut grid = Grid::new(bound);
    let mut graph = GraphStore::new();

    graph.insert_vertex(0, (0, 0));
    grid.mark_vertex((0, 0));

    // FIFO worklist of vertices still to expand; growth is BFS-shaped.
    let mut worklist: Vec<VertexId> = vec![0];
    let mut cursor = 0;
    while cursor < worklist.len() {
        let current = worklist[cursor];
        cursor += 1;
        let growth_attempts = rng.gen_range(1..=3);
        for _ in 0..growth_attempts {
            grow(&mut graph, &mut grid, &mut worklist, current, cap, rng);
        }
    }

    if graph.vertex_count() < min_vertices(size) {
        return Err(Reject::TooSparse);
    }
    let exit = traversal::select_exit(&graph);
    for (vertex, _) in graph.vertices() {
        if !traversal::reaches(&graph, vertex, exit) {
            return Err(Reject::Disconnected);
        }
    }
    Ok((graph, exit))
}

/// One growth attempt out of `current`: draw direction/step pairs until a
/// move passes every check, then commit it. Runs out of draws silently.
fn grow<R: Rng>(
    graph: &mut GraphStore,
    grid: &mut Grid,
    worklist: &mut Vec<VertexId>,
    current: VertexId,
    cap: usize,
    rng: &mut R,
) {
    let Some(from) = graph.coord(current) else {
        return;
    };
    for _ in 0..MAX_MOVE_DRAWS {
        let dir = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        let step = rng.gen_range(1..=MAX_STEP);
        let dest = (from.0 + dir.0 * step, from.1 + dir.1 * step);
        if !grid.in_bounds(dest) {
            continue;
        }
        let existing = graph.find_vertex(dest);
        if let Some(v) = existing {
            // Already linked back to us: nothing new to add.
            if graph.is_adjacent(v, current) {
                return;
            }
        } else if graph.vertex_count() == cap {
            // Full up; only moves ending on existing vertices remain legal.
            continue;
        }
        if !grid.segment_is_clear(from, dir, step) {
            continue;
        }
        commit(graph, worklist, current, existing, dest, step, rng);
        grid.mark_segment(from, dir, step);
        return;
    }
}

/// Installs the validated move: destination vertex (if new), the forward
/// edge, and with probability 0.5 the reverse edge when absent.
fn commit<R: Rng>(
    graph: &mut GraphStore,
    worklist: &mut Vec<VertexId>,
    current: VertexId,
    existing: Option<VertexId>,
    dest: (i32, i32),
    step: i32,
    rng: &mut R,
) {
    let weight = step as u32;
    let dest_id = match existing {
        Some(v) => {
            if !graph.is_adjacent(current, v) {
                graph.insert_edge(current, v, weight);
            }
            v
        }
        None => {
            let id = graph.next_id();
            graph.insert_vertex(id, dest);
            graph.insert_edge(current, id, weight);
            worklist.push(id);
            id
        }
    };
    if rng.gen::<f64>() <= REVERSE_EDGE_PROBABILITY && !graph.is_adjacent(dest_id, current) {
        graph.insert_edge(dest_id, current, weight);
    }
}
