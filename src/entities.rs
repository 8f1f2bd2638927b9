// src/entities.rs
//! Entity placement: scored obstacles scattered over a generated graph.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::{GraphStore, VertexId};

pub const MAX_POWER: u32 = 3;

/// Picks `⌊n/5⌋ + 1` entity vertices and assigns each a power in 1..=3.
///
/// Selection prefers a "spaced" pool from which every pick evicts itself
/// and its graph neighbours, falling back to the remaining unspaced
/// candidates once that pool runs dry. This spaces entities out
/// heuristically without guaranteeing an independent set. The start and
/// exit vertices are never candidates.
#[must_use]
pub fn place<R: Rng>(
    graph: &GraphStore,
    exit: VertexId,
    rng: &mut R,
) -> Vec<(VertexId, u32)> {
    let count = graph.vertex_count() / 5 + 1;
    let mut full: Vec<VertexId> = graph
        .vertices()
        .into_iter()
        .map(|(id, _)| id)
        .filter(|&id| id != 0 && id != exit)
        .collect();
    let mut spaced = full.clone();

    let mut placed = Vec::with_capacity(count);
    for _ in 0..count {
        let pick = if let Some(&pick) = spaced.choose(rng) {
            let neighbours = graph.neighbours(pick);
            spaced.retain(|&v| v != pick && !neighbours.contains(&v));
            pick
        } else if let Some(&pick) = full.choose(rng) {
            pick
        } else {
            break;
        };
        full.retain(|&v| v != pick);
        placed.push((pick, rng.gen_range(1..=MAX_POWER)));
    }
    placed
}
