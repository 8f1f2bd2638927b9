// src/frontier.rs
//! The risk→cost route frontier and the profile selector built on it.
//!
//! For every attainable cumulative risk value (sum of powers of a subset of
//! entities) the solver records the cheapest itinerary incurring exactly
//! that risk, with one witness path. Risk depends only on the *set* of
//! entities fought; cost and feasibility depend on the visiting *order*,
//! because every hop must route around the entities not yet fought.
//!
//! Naive enumeration is factorial in the entity count, so shortest-path
//! results are memoized per (source, target, exclusion-set) routing
//! equivalence class: any entity a solved route does not touch could have
//! been excluded without changing the answer, and every such superset key
//! is registered as an alias of the solved triple.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::error::MapError;
use crate::graph::{dijkstra, GraphStore, Route, VertexId};

pub type Risk = u32;

/// Bitmask over entity indices. Entity counts are bounded by ⌊n/5⌋ + 1,
/// far below 32.
type EntityMask = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub cost: u32,
    pub path: Vec<VertexId>,
}

/// Risk → cheapest (cost, witness path), ordered by risk.
pub type Frontier = BTreeMap<Risk, FrontierEntry>;

/// One selected frontier entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub risk: Risk,
    pub cost: u32,
    pub path: Vec<VertexId>,
}

/// Named strategy selecting one frontier entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Balanced,
    Survivor,
    Explorer,
}

impl FromStr for Profile {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(Self::Balanced),
            "survivor" => Ok(Self::Survivor),
            "explorer" => Ok(Self::Explorer),
            other => Err(MapError::UnknownProfile(other.to_owned())),
        }
    }
}

/// Difficulty scaling applied to a selected (risk, cost) pair before it is
/// handed to the player: generous on easy, tight on hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl FromStr for Difficulty {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "hard" => Ok(Self::Hard),
            other => Err(MapError::UnknownDifficulty(other.to_owned())),
        }
    }
}

impl Difficulty {
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Self::Easy => 3.0,
            Self::Hard => 1.5,
        }
    }
}

impl Parameters {
    /// The (risk, cost) budget granted for this difficulty, rounded.
    #[must_use]
    pub fn budget(&self, difficulty: Difficulty) -> (u32, u32) {
        let f = difficulty.factor();
        (
            (f64::from(self.risk) * f).round() as u32,
            (f64::from(self.cost) * f).round() as u32,
        )
    }
}

/// Computes the full frontier for a finalized graph.
///
/// Enumeration order is fixed so ties are deterministic: subset sizes
/// ascending, subsets lexicographic over ascending entity ids,
/// permutations lexicographic. A risk entry is overwritten only by a
/// strictly lower cost, so ties keep the first arrangement enumerated.
#[must_use]
pub fn compute(
    graph: &GraphStore,
    start: VertexId,
    exit: VertexId,
    entities: &[(VertexId, u32)],
) -> Frontier {
    let mut sorted: Vec<(VertexId, u32)> = entities.to_vec();
    sorted.sort_unstable_by_key(|&(id, _)| id);

    let mut solver = Solver::new(graph, &sorted);
    let mut frontier = Frontier::new();
    let count = sorted.len();
    for k in 0..=count {
        for subset in k_subsets(count, k) {
            for arrangement in permutations(&subset) {
                try_arrangement(&mut solver, &mut frontier, start, exit, &arrangement);
            }
        }
    }
    frontier
}

/// Selects the frontier entry for a profile: survivor takes the minimum
/// risk key, explorer the maximum, balanced the key at sorted index
/// ⌊count/2⌋ (lower middle for even counts).
pub fn select(frontier: &Frontier, profile: Profile) -> crate::error::Result<Parameters> {
    let keys: Vec<Risk> = frontier.keys().copied().collect();
    let index = match profile {
        Profile::Survivor => 0,
        Profile::Explorer => keys.len().saturating_sub(1),
        Profile::Balanced => keys.len() / 2,
    };
    let risk = *keys.get(index).ok_or(MapError::EmptyFrontier)?;
    let entry = &frontier[&risk];
    Ok(Parameters { risk, cost: entry.cost, path: entry.path.clone() })
}

/// Walks one ordered arrangement of entity indices and records its total
/// (risk, cost) into the frontier if every hop is feasible.
fn try_arrangement(
    solver: &mut Solver<'_>,
    frontier: &mut Frontier,
    start: VertexId,
    exit: VertexId,
    arrangement: &[usize],
) {
    let all: EntityMask = mask_of_all(solver.entities.len());
    let mut fought: EntityMask = 0;
    let mut cost = 0;
    let mut risk = 0;
    let mut path: Vec<VertexId> = Vec::new();

    let mut from = start;
    for hop in 0..=arrangement.len() {
        let (to, to_bit) = match arrangement.get(hop) {
            Some(&index) => (solver.entities[index].0, 1 << index),
            None => (exit, 0),
        };
        // Every entity not yet fought is off limits for this hop, except
        // the hop's own destination (reaching it means fighting it).
        let excluded = all & !fought & !to_bit;
        let Some(route) = solver.route(from, to, excluded) else {
            return;
        };
        cost += route.cost;
        let skip = usize::from(!path.is_empty());
        path.extend(route.path.iter().skip(skip));
        if let Some(&index) = arrangement.get(hop) {
            fought |= to_bit;
            risk += solver.entities[index].1;
        }
        from = to;
    }

    match frontier.get(&risk) {
        Some(entry) if entry.cost <= cost => {}
        _ => {
            frontier.insert(risk, FrontierEntry { cost, path });
        }
    }
}

fn mask_of_all(count: usize) -> EntityMask {
    (1u32 << count) - 1
}

/// Memoizing shortest-path oracle over (source, target, exclusion mask)
/// routing equivalence classes.
struct Solver<'a> {
    graph: &'a GraphStore,
    entities: &'a [(VertexId, u32)],
    memo: HashMap<(VertexId, VertexId, EntityMask), Option<Route>>,
}

impl<'a> Solver<'a> {
    fn new(graph: &'a GraphStore, entities: &'a [(VertexId, u32)]) -> Self {
        Self { graph, entities, memo: HashMap::new() }
    }

    /// Shortest route from `from` to `to` avoiding the entities in
    /// `excluded`. Consults the alias table before running Dijkstra.
    fn route(&mut self, from: VertexId, to: VertexId, excluded: EntityMask) -> Option<Route> {
        if let Some(cached) = self.memo.get(&(from, to, excluded)) {
            return cached.clone();
        }
        let blocked: Vec<VertexId> = self
            .entity_indices(excluded)
            .map(|index| self.entities[index].0)
            .collect();
        let route = dijkstra::shortest_path(self.graph, from, to, &blocked);

        // Any entity the route does not touch could have been excluded
        // without changing the answer (and an unreachable target stays
        // unreachable under more exclusions), so every superset of the
        // exclusion mask over those entities resolves to this result.
        let mut free: EntityMask = 0;
        for index in self.entity_indices(!excluded) {
            let vertex = self.entities[index].0;
            if vertex == from || vertex == to {
                continue;
            }
            let on_path = route.as_ref().is_some_and(|r| r.path.contains(&vertex));
            if !on_path {
                free |= 1 << index;
            }
        }
        let mut subset = free;
        loop {
            self.memo.insert((from, to, excluded | subset), route.clone());
            if subset == 0 {
                break;
            }
            subset = (subset - 1) & free;
        }
        route
    }

    /// Indices of entities whose bit is set in `mask`.
    fn entity_indices(&self, mask: EntityMask) -> impl Iterator<Item = usize> + '_ {
        (0..self.entities.len()).filter(move |index| mask & (1 << index) != 0)
    }
}

/// All k-element subsets of `0..n` in lexicographic order.
fn k_subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    extend_subsets(n, k, 0, &mut current, &mut result);
    result
}

fn extend_subsets(
    n: usize,
    k: usize,
    next: usize,
    current: &mut Vec<usize>,
    result: &mut Vec<Vec<usize>>,
) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }
    for candidate in next..n {
        current.push(candidate);
        extend_subsets(n, k, candidate + 1, current, result);
        current.pop();
    }
}

/// All orderings of `items` in lexicographic order.
fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    for (position, &head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(position);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            result.push(tail);
        }
    }
    result
}
