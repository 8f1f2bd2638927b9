// src/graph/store.rs
//! Vertex/edge/coordinate storage and basic graph queries.
//!
//! Vertices live in an arena indexed by contiguous integer ids (0 is always
//! the start vertex, ids follow creation order). Slots are optional so that
//! `remove_vertex` keeps the remaining ids stable; a freshly generated map
//! never has gaps. Out-edges are kept per vertex in insertion order, which
//! fixes the iteration order every traversal in this crate relies on.

use std::collections::HashMap;

pub type VertexId = usize;

/// Integer grid coordinate pair. Unique per vertex.
pub type Coord = (i32, i32);

/// A directed weighted edge listed as a (source, destination, weight) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    slots: Vec<Option<Coord>>,
    coord_index: HashMap<Coord, VertexId>,
    out: Vec<Vec<(VertexId, u32)>>,
}

impl GraphStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex with the given id and coordinates.
    ///
    /// Idempotent on an existing id: the stored coordinates are kept and the
    /// call is a no-op.
    pub fn insert_vertex(&mut self, id: VertexId, coord: Coord) {
        if id >= self.slots.len() {
            self.slots.resize(id + 1, None);
            self.out.resize(id + 1, Vec::new());
        }
        if self.slots[id].is_none() {
            self.slots[id] = Some(coord);
            self.coord_index.insert(coord, id);
        }
    }

    /// Removes a vertex and every edge referencing it.
    pub fn remove_vertex(&mut self, id: VertexId) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        if let Some(coord) = slot.take() {
            self.coord_index.remove(&coord);
            self.out[id].clear();
            for list in &mut self.out {
                list.retain(|&(to, _)| to != id);
            }
        }
    }

    /// Inserts a directed edge, overwriting the weight if it already exists.
    pub fn insert_edge(&mut self, from: VertexId, to: VertexId, weight: u32) {
        debug_assert!(self.contains(from) && self.contains(to));
        let list = &mut self.out[from];
        match list.iter_mut().find(|(dest, _)| *dest == to) {
            Some(entry) => entry.1 = weight,
            None => list.push((to, weight)),
        }
    }

    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) {
        if let Some(list) = self.out.get_mut(from) {
            list.retain(|&(dest, _)| dest != to);
        }
    }

    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.slots.get(id).is_some_and(Option::is_some)
    }

    #[must_use]
    pub fn coord(&self, id: VertexId) -> Option<Coord> {
        self.slots.get(id).copied().flatten()
    }

    /// Number of live vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Extent of the id space, i.e. one past the highest id ever inserted.
    /// Traversals size their explored arrays with this.
    #[must_use]
    pub fn arena_len(&self) -> usize {
        self.slots.len()
    }

    /// The id the next created vertex receives.
    #[must_use]
    pub fn next_id(&self) -> VertexId {
        self.slots.len()
    }

    /// Live vertices as (id, coordinates) pairs in ascending id order.
    #[must_use]
    pub fn vertices(&self) -> Vec<(VertexId, Coord)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.map(|coord| (id, coord)))
            .collect()
    }

    /// All edges as (source, destination, weight) triples, grouped by source
    /// id with each group in insertion order.
    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (from, list) in self.out.iter().enumerate() {
            for &(to, weight) in list {
                edges.push(Edge { from, to, weight });
            }
        }
        edges
    }

    /// Out-edges of a vertex in insertion order.
    #[must_use]
    pub fn out_edges(&self, id: VertexId) -> &[(VertexId, u32)] {
        self.out.get(id).map_or(&[], Vec::as_slice)
    }

    /// Union of out-neighbours and in-neighbours, ascending and deduplicated.
    #[must_use]
    pub fn neighbours(&self, id: VertexId) -> Vec<VertexId> {
        let mut result: Vec<VertexId> =
            self.out_edges(id).iter().map(|&(to, _)| to).collect();
        for (from, list) in self.out.iter().enumerate() {
            if list.iter().any(|&(to, _)| to == id) {
                result.push(from);
            }
        }
        result.sort_unstable();
        result.dedup();
        result
    }

    /// True if a directed edge from `from` to `to` exists.
    #[must_use]
    pub fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool {
        self.out_edges(from).iter().any(|&(dest, _)| dest == to)
    }

    #[must_use]
    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> Option<u32> {
        self.out_edges(from)
            .iter()
            .find(|&&(dest, _)| dest == to)
            .map(|&(_, weight)| weight)
    }

    /// Looks a vertex up by its coordinates. `None` when nothing is there.
    #[must_use]
    pub fn find_vertex(&self, coord: Coord) -> Option<VertexId> {
        self.coord_index.get(&coord).copied()
    }
}
