// src/map.rs
//! The cave map: one generated graph, its exit, its entities and the
//! precomputed route frontier, behind the read-mostly query interface the
//! renderer, game loop and RL player consume.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities;
use crate::error::{MapError, Result};
use crate::frontier::{self, Frontier, Parameters, Profile};
use crate::generate;
use crate::graph::{Coord, Edge, GraphStore, VertexId};
use crate::persist;

pub const START: VertexId = 0;

/// A fully constructed, navigable cave map. Exclusively owned by its
/// creator; generation and loading replace the whole state, everything
/// else only reads.
#[derive(Debug, Clone)]
pub struct CaveMap {
    size: u32,
    graph: GraphStore,
    exit: VertexId,
    entities: Vec<(VertexId, u32)>,
    frontier: Frontier,
}

impl CaveMap {
    /// Generates a map of the given size (2..=5) from an entropy-seeded RNG.
    ///
    /// # Errors
    /// See [`generate::generate`].
    pub fn generate(size: u32) -> Result<Self> {
        Self::generate_with(size, &mut StdRng::from_entropy())
    }

    /// Generates a map reproducibly: the same size and seed always yield
    /// the same map.
    ///
    /// # Errors
    /// See [`generate::generate`].
    pub fn generate_seeded(size: u32, seed: u64) -> Result<Self> {
        Self::generate_with(size, &mut StdRng::seed_from_u64(seed))
    }

    /// Generation backbone: bounded retry construction, exit selection,
    /// entity placement, then exactly one frontier computation.
    pub fn generate_with<R: Rng>(size: u32, rng: &mut R) -> Result<Self> {
        let (graph, exit) = generate::generate(size, rng, generate::DEFAULT_MAX_ATTEMPTS)?;
        let placed = entities::place(&graph, exit, rng);
        Ok(Self::from_parts(size, graph, exit, placed))
    }

    /// Assembles a map from finalized parts and computes its frontier.
    /// `load` and the test suite build maps through this.
    #[must_use]
    pub fn from_parts(
        size: u32,
        graph: GraphStore,
        exit: VertexId,
        entities: Vec<(VertexId, u32)>,
    ) -> Self {
        let frontier = frontier::compute(&graph, START, exit, &entities);
        Self { size, graph, exit, entities, frontier }
    }

    // --- query interface -------------------------------------------------

    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub fn exit(&self) -> VertexId {
        self.exit
    }

    #[must_use]
    pub fn vertices(&self) -> Vec<(VertexId, Coord)> {
        self.graph.vertices()
    }

    #[must_use]
    pub fn edges(&self) -> Vec<Edge> {
        self.graph.edges()
    }

    /// Entities as (vertex id, power) pairs in placement order.
    #[must_use]
    pub fn entities(&self) -> &[(VertexId, u32)] {
        &self.entities
    }

    #[must_use]
    pub fn entity_power(&self, vertex: VertexId) -> Option<u32> {
        self.entities
            .iter()
            .find(|&&(id, _)| id == vertex)
            .map(|&(_, power)| power)
    }

    #[must_use]
    pub fn out_edges(&self, vertex: VertexId) -> &[(VertexId, u32)] {
        self.graph.out_edges(vertex)
    }

    #[must_use]
    pub fn neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        self.graph.neighbours(vertex)
    }

    #[must_use]
    pub fn is_adjacent(&self, from: VertexId, to: VertexId) -> bool {
        self.graph.is_adjacent(from, to)
    }

    #[must_use]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Compass direction of the edge between two adjacent vertices, as the
    /// sign of the coordinate delta. `None` when the edge does not exist.
    #[must_use]
    pub fn unit_direction(&self, from: VertexId, to: VertexId) -> Option<(i32, i32)> {
        if !self.graph.is_adjacent(from, to) {
            return None;
        }
        let (fx, fy) = self.graph.coord(from)?;
        let (tx, ty) = self.graph.coord(to)?;
        Some(((tx - fx).signum(), (ty - fy).signum()))
    }

    /// The frontier entry a named profile selects.
    ///
    /// # Errors
    /// [`MapError::UnknownProfile`] for an unrecognized name;
    /// [`MapError::EmptyFrontier`] when no itinerary is feasible at all.
    pub fn get_parameters(&self, profile: &str) -> Result<Parameters> {
        let profile: Profile = profile.parse()?;
        frontier::select(&self.frontier, profile)
    }

    /// Scores an explicit vertex sequence: total edge weight spent and
    /// total power of the entities encountered (each entity counts once,
    /// no matter how often its vertex recurs).
    ///
    /// # Errors
    /// [`MapError::NotAdjacent`] when consecutive vertices share no edge.
    pub fn get_stamina_life(&self, path: &[VertexId]) -> Result<(u32, u32)> {
        let mut cost = 0;
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            cost += self
                .graph
                .edge_weight(from, to)
                .ok_or(MapError::NotAdjacent { from, to })?;
        }
        let visited: HashSet<VertexId> = path.iter().copied().collect();
        let risk = self
            .entities
            .iter()
            .filter(|&&(id, _)| visited.contains(&id))
            .map(|&(_, power)| power)
            .sum();
        Ok((cost, risk))
    }

    // --- persistence -----------------------------------------------------

    /// Serializes the map in the persisted text layout.
    #[must_use]
    pub fn to_text(&self) -> String {
        persist::render(
            self.size,
            &self.graph.vertices(),
            &self.graph.edges(),
            self.exit,
            &self.entities,
        )
    }

    /// Rebuilds a map from persisted text and recomputes its frontier.
    ///
    /// # Errors
    /// [`MapError::Parse`] for a malformed file.
    pub fn from_text(text: &str) -> Result<Self> {
        let file = persist::parse(text)?;
        let mut graph = GraphStore::new();
        for (id, x, y) in file.vertices {
            if graph.contains(id) {
                return Err(parse_invalid(format!("duplicate vertex id {id}")));
            }
            if graph.find_vertex((x, y)).is_some() {
                return Err(parse_invalid(format!("duplicate coordinates ({x}, {y})")));
            }
            graph.insert_vertex(id, (x, y));
        }
        if graph.vertex_count() != graph.arena_len() {
            return Err(parse_invalid("vertex ids are not contiguous from 0".to_owned()));
        }
        for (from, to, weight) in file.edges {
            if !graph.contains(from) || !graph.contains(to) {
                return Err(parse_invalid(format!("edge {from} -> {to} references a missing vertex")));
            }
            graph.insert_edge(from, to, weight);
        }
        if !graph.contains(file.exit) {
            return Err(parse_invalid(format!("exit vertex {} does not exist", file.exit)));
        }
        for &(id, _) in &file.entities {
            if !graph.contains(id) {
                return Err(parse_invalid(format!("entity vertex {id} does not exist")));
            }
            if id == START || id == file.exit {
                return Err(parse_invalid(format!("entity vertex {id} is the start or exit")));
            }
        }
        Ok(Self::from_parts(file.size, graph, file.exit, file.entities))
    }

    /// Writes the map to a file.
    ///
    /// # Errors
    /// [`MapError::Io`] with the path on failure.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_text())
            .map_err(|source| MapError::Io { source, path: path.to_path_buf() })
    }

    /// Reads a map from a file, replacing nothing on failure: the previous
    /// map value stays untouched in the caller's hands.
    ///
    /// # Errors
    /// [`MapError::Io`] on read failure, [`MapError::Parse`] on bad content.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|source| MapError::Io { source, path: path.to_path_buf() })?;
        Self::from_text(&text)
    }
}

fn parse_invalid(reason: String) -> MapError {
    MapError::Parse { line: 0, reason }
}
