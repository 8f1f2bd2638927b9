// src/graph/mod.rs
//! Directed weighted graph storage and the search routines built on it.

pub mod dijkstra;
pub mod store;
pub mod traversal;

pub use dijkstra::{shortest_path, Route};
pub use store::{Coord, Edge, GraphStore, VertexId};
