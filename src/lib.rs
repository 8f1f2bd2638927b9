// src/lib.rs
//! Random grid-embedded cave map generation with a precomputed risk/cost
//! route frontier.
//!
//! A [`CaveMap`] is built in one shot: randomized constraint-checked graph
//! construction, exit selection, entity placement, then a single frontier
//! computation mapping every attainable risk to the cheapest route earning
//! exactly that risk. Everything downstream (rendering, game loop, RL
//! players) only reads through the query interface.

pub mod entities;
pub mod error;
pub mod frontier;
pub mod generate;
pub mod graph;
pub mod grid;
pub mod map;
pub mod persist;

pub use error::{MapError, Result};
pub use frontier::{Difficulty, Frontier, FrontierEntry, Parameters, Profile};
pub use map::CaveMap;
