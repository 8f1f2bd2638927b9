// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("could not construct a valid map after {attempts} attempts")]
    Generation { attempts: u32 },

    #[error("map size must be between 2 and 5 (got {0})")]
    InvalidSize(u32),

    #[error("unknown profile {0:?} (expected balanced, survivor or explorer)")]
    UnknownProfile(String),

    #[error("unknown difficulty {0:?} (expected easy or hard)")]
    UnknownDifficulty(String),

    #[error("malformed map file at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("map has an empty route frontier")]
    EmptyFrontier,

    #[error("vertices {from} and {to} are not adjacent")]
    NotAdjacent { from: usize, to: usize },

    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
