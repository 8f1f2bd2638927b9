// src/persist.rs
//! The persisted text format: five sections separated by single blank
//! lines, in order size / vertices / edges / exit / entities.
//!
//! ```text
//! 2
//!
//! 0 0 0
//! 1 1 1
//!
//! 0 1 1
//!
//! 1
//!
//! ...entity lines, `<vertex_id> <power>` each
//! ```
//!
//! Parsing is strict: a wrong section count or a non-integer field is a
//! parse error, never coerced or guessed.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::{MapError, Result};
use crate::graph::{Edge, VertexId};

const SECTIONS: usize = 5;

/// The raw contents of a parsed map file, before graph reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    pub size: u32,
    pub vertices: Vec<(VertexId, i32, i32)>,
    pub edges: Vec<(VertexId, VertexId, u32)>,
    pub exit: VertexId,
    pub entities: Vec<(VertexId, u32)>,
}

/// Renders the map state in the persisted layout. Line order within the
/// vertex, edge and entity sections is insertion order.
#[must_use]
pub fn render(
    size: u32,
    vertices: &[(VertexId, (i32, i32))],
    edges: &[Edge],
    exit: VertexId,
    entities: &[(VertexId, u32)],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{size}");
    let _ = writeln!(out);
    for &(id, (x, y)) in vertices {
        let _ = writeln!(out, "{id} {x} {y}");
    }
    let _ = writeln!(out);
    for edge in edges {
        let _ = writeln!(out, "{} {} {}", edge.from, edge.to, edge.weight);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{exit}");
    let _ = writeln!(out);
    for &(id, power) in entities {
        let _ = writeln!(out, "{id} {power}");
    }
    out
}

/// Parses the persisted layout, counting blank-line-delimited sections.
///
/// # Errors
/// [`MapError::Parse`] with the offending line number for a wrong section
/// count, a malformed line, or a non-integer field.
pub fn parse(text: &str) -> Result<MapFile> {
    let sections = split_sections(text)?;

    let size = single_field(&sections[0])?;
    let mut vertices = Vec::new();
    for &(line_no, line) in &sections[1] {
        let [id, x, y] = fields::<3>(line, line_no)?;
        vertices.push((field(id, line_no)?, field(x, line_no)?, field(y, line_no)?));
    }
    let mut edges = Vec::new();
    for &(line_no, line) in &sections[2] {
        let [from, to, weight] = fields::<3>(line, line_no)?;
        edges.push((field(from, line_no)?, field(to, line_no)?, field(weight, line_no)?));
    }
    let exit = single_field(&sections[3])?;
    let mut entities = Vec::new();
    for &(line_no, line) in &sections[4] {
        let [id, power] = fields::<2>(line, line_no)?;
        entities.push((field(id, line_no)?, field(power, line_no)?));
    }

    Ok(MapFile { size, vertices, edges, exit, entities })
}

/// Splits into exactly [`SECTIONS`] non-empty runs of (line number, line).
fn split_sections(text: &str) -> Result<Vec<Vec<(usize, &str)>>> {
    let mut sections: Vec<Vec<(usize, &str)>> = vec![Vec::new()];
    let mut last_line = 0;
    for (index, line) in text.trim_end().lines().enumerate() {
        last_line = index + 1;
        if line.trim().is_empty() {
            sections.push(Vec::new());
        } else if let Some(current) = sections.last_mut() {
            current.push((index + 1, line));
        }
    }
    if sections.len() != SECTIONS {
        return Err(MapError::Parse {
            line: last_line,
            reason: format!("expected {SECTIONS} sections, found {}", sections.len()),
        });
    }
    for (index, section) in sections.iter().enumerate() {
        if section.is_empty() {
            return Err(MapError::Parse {
                line: last_line,
                reason: format!("section {} is empty", index + 1),
            });
        }
    }
    Ok(sections)
}

/// A section that must hold exactly one line with exactly one field.
fn single_field<T: FromStr>(section: &[(usize, &str)]) -> Result<T> {
    let &(line_no, line) = match section {
        [only] => only,
        [] => unreachable!("empty sections are rejected by split_sections"),
        [.., last] => {
            return Err(MapError::Parse {
                line: last.0,
                reason: "expected a single line in this section".to_owned(),
            })
        }
    };
    let [value] = fields::<1>(line, line_no)?;
    field(value, line_no)
}

/// Splits a line into exactly `N` whitespace-separated fields.
fn fields<const N: usize>(line: &str, line_no: usize) -> Result<[&str; N]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    parts.try_into().map_err(|_| MapError::Parse {
        line: line_no,
        reason: format!("expected {N} fields in {line:?}"),
    })
}

fn field<T: FromStr>(token: &str, line_no: usize) -> Result<T> {
    token.parse().map_err(|_| MapError::Parse {
        line: line_no,
        reason: format!("invalid integer {token:?}"),
    })
}
