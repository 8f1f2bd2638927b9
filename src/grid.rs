// src/grid.rs
//! Fine-grid occupancy tracking for the generator.
//!
//! Vertices live on integer coordinates in `[-bound, bound]²`. Collisions
//! are detected on a lattice of side `4 * bound + 1` at half-step
//! resolution: coordinate `x` maps to fine column `(x + bound) * 2`, and the
//! odd columns in between catch edges crossing midway between two integer
//! cells (a diagonal edge only touches half cells there).

use crate::graph::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Free,
    Vertex,
    Edge,
}

#[derive(Debug, Clone)]
pub struct Grid {
    bound: i32,
    side: usize,
    cells: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn new(bound: i32) -> Self {
        let side = (4 * bound + 1) as usize;
        Self { bound, side, cells: vec![Cell::Free; side * side] }
    }

    /// True if the vertex coordinate lies inside the playing field.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.0.abs() <= self.bound && coord.1.abs() <= self.bound
    }

    /// Marks a vertex cell occupied.
    pub fn mark_vertex(&mut self, coord: Coord) {
        let pos = self.fine(coord, (0, 0), 0);
        self.set(pos, Cell::Vertex);
    }

    /// Checks every cell a straight segment of `step` Chebyshev moves in
    /// `dir` crosses, at both half and integer resolution. Intermediate
    /// cells must be free; the destination integer cell may already hold a
    /// vertex (paths are allowed to terminate at an existing vertex), but
    /// never an edge crossing.
    #[must_use]
    pub fn segment_is_clear(&self, from: Coord, dir: Coord, step: i32) -> bool {
        for i in 1..step {
            if self.at(self.fine(from, dir, i).shift(dir)) != Cell::Free {
                return false;
            }
            if self.at(self.fine(from, dir, i)) != Cell::Free {
                return false;
            }
        }
        if self.at(self.fine(from, dir, step).shift(dir)) != Cell::Free {
            return false;
        }
        self.at(self.fine(from, dir, step)) != Cell::Edge
    }

    /// Marks a validated segment: crossed cells become edge-used, the
    /// destination cell becomes vertex-occupied.
    pub fn mark_segment(&mut self, from: Coord, dir: Coord, step: i32) {
        for i in 1..step {
            let half = self.fine(from, dir, i).shift(dir);
            let full = self.fine(from, dir, i);
            self.set(half, Cell::Edge);
            self.set(full, Cell::Edge);
        }
        let last_half = self.fine(from, dir, step).shift(dir);
        let last_full = self.fine(from, dir, step);
        self.set(last_half, Cell::Edge);
        self.set(last_full, Cell::Vertex);
    }

    /// Fine lattice position after `i` moves in `dir` from `from`.
    fn fine(&self, from: Coord, dir: Coord, i: i32) -> Fine {
        Fine {
            x: (from.0 + dir.0 * i + self.bound) * 2,
            y: (from.1 + dir.1 * i + self.bound) * 2,
        }
    }

    fn at(&self, pos: Fine) -> Cell {
        self.cells[self.index(pos.x, pos.y)]
    }

    fn set(&mut self, pos: Fine, cell: Cell) {
        let idx = self.index(pos.x, pos.y);
        self.cells[idx] = cell;
    }

    fn index(&self, fx: i32, fy: i32) -> usize {
        debug_assert!(fx >= 0 && fy >= 0 && (fx as usize) < self.side && (fy as usize) < self.side);
        fx as usize * self.side + fy as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct Fine {
    x: i32,
    y: i32,
}

impl Fine {
    /// Steps half a move back against `dir`, landing on the half cell
    /// between the current integer cell and the previous one.
    fn shift(self, dir: Coord) -> Self {
        Self { x: self.x - dir.0, y: self.y - dir.1 }
    }
}
