/*
grid.rs

Copyright 2025 Hervé Quatremain

This file is part of Logic Labyrinth.

Logic Labyrinth is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Logic Labyrinth is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Logic Labyrinth. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Square grid of maze cells.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::question::LogicQuestion;

/// Cell coordinates.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Return the position moved by the given offset, or None if a coordinate would be negative.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset for the direction. The y axis grows downward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Type of a cell.
///
/// - A `Wall` cell blocks the player.
/// - A `Path` cell is a carved corridor.
/// - `Start` and `End` are the entry and exit of the maze.
/// - A `Gate` blocks the player until its question is answered. An opened gate behaves like a
///   `Path` cell.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Wall,
    Path,
    Start,
    End,
    Gate { open: bool },
}

/// Maze cell.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Cell {
    x: usize,
    y: usize,
    kind: CellKind,

    /// Question of a locked gate.
    question: Option<LogicQuestion>,

    /// Whether the player walked on the cell.
    visited: bool,
}

impl Cell {
    /// Create a [`CellKind::Wall`] cell.
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            kind: CellKind::Wall,
            question: None,
            visited: false,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Whether the cell is not a wall. Locked gates are included.
    pub fn is_open_space(&self) -> bool {
        self.kind != CellKind::Wall
    }

    /// Whether the player can step on the cell without answering a question.
    pub fn is_walkable(&self) -> bool {
        !matches!(self.kind, CellKind::Wall | CellKind::Gate { open: false })
    }

    /// Whether the cell is a gate that is still locked.
    pub fn is_locked_gate(&self) -> bool {
        self.kind == CellKind::Gate { open: false }
    }

    /// Gate open status. None for the other cell types.
    pub fn is_open(&self) -> Option<bool> {
        match self.kind {
            CellKind::Gate { open } => Some(open),
            _ => None,
        }
    }

    /// Question of a locked gate.
    pub fn question(&self) -> Option<&LogicQuestion> {
        self.question.as_ref()
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Record that the player walked on the cell.
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Change the cell type. Any question is dropped.
    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
        self.question = None;
    }

    /// Turn the cell into a locked gate that asks the given question.
    pub(crate) fn lock(&mut self, question: LogicQuestion) {
        self.kind = CellKind::Gate { open: false };
        self.question = Some(question);
    }

    /// Open a locked gate. Return false if the cell is not a locked gate.
    pub fn open_gate(&mut self) -> bool {
        if !self.is_locked_gate() {
            return false;
        }
        self.kind = CellKind::Gate { open: true };
        self.question = None;
        true
    }
}

/// Square matrix of cells.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Grid {
    size: usize,

    /// Cells, row by row.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid filled with walls.
    pub fn new(size: usize) -> Self {
        let mut cells: Vec<Cell> = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(Cell::new(x, y));
            }
        }
        Self { size, cells }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    /// Whether the position is inside the border walls.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x > 0 && pos.x + 1 < self.size && pos.y > 0 && pos.y + 1 < self.size
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.contains(pos) {
            self.cells.get(pos.y * self.size + pos.x)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if self.contains(pos) {
            self.cells.get_mut(pos.y * self.size + pos.x)
        } else {
            None
        }
    }

    /// Cell type at the position. Positions outside the grid are walls.
    pub fn kind(&self, pos: Position) -> CellKind {
        self.get(pos).map_or(CellKind::Wall, Cell::kind)
    }

    pub(crate) fn set_kind(&mut self, pos: Position, kind: CellKind) {
        if let Some(cell) = self.get_mut(pos) {
            cell.set_kind(kind);
        }
    }

    /// Iterate over the cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Orthogonal neighbors that are inside the grid.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| {
            let (dx, dy) = d.delta();
            pos.offset(dx, dy).filter(|p| self.contains(*p))
        })
    }

    /// Number of cells of the given type.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// Number of gates, opened or not.
    pub fn gate_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c.kind, CellKind::Gate { .. }))
            .count()
    }

    /// Return the positions that can be reached from `from` through non-wall cells.
    pub fn reachable_from(&self, from: Position) -> Vec<bool> {
        let mut seen: Vec<bool> = vec![false; self.cells.len()];
        if !self.get(from).is_some_and(Cell::is_open_space) {
            return seen;
        }
        let mut queue: VecDeque<Position> = VecDeque::new();
        seen[from.y * self.size + from.x] = true;
        queue.push_back(from);
        while let Some(pos) = queue.pop_front() {
            for n in self.neighbors(pos) {
                let i: usize = n.y * self.size + n.x;
                if !seen[i] && self.cells[i].is_open_space() {
                    seen[i] = true;
                    queue.push_back(n);
                }
            }
        }
        seen
    }
}
