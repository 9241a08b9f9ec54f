/*
maze.rs

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

//! Generate a random maze with logic gates.
//!
//! Corridors are carved with a randomized depth-first search (recursive backtracker) that
//! moves two cells at a time, so that corridors stay one cell wide with walls between them.
//! Gates are then scattered on the carved corridors.

use log::{Level, debug, log_enabled};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use super::grid::{CellKind, Grid, Position};
use super::question::QuestionGenerator;
use crate::config::{
    BASE_GATES, GATE_PLACEMENT_ATTEMPTS, GRID_SIZE, MAX_DIFFICULTY, MAX_GATES, MIN_GRID_SIZE,
};
use crate::draw;

/// Carving moves: two cells in each direction.
const CARVE_DIRECTIONS: [(isize, isize); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum MazeError {
    /// The side length is even or too small.
    InvalidSize(usize),

    /// The position to preserve is outside the grid.
    PositionOutOfBounds(Position),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MazeError::InvalidSize(size) => write!(
                f,
                "invalid maze size {size}: must be odd and at least {MIN_GRID_SIZE}"
            ),
            MazeError::PositionOutOfBounds(pos) => write!(f, "position {pos} is outside the maze"),
        }
    }
}

impl Error for MazeError {}

/// Generated maze.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Maze {
    pub grid: Grid,
    pub start: Position,
    pub end: Position,
}

/// Maze generator.
#[derive(Debug, Clone)]
pub struct MazeBuilder {
    /// Side length of the generated grids.
    size: usize,

    /// Generator for the gate questions.
    questions: QuestionGenerator,
}

impl Default for MazeBuilder {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            questions: QuestionGenerator::default(),
        }
    }
}

impl MazeBuilder {
    /// Create a [`MazeBuilder`] object.
    ///
    /// # Errors
    ///
    /// The method returns an error if the size is even or smaller than [`MIN_GRID_SIZE`].
    pub fn new(size: usize, questions: QuestionGenerator) -> Result<Self, MazeError> {
        if size < MIN_GRID_SIZE || size % 2 == 0 {
            return Err(MazeError::InvalidSize(size));
        }
        Ok(Self { size, questions })
    }

    /// Entry cell, in the top left corner.
    pub fn start(&self) -> Position {
        Position::new(1, 1)
    }

    /// Exit cell, in the bottom right corner.
    pub fn end(&self) -> Position {
        Position::new(self.size - 2, self.size - 2)
    }

    /// Maximum number of gates for the level, before the placement attempts run out.
    pub fn max_gates(level: u32) -> usize {
        MAX_GATES.min(BASE_GATES + level as usize + 2)
    }

    /// Generate a maze for the given level.
    ///
    /// `preserve` is the position of a player in a maze being regenerated. That position is
    /// kept open in the new maze and is never turned into a gate.
    ///
    /// # Errors
    ///
    /// The method returns an error if `preserve` is outside the grid.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        level: u32,
        preserve: Option<Position>,
        rng: &mut R,
    ) -> Result<Maze, MazeError> {
        let level: u32 = level.max(1);
        let mut grid: Grid = Grid::new(self.size);
        if let Some(pos) = preserve
            && !grid.contains(pos)
        {
            return Err(MazeError::PositionOutOfBounds(pos));
        }

        let start: Position = self.start();
        let end: Position = self.end();

        self.carve(&mut grid, start, rng);
        grid.set_kind(start, CellKind::Start);
        grid.set_kind(end, CellKind::End);

        if let Some(pos) = preserve {
            self.preserve(&mut grid, pos);
        }

        let placed: usize = self.place_gates(&mut grid, level, preserve, rng);
        debug!(
            "Level {level}: {} path cells, {placed} gates",
            grid.count(CellKind::Path)
        );
        if log_enabled!(Level::Debug) {
            debug!("\n{}", draw::render(&grid, preserve));
        }

        Ok(Maze { grid, start, end })
    }

    /// Carve the corridors from the starting cell.
    fn carve<R: Rng + ?Sized>(&self, grid: &mut Grid, start: Position, rng: &mut R) {
        let mut stack: Vec<Position> = vec![start];
        grid.set_kind(start, CellKind::Path);

        let mut candidates: Vec<Position> = Vec::with_capacity(CARVE_DIRECTIONS.len());
        while let Some(&current) = stack.last() {
            candidates.clear();
            for (dx, dy) in CARVE_DIRECTIONS {
                if let Some(next) = current.offset(dx, dy)
                    && grid.is_interior(next)
                    && grid.kind(next) == CellKind::Wall
                {
                    candidates.push(next);
                }
            }

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let next: Position = candidates[rng.random_range(0..candidates.len())];
            // Deltas are always 0 or 2, so the connector is half way
            let connector: Position =
                Position::new((current.x + next.x) / 2, (current.y + next.y) / 2);
            grid.set_kind(next, CellKind::Path);
            grid.set_kind(connector, CellKind::Path);
            stack.push(next);
        }
    }

    /// Keep the given position open.
    ///
    /// If all its neighbors are walls, open the one toward the center of the maze. This only
    /// prevents the player from being walled in. It does not guarantee that the position is
    /// connected to the rest of the maze.
    fn preserve(&self, grid: &mut Grid, pos: Position) {
        // Start and end cells are already open
        if grid.kind(pos) == CellKind::Wall {
            grid.set_kind(pos, CellKind::Path);
        }

        if grid
            .neighbors(pos)
            .any(|n| grid.kind(n) != CellKind::Wall)
        {
            return;
        }

        let half: usize = self.size / 2;
        let dx: isize = if pos.x > half { -1 } else { 1 };
        let dy: isize = if pos.y > half { -1 } else { 1 };
        let target: Option<Position> = pos
            .offset(0, dy)
            .filter(|p| grid.contains(*p))
            .or_else(|| pos.offset(dx, 0).filter(|p| grid.contains(*p)));
        if let Some(t) = target {
            debug!("Position {pos} is walled in: opening {t}");
            grid.set_kind(t, CellKind::Path);
        }
    }

    /// Turn random path cells into locked gates. Return the number of gates placed.
    fn place_gates<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        level: u32,
        preserve: Option<Position>,
        rng: &mut R,
    ) -> usize {
        let target: usize = MAX_GATES.min(BASE_GATES + level as usize + rng.random_range(0..=2));
        let difficulty: u32 = level.min(MAX_DIFFICULTY);
        let start: Position = self.start();
        let end: Position = self.end();

        let mut placed: usize = 0;
        let mut attempts: usize = 0;
        while placed < target && attempts < GATE_PLACEMENT_ATTEMPTS {
            attempts += 1;
            let pos: Position = Position::new(
                rng.random_range(1..self.size - 1),
                rng.random_range(1..self.size - 1),
            );
            if pos == start || pos == end || Some(pos) == preserve {
                continue;
            }
            if grid.kind(pos) != CellKind::Path {
                continue;
            }
            let question = self.questions.generate(difficulty, rng);
            if let Some(cell) = grid.get_mut(pos) {
                cell.lock(question);
                placed += 1;
            }
        }
        debug!("Gates: {placed}/{target} placed after {attempts} attempts");
        placed
    }
}

/// Generate a maze of the default size with English questions.
///
/// # Errors
///
/// The function returns an error if `preserve` is outside the grid.
pub fn generate_maze<R: Rng + ?Sized>(
    level: u32,
    preserve: Option<Position>,
    rng: &mut R,
) -> Result<Maze, MazeError> {
    MazeBuilder::default().generate(level, preserve, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::explanation::Language;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Verify the invariants that hold for every generated maze. `exempt` is a position that
    /// may be disconnected from the start cell.
    fn check_maze(maze: &Maze, level: u32, exempt: Option<Position>) {
        let grid = &maze.grid;
        let n = grid.size();

        assert_eq!(grid.count(CellKind::Start), 1);
        assert_eq!(grid.count(CellKind::End), 1);
        assert_eq!(maze.start, Position::new(1, 1));
        assert_eq!(maze.end, Position::new(n - 2, n - 2));
        assert_eq!(grid.kind(maze.start), CellKind::Start);
        assert_eq!(grid.kind(maze.end), CellKind::End);

        let gates = grid.gate_count();
        assert!(gates <= MazeBuilder::max_gates(level), "{gates} gates");

        let seen = grid.reachable_from(maze.start);
        for cell in grid.cells() {
            let pos = cell.position();
            if let CellKind::Gate { open } = cell.kind() {
                assert!(!open);
                assert!(cell.question().is_some());
                assert_ne!(Some(pos), exempt);
            } else {
                assert!(cell.question().is_none());
            }
            if !cell.is_open_space() {
                continue;
            }
            if let Some(e) = exempt
                && (pos == e || grid.neighbors(e).any(|p| p == pos))
            {
                continue;
            }
            assert!(seen[pos.y * n + pos.x], "{pos} is not reachable");
        }
    }

    #[test]
    fn test_default_maze() {
        let mut rng = StdRng::seed_from_u64(42);
        let maze = generate_maze(1, None, &mut rng).expect("maze");
        assert_eq!(maze.grid.size(), 15);
        assert_eq!(maze.start, Position::new(1, 1));
        assert_eq!(maze.end, Position::new(13, 13));
        check_maze(&maze, 1, None);
    }

    #[test]
    fn test_gate_count_level_one() {
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate_maze(1, None, &mut rng).expect("maze");
            let gates = maze.grid.gate_count();
            assert!((6..=9).contains(&gates), "seed {seed}: {gates} gates");
        }
    }

    #[test]
    fn test_invariants_for_levels_and_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [5, 7, 9, 15, 21] {
            let builder = MazeBuilder::new(size, QuestionGenerator::default()).expect("builder");
            for level in [1, 2, 3, 5, 20, 40] {
                let maze = builder.generate(level, None, &mut rng).expect("maze");
                check_maze(&maze, level, None);
            }
        }
    }

    #[test]
    fn test_all_odd_interior_cells_are_carved() {
        let mut rng = StdRng::seed_from_u64(11);
        let builder = MazeBuilder::new(11, QuestionGenerator::default()).expect("builder");
        let maze = builder.generate(1, None, &mut rng).expect("maze");
        for y in (1..10).step_by(2) {
            for x in (1..10).step_by(2) {
                assert!(maze.grid.get(Position::new(x, y)).is_some_and(|c| c.is_open_space()));
            }
        }
        // Border stays closed
        for i in 0..11 {
            assert_eq!(maze.grid.kind(Position::new(i, 0)), CellKind::Wall);
            assert_eq!(maze.grid.kind(Position::new(0, i)), CellKind::Wall);
            assert_eq!(maze.grid.kind(Position::new(i, 10)), CellKind::Wall);
            assert_eq!(maze.grid.kind(Position::new(10, i)), CellKind::Wall);
        }
    }

    #[test]
    fn test_gate_difficulty_follows_level() {
        let mut rng = StdRng::seed_from_u64(5);
        let maze = generate_maze(5, None, &mut rng).expect("maze");
        for cell in maze.grid.cells() {
            if let Some(q) = cell.question() {
                // Compound expressions
                assert!(q.expression_display().starts_with("(p "));
            }
        }
    }

    #[test]
    fn test_preserve_wall_position() {
        // (7, 7) has odd coordinates and is always carved. Find a wall cell instead, so that the
        // repair is exercised.
        let mut rng = StdRng::seed_from_u64(3);
        let first = generate_maze(1, None, &mut rng).expect("maze");
        let wall = first
            .grid
            .cells()
            .map(|c| c.position())
            .find(|p| first.grid.is_interior(*p) && p.x % 2 == 0 && p.y % 2 == 0)
            .expect("even cell");

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate_maze(2, Some(wall), &mut rng).expect("maze");
            assert_ne!(maze.grid.kind(wall), CellKind::Wall);
            assert!(maze.grid.neighbors(wall).any(|n| maze.grid.kind(n) != CellKind::Wall));
            check_maze(&maze, 2, Some(wall));
        }
    }

    #[test]
    fn test_preserve_center() {
        let preserved = Position::new(7, 7);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate_maze(1, Some(preserved), &mut rng).expect("maze");
            let cell = maze.grid.get(preserved).expect("cell");
            assert_ne!(cell.kind(), CellKind::Wall);
            assert!(cell.question().is_none());
            assert!(maze.grid.neighbors(preserved).any(|n| maze.grid.kind(n) != CellKind::Wall));
        }
    }

    #[test]
    fn test_preserve_unstick_direction() {
        let builder = MazeBuilder::default();
        let mut grid = Grid::new(15);
        // Lower right quadrant: open toward the top
        builder.preserve(&mut grid, Position::new(10, 10));
        assert_eq!(grid.kind(Position::new(10, 10)), CellKind::Path);
        assert_eq!(grid.kind(Position::new(10, 9)), CellKind::Path);
        assert_eq!(grid.kind(Position::new(9, 10)), CellKind::Wall);

        // Upper left quadrant: open toward the bottom
        builder.preserve(&mut grid, Position::new(2, 2));
        assert_eq!(grid.kind(Position::new(2, 3)), CellKind::Path);
    }

    #[test]
    fn test_preserve_keeps_start() {
        let mut rng = StdRng::seed_from_u64(8);
        let maze = generate_maze(1, Some(Position::new(1, 1)), &mut rng).expect("maze");
        check_maze(&maze, 1, Some(Position::new(1, 1)));
    }

    #[test]
    fn test_preserve_out_of_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let pos = Position::new(15, 2);
        assert_eq!(
            generate_maze(1, Some(pos), &mut rng).err(),
            Some(MazeError::PositionOutOfBounds(pos))
        );
    }

    #[test]
    fn test_invalid_sizes() {
        for size in [0, 3, 4, 14] {
            assert_eq!(
                MazeBuilder::new(size, QuestionGenerator::default()).err(),
                Some(MazeError::InvalidSize(size))
            );
        }
        assert!(MazeBuilder::new(5, QuestionGenerator::new(Language::Thai)).is_ok());
    }

    #[test]
    fn test_level_zero_is_level_one() {
        let mut rng = StdRng::seed_from_u64(12);
        let maze = generate_maze(0, None, &mut rng).expect("maze");
        check_maze(&maze, 1, None);
    }

    #[test]
    fn test_small_grid_tolerates_few_gates() {
        // A 5x5 maze has at most 6 path cells that can hold a gate
        let builder = MazeBuilder::new(5, QuestionGenerator::default()).expect("builder");
        let mut rng = StdRng::seed_from_u64(13);
        let maze = builder.generate(10, None, &mut rng).expect("maze");
        assert!(maze.grid.gate_count() <= 6);
        check_maze(&maze, 10, None);
    }

    #[test]
    fn test_independent_generations() {
        let mut rng = StdRng::seed_from_u64(21);
        let a = generate_maze(3, None, &mut rng).expect("maze");
        let b = generate_maze(3, None, &mut rng).expect("maze");
        check_maze(&a, 3, None);
        check_maze(&b, 3, None);
        // Generating the second maze did not touch the first one
        let again = generate_maze(3, None, &mut StdRng::seed_from_u64(21)).expect("maze");
        let kinds = |m: &Maze| m.grid.cells().map(|c| c.kind()).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&again));
    }
}
