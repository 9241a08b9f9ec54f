/*
draw.rs

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

//! Draw the maze as text.

use crate::generator::grid::{Cell, CellKind, Grid, Position};

const WALL: char = '#';
const PATH: char = ' ';
const VISITED: char = '.';
const START: char = 'S';
const END: char = 'E';
const LOCKED_GATE: char = '?';
const OPEN_GATE: char = '+';
const PLAYER: char = '@';

/// Character for a cell.
fn glyph(cell: &Cell) -> char {
    match cell.kind() {
        CellKind::Wall => WALL,
        CellKind::Path if cell.visited() => VISITED,
        CellKind::Path => PATH,
        CellKind::Start => START,
        CellKind::End => END,
        CellKind::Gate { open: false } => LOCKED_GATE,
        CellKind::Gate { open: true } => OPEN_GATE,
    }
}

/// Render the grid, one line per row. The player, if any, hides the cell below.
pub fn render(grid: &Grid, player: Option<Position>) -> String {
    let mut out: String = String::with_capacity(grid.size() * (grid.size() + 1));
    for row in grid.rows() {
        for cell in row {
            if Some(cell.position()) == player {
                out.push(PLAYER);
            } else {
                out.push(glyph(cell));
            }
        }
        out.push('\n');
    }
    out
}

/// Legend for the [`render`] characters.
pub fn legend() -> String {
    format!(
        "{PLAYER} you  {WALL} wall  {START} start  {END} exit  {LOCKED_GATE} locked gate  \
         {OPEN_GATE} open gate  {VISITED} trail"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::question::generate_logic_question;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_render() {
        let mut grid = Grid::new(5);
        grid.set_kind(Position::new(1, 1), CellKind::Start);
        grid.set_kind(Position::new(2, 1), CellKind::Path);
        grid.set_kind(Position::new(3, 1), CellKind::Path);
        grid.set_kind(Position::new(3, 2), CellKind::Path);
        grid.set_kind(Position::new(3, 3), CellKind::End);
        let question = generate_logic_question(1, &mut StdRng::seed_from_u64(0));
        if let Some(cell) = grid.get_mut(Position::new(3, 2)) {
            cell.lock(question);
        }
        if let Some(cell) = grid.get_mut(Position::new(3, 1)) {
            cell.mark_visited();
        }

        let text = render(&grid, Some(Position::new(2, 1)));
        assert_eq!(text, "#####\n#S@.#\n###?#\n###E#\n#####\n");
    }

    #[test]
    fn test_open_gate() {
        let mut grid = Grid::new(5);
        grid.set_kind(Position::new(1, 1), CellKind::Gate { open: true });
        let text = render(&grid, None);
        assert_eq!(text.lines().nth(1), Some("#+###"));
    }
}
