/*
lib.rs

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

//! Maze and logic question generators for the Logic Labyrinth game.
//!
//! The [`generator`] module builds the mazes and the questions that lock their gates.
//! The [`game`] module tracks a game in progress, and [`hint`] fetches explanations.

pub mod application;
pub mod cli_options;
pub mod config;
pub mod draw;
pub mod game;
pub mod generator;
pub mod hint;

pub use generator::maze::{Maze, MazeBuilder, MazeError, generate_maze};
pub use generator::question::{LogicQuestion, generate_logic_question};
