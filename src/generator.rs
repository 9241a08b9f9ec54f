/*
generator.rs

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

//! Generate random mazes and logic questions.
//!
//! A game level is a [`maze::Maze`] object: a square [`grid::Grid`] of cells, with a start cell
//! in the top left corner and an end cell in the bottom right corner.
//! You create it with a [`maze::MazeBuilder`] object and its [`maze::MazeBuilder::generate`]
//! method.
//!
//! Some corridor cells are locked gates.
//! Each gate carries a [`question::LogicQuestion`] object built by a
//! [`question::QuestionGenerator`]:
//!
//! * The [`operator::Operator`] enumeration evaluates the boolean operators.
//! * The [`explanation::ExplanationBuilder`] object turns each evaluation step into text, in the
//!   selected [`explanation::Language`].
//!
//! All the generators take the random number generator as a parameter, so that a seeded
//! generator produces the same maze every time.

pub mod explanation;
pub mod grid;
pub mod maze;
pub mod operator;
pub mod question;
