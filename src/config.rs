/*
config.rs

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

//! Build-time settings.

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>"
);

/// Side length of the maze. Must be odd for the carving algorithm.
pub const GRID_SIZE: usize = 15;

/// Smallest accepted side length.
pub const MIN_GRID_SIZE: usize = 5;

/// Gates placed on every level before the level bonus.
pub const BASE_GATES: usize = 6;

/// Upper bound on the number of gates in a maze.
pub const MAX_GATES: usize = 25;

/// Number of random coordinates tried when placing gates.
pub const GATE_PLACEMENT_ATTEMPTS: usize = 100;

/// Highest question difficulty tier.
pub const MAX_DIFFICULTY: u32 = 3;

/// Points for opening a gate.
pub const POINTS_PER_GATE: u64 = 100;

/// Points for reaching the end cell, multiplied by the level.
pub const POINTS_LEVEL_COMPLETE: u64 = 500;

/// Environment variable naming the external program that answers hint requests.
pub const HINT_COMMAND_ENV: &str = "LOGIC_LABYRINTH_HINT_COMMAND";
