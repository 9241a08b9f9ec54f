/*
operator.rs

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

//! Boolean operators and their truth tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logic operators used in the questions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Implies,
    Iff,
    /// Unary. The second operand is ignored.
    Not,
}

/// Operators for the easiest questions.
pub const SIMPLE_OPERATORS: [Operator; 2] = [Operator::And, Operator::Or];

/// Binary operators for the other questions.
pub const BINARY_OPERATORS: [Operator; 4] = [
    Operator::And,
    Operator::Or,
    Operator::Implies,
    Operator::Iff,
];

impl Operator {
    /// Evaluate the operator.
    ///
    /// For [`Operator::Not`], `b` is ignored.
    pub fn evaluate(self, a: bool, b: bool) -> bool {
        match self {
            Operator::And => a && b,
            Operator::Or => a || b,
            // T -> F is the only false case
            Operator::Implies => !a || b,
            Operator::Iff => a == b,
            Operator::Not => !a,
        }
    }

    /// Mathematical symbol used in the expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::And => "∧",
            Operator::Or => "∨",
            Operator::Implies => "→",
            Operator::Iff => "↔",
            Operator::Not => "~",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
