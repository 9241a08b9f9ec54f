/*
question.rs

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

//! Generate logic questions.
//!
//! A question assigns random truth values to the `p`, `q`, and `r` variables and asks for the
//! truth value of an expression. The shape of the expression depends on the [`Tier`]:
//!
//! * [`Tier::Simple`]: `p op q` with `op` in AND and OR.
//! * [`Tier::Negation`]: `p op q` or `~p op q` with `op` in AND, OR, IMPLIES, and IFF.
//! * [`Tier::Compound`]: `(p op1 q) op2 r`.
//!
//! The explanation is built when the question is created.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use super::explanation::{ExplanationBuilder, Language};
use super::operator::{BINARY_OPERATORS, Operator, SIMPLE_OPERATORS};
use crate::config::MAX_DIFFICULTY;

/// Probability of negating `p` in [`Tier::Negation`] questions.
const NEGATION_PROBABILITY: f64 = 0.4;

/// Characters used for the question identifiers.
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 9;

/// Question complexity.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u32)]
pub enum Tier {
    Simple = 1,
    Negation = 2,
    Compound = 3,
}

impl Tier {
    /// Map a difficulty to its tier. Zero is treated as one, and everything above three is
    /// [`Tier::Compound`].
    pub fn from_difficulty(difficulty: u32) -> Self {
        Self::from_repr(difficulty.clamp(1, MAX_DIFFICULTY)).unwrap_or(Tier::Compound)
    }
}

/// Question variables.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Variable {
    P,
    Q,
    R,
}

impl Variable {
    pub fn name(self) -> &'static str {
        match self {
            Variable::P => "p",
            Variable::Q => "q",
            Variable::R => "r",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Truth values of the variables.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    pub p: bool,
    pub q: bool,
    pub r: bool,
}

impl Assignment {
    /// Draw independent random values for all the variables.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            p: rng.random(),
            q: rng.random(),
            r: rng.random(),
        }
    }
}

/// Expression structure of a question.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    /// `p op q`, or `~p op q` when `negate_p` is set.
    Binary { op: Operator, negate_p: bool },

    /// `(p inner q) outer r`.
    Compound { inner: Operator, outer: Operator },
}

/// Logic question attached to a gate.
///
/// The object cannot be modified after creation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LogicQuestion {
    /// Random identifier, for display and debugging only.
    id: String,

    /// Short statement of the variable values.
    prompt_text: String,

    variable_assignment: Assignment,

    /// Expression with the operator symbols, such as `(p ∧ q) → r`.
    expression_display: String,

    /// Truth value of the expression.
    answer: bool,

    /// Step-by-step derivation of the answer.
    explanation: String,
}

impl LogicQuestion {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn variable_assignment(&self) -> &Assignment {
        &self.variable_assignment
    }

    pub fn expression_display(&self) -> &str {
        &self.expression_display
    }

    pub fn answer(&self) -> bool {
        self.answer
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether the given answer is correct.
    pub fn is_correct(&self, answer: bool) -> bool {
        self.answer == answer
    }
}

/// Pick an operator uniformly from the given list.
fn pick<R: Rng + ?Sized>(operators: &[Operator], rng: &mut R) -> Operator {
    operators[rng.random_range(0..operators.len())]
}

/// Build a random question identifier.
fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Logic question generator.
#[derive(Debug, Copy, Clone, Default)]
pub struct QuestionGenerator {
    explanations: ExplanationBuilder,
}

impl QuestionGenerator {
    /// Create a [`QuestionGenerator`] object that writes its prompts and explanations in the
    /// given language.
    pub fn new(language: Language) -> Self {
        Self {
            explanations: ExplanationBuilder::new(language),
        }
    }

    /// Generate a question for the given difficulty.
    pub fn generate<R: Rng + ?Sized>(&self, difficulty: u32, rng: &mut R) -> LogicQuestion {
        let tier: Tier = Tier::from_difficulty(difficulty);
        let assignment: Assignment = Assignment::random(rng);
        let shape: Shape = match tier {
            Tier::Simple => Shape::Binary {
                op: pick(&SIMPLE_OPERATORS, rng),
                negate_p: false,
            },
            Tier::Negation => Shape::Binary {
                op: pick(&BINARY_OPERATORS, rng),
                negate_p: rng.random_bool(NEGATION_PROBABILITY),
            },
            Tier::Compound => Shape::Compound {
                inner: pick(&BINARY_OPERATORS, rng),
                outer: pick(&BINARY_OPERATORS, rng),
            },
        };
        let id: String = random_id(rng);
        debug!("Question {id}: difficulty {difficulty} ({tier:?}) {shape:?} {assignment:?}");
        self.build(tier, shape, assignment, id)
    }

    /// Build the question for a given expression shape and variable assignment.
    pub(crate) fn build(
        &self,
        tier: Tier,
        shape: Shape,
        assignment: Assignment,
        id: String,
    ) -> LogicQuestion {
        let (p, q, r) = (assignment.p, assignment.q, assignment.r);
        let e: &ExplanationBuilder = &self.explanations;

        let (expression_display, answer, explanation) = match shape {
            Shape::Binary { op, negate_p } => {
                let (left, left_display) = if negate_p {
                    (
                        Operator::Not.evaluate(p, false),
                        format!("{}{}", Operator::Not.symbol(), Variable::P),
                    )
                } else {
                    (p, Variable::P.to_string())
                };
                let answer: bool = op.evaluate(left, q);
                let step: String = e.step(op, left, q, answer);
                let explanation: String = if negate_p {
                    e.negation(&left_display, left, &step)
                } else {
                    step
                };
                (
                    format!("{left_display} {op} {}", Variable::Q),
                    answer,
                    explanation,
                )
            }
            Shape::Compound { inner, outer } => {
                let inner_value: bool = inner.evaluate(p, q);
                let answer: bool = outer.evaluate(inner_value, r);
                let inner_display: String = format!("({} {inner} {})", Variable::P, Variable::Q);
                let explanation: String = e.compound(
                    &inner_display,
                    inner_value,
                    &e.step(inner, p, q, inner_value),
                    Variable::R.name(),
                    &e.step(outer, inner_value, r, answer),
                );
                (
                    format!("{inner_display} {outer} {}", Variable::R),
                    answer,
                    explanation,
                )
            }
        };

        let prompt_text: String = match tier {
            Tier::Simple => e.prompt_simple(p, q),
            Tier::Negation => e.prompt_negation(p, q),
            Tier::Compound => e.prompt_compound(p, q, r),
        };

        LogicQuestion {
            id,
            prompt_text,
            variable_assignment: assignment,
            expression_display,
            answer,
            explanation,
        }
    }
}

/// Generate a question with the English catalog.
pub fn generate_logic_question<R: Rng + ?Sized>(difficulty: u32, rng: &mut R) -> LogicQuestion {
    QuestionGenerator::default().generate(difficulty, rng)
}
