/*
explanation.rs

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

//! Render evaluation steps as text.
//!
//! Every sentence comes from a [`Catalog`] of templates. The templates use named placeholders
//! (`{a}`, `{result}`, ...) that are filled at runtime with [`formatx`], so that the language can
//! be selected when the program runs.

use clap::ValueEnum;
use formatx::formatx;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::operator::Operator;

/// Language of the prompts and explanations.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Language {
    #[default]
    English,
    Thai,
}

/// Sentence templates for a language.
struct Catalog {
    /// Truth values in explanation sentences: `[false, true]`.
    long: [&'static str; 2],

    /// Truth values in the prompts and the negation preamble.
    plain: [&'static str; 2],

    /// One letter truth values.
    short: [&'static str; 2],

    and: &'static str,
    or: &'static str,
    implies: &'static str,
    iff: &'static str,
    not: &'static str,

    /// Preamble for a negated first operand.
    negation: &'static str,

    /// Two step explanation of `(p op1 q) op2 r`.
    compound: &'static str,

    /// Prompt for `p op q`.
    prompt_simple: &'static str,

    /// Prompt for `(~)p op q`.
    prompt_negation: &'static str,

    /// Prompt for the three variable questions.
    prompt_compound: &'static str,
}

static ENGLISH: Catalog = Catalog {
    long: ["False", "True"],
    plain: ["false", "true"],
    short: ["F", "T"],
    and: "Because AND is true only when both sides are true.\n\
          Here {a} AND {b} gives {result}.",
    or: "Because OR is false only when both sides are false.\n\
         Here {a} OR {b} gives {result}.",
    implies: "Because IMPLIES is false in one case only: true -> false.\n\
              Here {a} -> {b} gives {result}.",
    iff: "Because IFF is true when both sides have the same truth value.\n\
          Here {a} <-> {b} gives {result}.",
    not: "Because NOT flips the truth value.\n\
          From {a} it becomes {result}.",
    negation: "{expression} is {value}\n{explanation}",
    compound: "Step 1: {inner_expression} is {inner}\n({inner_explanation})\n\n\
               Step 2: combine the result with {variable}\n{outer_explanation}",
    prompt_simple: "Let p be {p} and q be {q}.",
    prompt_negation: "Let p be {p}, q be {q}.",
    prompt_compound: "p={p}, q={q}, r={r}",
};

static THAI: Catalog = Catalog {
    long: ["เท็จ (False)", "จริง (True)"],
    plain: ["เท็จ", "จริง"],
    short: ["F", "T"],
    and: "เพราะ และ (AND) จะเป็นจริงเมื่อทั้งสองข้างเป็นจริงเท่านั้น\n\
          ในที่นี้ {a} AND {b} จึงได้ {result}",
    or: "เพราะ หรือ (OR) จะเป็นเท็จเมื่อทั้งสองข้างเป็นเท็จเท่านั้น\n\
         ในที่นี้ {a} OR {b} จึงได้ {result}",
    implies: "เพราะ ถ้า...แล้ว (IMPLIES) จะเป็นเท็จกรณีเดียวคือ หน้าจริง->หลังเท็จ\n\
              ในที่นี้ {a} -> {b} จึงได้ {result}",
    iff: "เพราะ ก็ต่อเมื่อ (IFF) จะเป็นจริงเมื่อค่าความจริงเหมือนกัน\n\
          ในที่นี้ {a} <-> {b} จึงได้ {result}",
    not: "เพราะ นิเสธ (NOT) จะกลับค่าความจริง\n\
          จาก {a} จึงกลายเป็น {result}",
    negation: "{expression} มีค่าเป็น {value}\n{explanation}",
    compound: "ขั้นที่ 1: {inner_expression} ได้ค่า {inner}\n({inner_explanation})\n\n\
               ขั้นที่ 2: นำผลลัพธ์มาเชื่อมกับ {variable}\n{outer_explanation}",
    prompt_simple: "กำหนดให้ p เป็น{p} และ q เป็น{q}",
    prompt_negation: "กำหนดให้ p เป็น{p}, q เป็น{q}",
    prompt_compound: "p={p}, q={q}, r={r}",
};

/// Return the template when it cannot be filled. This only happens if a catalog entry is
/// malformed.
fn or_template<E: fmt::Debug>(template: &str, filled: Result<String, E>) -> String {
    match filled {
        Ok(s) => s,
        Err(error) => {
            warn!("Cannot fill template {template:?}: {error:?}");
            template.to_string()
        }
    }
}

/// Build the text of the explanations and prompts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ExplanationBuilder {
    language: Language,
}

impl ExplanationBuilder {
    /// Create an [`ExplanationBuilder`] object.
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn catalog(&self) -> &'static Catalog {
        match self.language {
            Language::English => &ENGLISH,
            Language::Thai => &THAI,
        }
    }

    fn long(&self, value: bool) -> &'static str {
        self.catalog().long[usize::from(value)]
    }

    fn plain(&self, value: bool) -> &'static str {
        self.catalog().plain[usize::from(value)]
    }

    fn short(&self, value: bool) -> &'static str {
        self.catalog().short[usize::from(value)]
    }

    /// Explain one operator application: state the truth rule, then the operands and the result.
    pub fn step(&self, op: Operator, a: bool, b: bool, result: bool) -> String {
        let catalog: &Catalog = self.catalog();
        let template: &str = match op {
            Operator::And => catalog.and,
            Operator::Or => catalog.or,
            Operator::Implies => catalog.implies,
            Operator::Iff => catalog.iff,
            Operator::Not => {
                return or_template(
                    catalog.not,
                    formatx!(catalog.not, a = self.long(a), result = self.long(result)),
                );
            }
        };
        or_template(
            template,
            formatx!(
                template,
                a = self.long(a),
                b = self.long(b),
                result = self.long(result)
            ),
        )
    }

    /// Prefix an explanation with the value of a negated operand.
    pub fn negation(&self, expression: &str, value: bool, explanation: &str) -> String {
        let template: &str = self.catalog().negation;
        or_template(
            template,
            formatx!(
                template,
                expression = expression,
                value = self.plain(value),
                explanation = explanation
            ),
        )
    }

    /// Join the inner and outer steps of a compound expression.
    pub fn compound(
        &self,
        inner_expression: &str,
        inner: bool,
        inner_explanation: &str,
        variable: &str,
        outer_explanation: &str,
    ) -> String {
        let template: &str = self.catalog().compound;
        or_template(
            template,
            formatx!(
                template,
                inner_expression = inner_expression,
                inner = self.plain(inner),
                inner_explanation = inner_explanation,
                variable = variable,
                outer_explanation = outer_explanation
            ),
        )
    }

    /// Prompt for the two variable questions without negation.
    pub fn prompt_simple(&self, p: bool, q: bool) -> String {
        let template: &str = self.catalog().prompt_simple;
        or_template(
            template,
            formatx!(template, p = self.plain(p), q = self.plain(q)),
        )
    }

    /// Prompt for the two variable questions that might use a negation.
    pub fn prompt_negation(&self, p: bool, q: bool) -> String {
        let template: &str = self.catalog().prompt_negation;
        or_template(
            template,
            formatx!(template, p = self.plain(p), q = self.plain(q)),
        )
    }

    /// Prompt for the three variable questions.
    pub fn prompt_compound(&self, p: bool, q: bool, r: bool) -> String {
        let template: &str = self.catalog().prompt_compound;
        or_template(
            template,
            formatx!(
                template,
                p = self.short(p),
                q = self.short(q),
                r = self.short(r)
            ),
        )
    }
}
