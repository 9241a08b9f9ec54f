/*
cli_options.rs

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

//! Process command-line options.
//!
//! Without options, the game starts in the terminal.
//! The `--maze` and `--question` options print generated data instead, which is useful to
//! inspect the generators.
//!
//! # Examples
//!
//! Print a level 3 maze and the questions of its gates:
//!
//! ```text
//! $ logic-labyrinth --maze --level 3 --seed 42
//! ```
//!
//! Print five compound questions in JSON:
//!
//! ```text
//! $ logic-labyrinth --question 3 --count 5 --json
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::env;
use std::error::Error;
use std::fmt::Write;

use crate::config::{COPYRIGHT_NOTICE, GRID_SIZE};
use crate::draw;
use crate::generator::explanation::Language;
use crate::generator::maze::{Maze, MazeBuilder};
use crate::generator::question::{LogicQuestion, QuestionGenerator};

/// Walk the labyrinth and open its gates by answering logic questions.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Level to start at
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Side length of the maze (odd, at least 5)
    #[arg(short = 'z', long, default_value_t = GRID_SIZE)]
    size: usize,

    /// Seed for reproducible mazes and questions
    #[arg(short, long)]
    seed: Option<u64>,

    /// Language of the questions and explanations
    #[arg(value_enum, short = 'g', long, default_value_t = Language::English)]
    language: Language,

    /// Print a maze instead of playing
    #[arg(short, long, default_value_t = false, conflicts_with = "question")]
    maze: bool,

    /// Print questions of the given difficulty (1 to 3) instead of playing
    #[arg(short, long, value_name = "DIFFICULTY")]
    question: Option<u32>,

    /// Number of questions to print
    #[arg(short, long, default_value_t = 1, requires = "question")]
    count: usize,

    /// Print the maze or the questions in JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parameters of a game to play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOptions {
    pub level: u32,
    pub size: usize,
    pub seed: Option<u64>,
    pub language: Language,
}

/// What the program does after parsing the options.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Exit with the given code.
    Exit(u8),

    /// Start a game.
    Play(PlayOptions),
}

/// Parse and process command-line options.
pub fn parse() -> Action {
    let args: Args = Args::parse();

    if args.debug {
        println!("DEBUG");
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();
    debug!("{args:?}");

    if !args.maze && args.question.is_none() {
        return Action::Play(PlayOptions {
            level: args.level,
            size: args.size,
            seed: args.seed,
            language: args.language,
        });
    }

    match report(&args) {
        Ok(text) => {
            print!("{text}");
            Action::Exit(0)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Action::Exit(1)
        }
    }
}

/// Build the text for the `--maze` and `--question` options.
fn report(args: &Args) -> Result<String, Box<dyn Error>> {
    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let questions: QuestionGenerator = QuestionGenerator::new(args.language);

    //
    // Print generated questions
    //
    if let Some(difficulty) = args.question {
        let list: Vec<LogicQuestion> = (0..args.count)
            .map(|_| questions.generate(difficulty, &mut rng))
            .collect();
        if args.json {
            return to_json(&list);
        }
        let mut out: String = String::new();
        for q in &list {
            write_question(&mut out, q)?;
        }
        return Ok(out);
    }

    //
    // Print a maze
    //
    let builder: MazeBuilder = MazeBuilder::new(args.size, questions)?;
    let maze: Maze = builder.generate(args.level, None, &mut rng)?;
    if args.json {
        return to_json(&maze);
    }
    let mut out: String = draw::render(&maze.grid, None);
    writeln!(out, "{}", draw::legend())?;
    for cell in maze.grid.cells() {
        if let Some(q) = cell.question() {
            writeln!(out, "\nGate at {}", cell.position())?;
            write_question(&mut out, q)?;
        }
    }
    Ok(out)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Box<dyn Error>> {
    let mut text: String = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

fn write_question(out: &mut String, q: &LogicQuestion) -> std::fmt::Result {
    writeln!(out, "[{}] {}", q.id(), q.prompt_text())?;
    writeln!(out, "{} = {}", q.expression_display(), q.answer())?;
    writeln!(out, "{}", q.explanation())
}
