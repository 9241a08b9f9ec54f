/*
application.rs

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

//! Terminal front end.
//!
//! The [`Application`] object reads one command per line, applies it to the [`Game`] object,
//! and draws the maze after every command.

use log::debug;
use std::error::Error;
use std::io::{BufRead, Write};

use crate::draw;
use crate::game::{AnswerOutcome, Game, MoveOutcome, Phase};
use crate::generator::grid::Direction;
use crate::hint::{HintFetcher, PendingHint};

const HELP: &str = "Commands: w/a/s/d move, t/f answer true or false, h hint, n next level, \
                    ? help, q quit";

/// Player command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Answer(bool),
    Hint,
    NextLevel,
    Help,
    Quit,
}

impl Command {
    /// Parse an input line: a one letter command or its full name.
    fn parse(line: &str) -> Option<Self> {
        let word: String = line.split_whitespace().next()?.to_ascii_lowercase();
        match word.as_str() {
            "w" | "up" => Some(Command::Move(Direction::Up)),
            "a" | "left" => Some(Command::Move(Direction::Left)),
            "s" | "down" => Some(Command::Move(Direction::Down)),
            "d" | "right" => Some(Command::Move(Direction::Right)),
            "t" | "true" => Some(Command::Answer(true)),
            "f" | "false" => Some(Command::Answer(false)),
            "h" | "hint" => Some(Command::Hint),
            "n" | "next" => Some(Command::NextLevel),
            "?" | "help" => Some(Command::Help),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Terminal session.
pub struct Application {
    game: Game,
    hints: HintFetcher,

    /// Explanation being fetched for the current challenge.
    pending: Option<PendingHint>,
}

impl Application {
    /// Create an [`Application`] object.
    pub fn new(game: Game, hints: HintFetcher) -> Self {
        Self {
            game,
            hints,
            pending: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until the input is exhausted or the player quits.
    ///
    /// # Errors
    ///
    /// The method returns an error when reading or writing fails, or when a maze cannot be
    /// generated.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), Box<dyn Error>> {
        writeln!(output, "{HELP}")?;
        writeln!(output, "{}", draw::legend())?;
        self.show(output)?;

        for line in input.lines() {
            let line: String = line?;
            let Some(command) = Command::parse(&line) else {
                if !line.trim().is_empty() {
                    writeln!(output, "Unknown command: {}", line.trim())?;
                }
                continue;
            };
            debug!("Command: {command:?}");
            if command == Command::Quit {
                break;
            }
            self.apply(command, output)?;
            self.deliver_hint(output)?;
            self.show(output)?;
        }

        writeln!(
            output,
            "Final score: {} (level {}, {} wrong answers)",
            self.game.score(),
            self.game.level(),
            self.game.mistakes()
        )?;
        Ok(())
    }

    fn apply<W: Write>(&mut self, command: Command, output: &mut W) -> Result<(), Box<dyn Error>> {
        match command {
            Command::Move(direction) => match self.game.move_player(direction) {
                MoveOutcome::Blocked => writeln!(output, "You cannot go that way.")?,
                MoveOutcome::Moved(_) => (),
                MoveOutcome::Challenge(pos) => writeln!(output, "A gate blocks the way at {pos}.")?,
                MoveOutcome::LevelComplete => writeln!(
                    output,
                    "Level {} complete! Score: {}. Press n for the next level.",
                    self.game.level(),
                    self.game.score()
                )?,
            },
            Command::Answer(answer) => {
                self.cancel_hint();
                match self.game.answer(answer)? {
                    AnswerOutcome::NoChallenge => {
                        writeln!(output, "There is no question to answer.")?
                    }
                    AnswerOutcome::Opened(_) => writeln!(output, "Correct! The gate opens.")?,
                    AnswerOutcome::Regenerated => {
                        writeln!(output, "Wrong! The labyrinth shifts around you.")?
                    }
                }
            }
            Command::Hint => {
                let request: Option<PendingHint> =
                    self.game.current_question().map(|q| self.hints.request(q));
                match request {
                    Some(pending) => {
                        self.cancel_hint();
                        self.pending = Some(pending);
                    }
                    None => writeln!(output, "There is no question to explain.")?,
                }
            }
            Command::NextLevel => {
                if self.game.phase() == Phase::LevelComplete {
                    self.game.next_level()?;
                } else {
                    writeln!(output, "Reach the exit first.")?;
                }
            }
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => (),
        }
        Ok(())
    }

    /// Print the explanation if it has arrived.
    fn deliver_hint<W: Write>(&mut self, output: &mut W) -> Result<(), Box<dyn Error>> {
        match self.pending.as_ref().map(PendingHint::try_take) {
            Some(Some(text)) => {
                writeln!(output, "Hint:\n{text}")?;
                self.pending = None;
            }
            Some(None) => writeln!(output, "Asking the tutor...")?,
            None => (),
        }
        Ok(())
    }

    fn cancel_hint(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Draw the maze and the status line, followed by the question of a challenged gate.
    fn show<W: Write>(&self, output: &mut W) -> Result<(), Box<dyn Error>> {
        write!(
            output,
            "\n{}",
            draw::render(self.game.grid(), Some(self.game.player()))
        )?;
        writeln!(
            output,
            "Level {}  Score {}  Mistakes {}",
            self.game.level(),
            self.game.score(),
            self.game.mistakes()
        )?;
        if let Some(question) = self.game.current_question() {
            writeln!(output, "{}", question.prompt_text())?;
            writeln!(output, "{}", question.expression_display())?;
            writeln!(output, "True or false? (t/f, h for a hint)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::explanation::Language;
    use crate::generator::maze::MazeBuilder;
    use crate::generator::question::QuestionGenerator;
    use crate::hint::Unconfigured;
    use std::io::Cursor;
    use std::sync::Arc;

    fn small_game(seed: u64) -> Game {
        let builder = MazeBuilder::new(5, QuestionGenerator::default()).expect("builder");
        Game::new(builder, Some(seed)).expect("game")
    }

    fn play(game: Game, input: &str) -> (Application, String) {
        let hints = HintFetcher::new(Arc::new(Unconfigured), Language::English);
        let mut app = Application::new(game, hints);
        let mut output: Vec<u8> = Vec::new();
        app.run(Cursor::new(input), &mut output).expect("run");
        (app, String::from_utf8(output).expect("utf-8"))
    }

    /// Find a seed and a move from the start cell that lead to a gate.
    fn challenge() -> (u64, char) {
        for seed in 0..50 {
            for (direction, key) in [(Direction::Right, 'd'), (Direction::Down, 's')] {
                let mut game = small_game(seed);
                if let MoveOutcome::Challenge(_) = game.move_player(direction) {
                    return (seed, key);
                }
            }
        }
        panic!("No gate next to the start cell");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("w"), Some(Command::Move(Direction::Up)));
        assert_eq!(Command::parse("  D  "), Some(Command::Move(Direction::Right)));
        assert_eq!(Command::parse("true"), Some(Command::Answer(true)));
        assert_eq!(Command::parse("f"), Some(Command::Answer(false)));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("x"), None);
        assert_eq!(Command::parse("what"), None);
    }

    #[test]
    fn test_parse_help_and_hint() {
        assert_eq!(Command::parse("help"), Some(Command::Help));
        assert_eq!(Command::parse("?"), Some(Command::Help));
        assert_eq!(Command::parse("HINT"), Some(Command::Hint));
        assert_eq!(Command::parse("h"), Some(Command::Hint));

        let (_, out) = play(small_game(3), "help
");
        assert_eq!(out.matches(HELP).count(), 2);
        assert!(!out.contains("There is no question to explain."));
    }

    #[test]
    fn test_quit() {
        let (app, out) = play(small_game(1), "q\nd\n");
        assert!(out.contains("Level 1  Score 0  Mistakes 0"));
        assert!(out.contains("Final score: 0"));
        assert_eq!(app.game().player(), app.game().maze().start);
    }

    #[test]
    fn test_blocked_and_unknown() {
        let (_, out) = play(small_game(2), "w\nxyz\nh\nt\nn\n");
        assert!(out.contains("You cannot go that way."));
        assert!(out.contains("Unknown command: xyz"));
        assert!(out.contains("There is no question to explain."));
        assert!(out.contains("There is no question to answer."));
        assert!(out.contains("Reach the exit first."));
    }

    #[test]
    fn test_challenge_hint_and_answer() {
        let (seed, key) = challenge();
        let mut probe = small_game(seed);
        let direction = if key == 'd' { Direction::Right } else { Direction::Down };
        let MoveOutcome::Challenge(pos) = probe.move_player(direction) else {
            panic!("Expected a challenge");
        };
        let question = probe.current_question().expect("question").clone();
        let answer = if question.answer() { 't' } else { 'f' };

        let (app, out) = play(small_game(seed), &format!("{key}\nh\n{answer}\n"));
        assert!(out.contains("A gate blocks the way"));
        assert!(out.contains(question.expression_display()));
        assert!(out.contains(&format!("Hint:\n{}", question.explanation())));
        assert!(out.contains("Correct! The gate opens."));
        assert_eq!(app.game().player(), pos);
        assert_eq!(app.game().score(), crate::config::POINTS_PER_GATE);
    }

    #[test]
    fn test_wrong_answer() {
        let (seed, key) = challenge();
        let mut probe = small_game(seed);
        let direction = if key == 'd' { Direction::Right } else { Direction::Down };
        probe.move_player(direction);
        let wrong = if probe.current_question().expect("question").answer() {
            'f'
        } else {
            't'
        };

        let (app, out) = play(small_game(seed), &format!("{key}\n{wrong}\n"));
        assert!(out.contains("Wrong! The labyrinth shifts around you."));
        assert_eq!(app.game().mistakes(), 1);
        assert!(out.contains("Final score: 0 (level 1, 1 wrong answers)"));
    }
}
