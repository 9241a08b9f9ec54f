/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! The generators never own any game state. The [`Game`] object keeps the level, the score,
//! the player position, and the current maze, and moves between the phases of a
//! [`Phase`] state machine:
//!
//! ```text
//! Idle --(walk into a locked gate)--> GateChallenge --(answer)--> Resolved --(move)--> ...
//!   \--(walk onto the end cell)--> LevelComplete --(next level)--> Idle
//! ```

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{POINTS_LEVEL_COMPLETE, POINTS_PER_GATE};
use crate::generator::grid::{CellKind, Direction, Grid, Position};
use crate::generator::maze::{Maze, MazeBuilder, MazeError};
use crate::generator::question::LogicQuestion;

/// Phase of the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The player can move.
    Idle,

    /// The player bumped into the locked gate at the given position and must answer its
    /// question.
    GateChallenge(Position),

    /// The last question was answered, correctly or not. The player can move.
    Resolved(bool),

    /// The player reached the end cell.
    LevelComplete,
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wall, border, or the game does not accept moves in its current phase.
    Blocked,

    /// The player moved to the given position.
    Moved(Position),

    /// A locked gate stands at the given position. Its question must be answered.
    Challenge(Position),

    /// The player reached the end cell.
    LevelComplete,
}

/// Result of an answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No gate challenge in progress.
    NoChallenge,

    /// Correct answer: the gate is open and the player stands on it.
    Opened(Position),

    /// Wrong answer: the maze has been regenerated around the player.
    Regenerated,
}

/// Manage the status of the game in progress.
pub struct Game {
    /// Maze generator.
    builder: MazeBuilder,

    /// Random number generator used for every maze of the game.
    rng: StdRng,

    /// Current level, starting at 1.
    level: u32,

    score: u64,

    /// Current maze.
    maze: Maze,

    player: Position,

    phase: Phase,

    /// Number of wrong answers in the game.
    mistakes: usize,
}

impl Game {
    /// Create a [`Game`] object and generate the first level.
    ///
    /// When `seed` is provided, the game is reproducible.
    pub fn new(builder: MazeBuilder, seed: Option<u64>) -> Result<Self, MazeError> {
        let mut rng: StdRng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let maze: Maze = builder.generate(1, None, &mut rng)?;
        let player: Position = maze.start;
        Ok(Self {
            builder,
            rng,
            level: 1,
            score: 0,
            maze,
            player,
            phase: Phase::Idle,
            mistakes: 0,
        })
    }

    /// Start the given level. The score is kept.
    pub fn start_level(&mut self, level: u32) -> Result<(), MazeError> {
        let level: u32 = level.max(1);
        debug!("Starting level {level}");
        self.maze = self.builder.generate(level, None, &mut self.rng)?;
        self.level = level;
        self.player = self.maze.start;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Start the next level after the current one is complete.
    pub fn next_level(&mut self) -> Result<(), MazeError> {
        self.start_level(self.level + 1)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.maze.grid
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Question of the gate being challenged.
    pub fn current_question(&self) -> Option<&LogicQuestion> {
        match self.phase {
            Phase::GateChallenge(pos) => self.maze.grid.get(pos).and_then(|c| c.question()),
            _ => None,
        }
    }

    /// Whether the player can move in the current phase.
    fn accepts_moves(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Resolved(_))
    }

    /// Try to move the player one cell in the given direction.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if !self.accepts_moves() {
            return MoveOutcome::Blocked;
        }
        let (dx, dy) = direction.delta();
        let Some(target) = self.player.offset(dx, dy) else {
            return MoveOutcome::Blocked;
        };
        let Some(cell) = self.maze.grid.get_mut(target) else {
            return MoveOutcome::Blocked;
        };

        match cell.kind() {
            CellKind::Wall => MoveOutcome::Blocked,
            CellKind::Gate { open: false } => {
                debug!("Gate challenge at {target}");
                self.phase = Phase::GateChallenge(target);
                MoveOutcome::Challenge(target)
            }
            CellKind::End => {
                let bonus: u64 = POINTS_LEVEL_COMPLETE * u64::from(self.level);
                self.score += bonus;
                self.phase = Phase::LevelComplete;
                debug!("Level {} complete: +{bonus} points", self.level);
                MoveOutcome::LevelComplete
            }
            _ => {
                cell.mark_visited();
                self.player = target;
                self.phase = Phase::Idle;
                MoveOutcome::Moved(target)
            }
        }
    }

    /// Answer the question of the gate being challenged.
    ///
    /// A correct answer opens the gate and moves the player onto it. A wrong answer regenerates
    /// the maze at the same level, keeping the player's position open.
    pub fn answer(&mut self, answer: bool) -> Result<AnswerOutcome, MazeError> {
        let Phase::GateChallenge(pos) = self.phase else {
            return Ok(AnswerOutcome::NoChallenge);
        };
        let correct: bool = self
            .maze
            .grid
            .get(pos)
            .and_then(|c| c.question())
            .is_some_and(|q| q.is_correct(answer));

        if correct {
            if let Some(cell) = self.maze.grid.get_mut(pos) {
                cell.open_gate();
                cell.mark_visited();
            }
            self.player = pos;
            self.score += POINTS_PER_GATE;
            self.phase = Phase::Resolved(true);
            debug!("Gate {pos} opened: score = {}", self.score);
            return Ok(AnswerOutcome::Opened(pos));
        }

        self.mistakes += 1;
        debug!("Wrong answer for gate {pos}: regenerating the maze");
        self.maze = self
            .builder
            .generate(self.level, Some(self.player), &mut self.rng)?;
        self.phase = Phase::Resolved(false);
        Ok(AnswerOutcome::Regenerated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::question::QuestionGenerator;

    fn game(seed: u64) -> Game {
        Game::new(MazeBuilder::default(), Some(seed)).expect("game")
    }

    /// Direction of a locked gate next to the player, if any.
    fn find_gate_next_to_player(game: &Game) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| {
            let (dx, dy) = d.delta();
            game.player()
                .offset(dx, dy)
                .and_then(|p| game.grid().get(p))
                .is_some_and(|c| c.is_locked_gate())
        })
    }

    /// Put a locked gate right next to the player and return the direction to it.
    fn place_gate(game: &mut Game) -> Direction {
        if let Some(d) = find_gate_next_to_player(game) {
            return d;
        }
        let player = game.player();
        let direction = Direction::ALL
            .into_iter()
            .find(|d| {
                let (dx, dy) = d.delta();
                player
                    .offset(dx, dy)
                    .is_some_and(|p| game.grid().kind(p) == CellKind::Path)
            })
            .expect("open neighbor");
        let (dx, dy) = direction.delta();
        let pos = player.offset(dx, dy).expect("position");
        let question = QuestionGenerator::default().generate(1, &mut game.rng);
        if let Some(cell) = game.maze.grid.get_mut(pos) {
            cell.lock(question);
        }
        direction
    }

    #[test]
    fn test_new_game() {
        let g = game(1);
        assert_eq!(g.level(), 1);
        assert_eq!(g.score(), 0);
        assert_eq!(g.player(), Position::new(1, 1));
        assert_eq!(g.phase(), Phase::Idle);
        assert!(g.current_question().is_none());
    }

    #[test]
    fn test_walls_block() {
        let mut g = game(2);
        // The start cell is in the corner: up and left are border walls
        assert_eq!(g.move_player(Direction::Up), MoveOutcome::Blocked);
        assert_eq!(g.move_player(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(g.player(), Position::new(1, 1));
    }

    #[test]
    fn test_gate_challenge_and_correct_answer() {
        let mut g = game(3);
        let direction = place_gate(&mut g);
        let outcome = g.move_player(direction);
        let MoveOutcome::Challenge(pos) = outcome else {
            panic!("Expected a challenge, got {outcome:?}");
        };
        assert_eq!(g.phase(), Phase::GateChallenge(pos));
        // No moves during the challenge
        assert_eq!(g.move_player(Direction::Down), MoveOutcome::Blocked);

        let answer = g.current_question().expect("question").answer();
        assert_eq!(g.answer(answer), Ok(AnswerOutcome::Opened(pos)));
        assert_eq!(g.player(), pos);
        assert_eq!(g.score(), POINTS_PER_GATE);
        assert_eq!(g.phase(), Phase::Resolved(true));
        let cell = g.grid().get(pos).expect("cell");
        assert_eq!(cell.is_open(), Some(true));
        assert!(cell.question().is_none());
        assert!(cell.is_walkable());
    }

    #[test]
    fn test_wrong_answer_regenerates() {
        let mut g = game(4);
        let direction = place_gate(&mut g);
        let player = g.player();
        let MoveOutcome::Challenge(_) = g.move_player(direction) else {
            panic!("Expected a challenge");
        };
        let answer = g.current_question().expect("question").answer();
        assert_eq!(g.answer(!answer), Ok(AnswerOutcome::Regenerated));
        assert_eq!(g.phase(), Phase::Resolved(false));
        assert_eq!(g.score(), 0);
        assert_eq!(g.mistakes(), 1);
        assert_eq!(g.player(), player);
        assert_ne!(g.grid().kind(player), CellKind::Wall);
        assert_eq!(g.grid().count(CellKind::Start), 1);
        // Moving is allowed again
        assert!(g.current_question().is_none());
    }

    #[test]
    fn test_answer_without_challenge() {
        let mut g = game(5);
        assert_eq!(g.answer(true), Ok(AnswerOutcome::NoChallenge));
    }

    #[test]
    fn test_level_complete() {
        let mut g = game(6);
        // Stand next to the end cell
        let end = g.maze().end;
        let neighbor = g
            .grid()
            .neighbors(end)
            .find(|p| g.grid().kind(*p) != CellKind::Wall)
            .expect("neighbor");
        if let Some(cell) = g.maze.grid.get_mut(neighbor) {
            cell.set_kind(CellKind::Path);
        }
        g.player = neighbor;
        let direction = if neighbor.x < end.x {
            Direction::Right
        } else {
            Direction::Down
        };

        assert_eq!(g.move_player(direction), MoveOutcome::LevelComplete);
        assert_eq!(g.phase(), Phase::LevelComplete);
        assert_eq!(g.score(), POINTS_LEVEL_COMPLETE);
        assert_eq!(g.move_player(Direction::Up), MoveOutcome::Blocked);

        g.next_level().expect("next level");
        assert_eq!(g.level(), 2);
        assert_eq!(g.score(), POINTS_LEVEL_COMPLETE);
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.player(), g.maze().start);
    }

    #[test]
    fn test_move_marks_visited() {
        let mut g = game(7);
        for d in Direction::ALL {
            if let MoveOutcome::Moved(pos) = g.move_player(d) {
                assert!(g.grid().get(pos).is_some_and(|c| c.visited()));
                return;
            }
        }
    }

    #[test]
    fn test_seeded_games_match() {
        let a = game(8);
        let b = game(8);
        let kinds = |g: &Game| g.grid().cells().map(|c| c.kind()).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&b));
    }
}
