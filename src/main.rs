/*
main.rs

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

use std::io;
use std::process::ExitCode;

use logic_labyrinth::application::Application;
use logic_labyrinth::cli_options::{self, Action, PlayOptions};
use logic_labyrinth::game::Game;
use logic_labyrinth::generator::maze::MazeBuilder;
use logic_labyrinth::generator::question::QuestionGenerator;
use logic_labyrinth::hint::HintFetcher;

fn main() -> ExitCode {
    let options: PlayOptions = match cli_options::parse() {
        Action::Exit(ret) => return ExitCode::from(ret),
        Action::Play(options) => options,
    };

    let builder: MazeBuilder =
        match MazeBuilder::new(options.size, QuestionGenerator::new(options.language)) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        };
    let mut game: Game = match Game::new(builder, options.seed) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };
    if options.level > 1
        && let Err(e) = game.start_level(options.level)
    {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    let mut app: Application = Application::new(game, HintFetcher::from_env(options.language));
    let stdin = io::stdin();
    match app.run(stdin.lock(), &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
