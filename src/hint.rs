/*
hint.rs

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

//! Fetch explanations for the logic questions.
//!
//! Every generated question already carries its explanation, which [`HintFetcher::request`]
//! returns immediately.
//! For questions without one, the fetcher asks an [`ExplanationSource`] in a background thread
//! and delivers the text through an [`async_channel`] channel.
//! The request never blocks the game: the player can keep answering, and the
//! [`PendingHint`] object can be polled, waited on, or cancelled.
//! Failures are replaced by a fallback text.

use log::{debug, warn};
use std::env;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use async_channel::{Receiver, Sender};

use crate::config::HINT_COMMAND_ENV;
use crate::generator::explanation::Language;
use crate::generator::question::{Assignment, LogicQuestion};

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum HintError {
    /// No explanation service is configured.
    MissingCredential,

    /// The explanation service failed.
    Transport(String),

    /// The explanation service returned nothing.
    Empty,
}

impl HintError {
    /// Text to show instead of the explanation.
    pub fn fallback(&self) -> &'static str {
        match self {
            HintError::MissingCredential => {
                "API key not configured. Unable to fetch an explanation. \
                 (Tip: T -> F is False, everything else for implies is True!)"
            }
            HintError::Transport(_) => "Error connecting to the tutor. Please try again.",
            HintError::Empty => "No explanation available.",
        }
    }
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HintError::MissingCredential => write!(f, "no explanation service configured"),
            HintError::Transport(msg) => write!(f, "explanation service error: {msg}"),
            HintError::Empty => write!(f, "empty explanation"),
        }
    }
}

impl Error for HintError {}

/// Question details sent to an [`ExplanationSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct HintRequest {
    pub assignment: Assignment,
    pub expression: String,
    pub answer: bool,
    pub language: Language,
}

impl HintRequest {
    /// Create a [`HintRequest`] object for the given question.
    pub fn new(question: &LogicQuestion, language: Language) -> Self {
        Self {
            assignment: *question.variable_assignment(),
            expression: question.expression_display().to_string(),
            answer: question.answer(),
            language,
        }
    }

    /// Text of the request for a tutor.
    pub fn prompt(&self) -> String {
        let variables: String =
            serde_json::to_string(&self.assignment).unwrap_or_else(|_| String::from("{}"));
        let language: &str = match self.language {
            Language::English => "English",
            Language::Thai => "Thai",
        };
        let value: &str = if self.answer { "True" } else { "False" };
        format!(
            "Explain briefly in {language} why the following mathematical logic statement is \
             {value}.\nVariables: {variables}\nExpression: {}\n\
             Keep it simple and educational for a student.",
            self.expression
        )
    }
}

/// Service that explains a question.
pub trait ExplanationSource: Send + Sync {
    /// Return the explanation for the request.
    ///
    /// # Errors
    ///
    /// The method returns an error when the service cannot answer.
    fn explain(&self, request: &HintRequest) -> Result<String, HintError>;
}

/// Source used when no service is configured.
pub struct Unconfigured;

impl ExplanationSource for Unconfigured {
    fn explain(&self, _request: &HintRequest) -> Result<String, HintError> {
        Err(HintError::MissingCredential)
    }
}

/// Source that runs an external program.
///
/// The prompt is written to the program's standard input, and the explanation is read from its
/// standard output.
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    /// Create a [`CommandSource`] object.
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Create a [`CommandSource`] object from the command line in the
    /// `LOGIC_LABYRINTH_HINT_COMMAND` environment variable.
    ///
    /// Return None when the variable is not set or empty.
    pub fn from_env() -> Option<Self> {
        let command_line: String = env::var(HINT_COMMAND_ENV).ok()?;
        let mut words = command_line.split_whitespace();
        let program: &str = words.next()?;
        Some(Self {
            program: program.to_string(),
            args: words.map(String::from).collect(),
        })
    }
}

impl ExplanationSource for CommandSource {
    fn explain(&self, request: &HintRequest) -> Result<String, HintError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| HintError::Transport(format!("{}: {e}", self.program)))?;

        // Programs may exit without reading their input: their output still counts
        let mut write_error: Option<io::Error> = None;
        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(request.prompt().as_bytes())
        {
            if e.kind() == io::ErrorKind::BrokenPipe {
                debug!("{} did not read the prompt", self.program);
            } else {
                write_error = Some(e);
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| HintError::Transport(e.to_string()))?;
        if let Some(e) = write_error {
            return Err(HintError::Transport(e.to_string()));
        }
        if !output.status.success() {
            return Err(HintError::Transport(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        let text: String = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(HintError::Empty);
        }
        Ok(text)
    }
}

/// Explanation that is being fetched.
pub struct PendingHint {
    receiver: Receiver<String>,
    cancelled: Arc<AtomicBool>,
}

impl PendingHint {
    /// Create a [`PendingHint`] object that is already resolved.
    fn ready(text: String) -> Self {
        let (sender, receiver) = async_channel::bounded::<String>(1);
        let _ = sender.try_send(text);
        Self {
            receiver,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Return the explanation if it has arrived.
    pub fn try_take(&self) -> Option<String> {
        self.receiver.try_recv().ok()
    }

    /// Block until the explanation arrives.
    ///
    /// Return the fallback text if the request was cancelled.
    pub fn wait(self) -> String {
        self.receiver
            .recv_blocking()
            .unwrap_or_else(|_| HintError::Empty.fallback().to_string())
    }

    /// Abandon the request. The background thread finishes on its own.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.receiver.close();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Fetch explanations.
#[derive(Clone)]
pub struct HintFetcher {
    source: Arc<dyn ExplanationSource>,
    language: Language,
}

impl HintFetcher {
    /// Create a [`HintFetcher`] object.
    pub fn new(source: Arc<dyn ExplanationSource>, language: Language) -> Self {
        Self { source, language }
    }

    /// Create a [`HintFetcher`] object that uses the program configured in the environment, if
    /// any.
    pub fn from_env(language: Language) -> Self {
        match CommandSource::from_env() {
            Some(source) => {
                debug!("Hint command: {} {:?}", source.program, source.args);
                Self::new(Arc::new(source), language)
            }
            None => Self::new(Arc::new(Unconfigured), language),
        }
    }

    /// Request the explanation of a question.
    ///
    /// The explanation built with the question is returned without calling the source.
    pub fn request(&self, question: &LogicQuestion) -> PendingHint {
        if !question.explanation().is_empty() {
            return PendingHint::ready(question.explanation().to_string());
        }
        self.request_remote(HintRequest::new(question, self.language))
    }

    /// Ask the source in a background thread.
    pub fn request_remote(&self, request: HintRequest) -> PendingHint {
        let (sender, receiver): (Sender<String>, Receiver<String>) = async_channel::bounded(1);
        let cancelled: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
        let source: Arc<dyn ExplanationSource> = Arc::clone(&self.source);
        let flag: Arc<AtomicBool> = Arc::clone(&cancelled);

        thread::spawn(move || {
            let text: String = match source.explain(&request) {
                Ok(t) if !t.trim().is_empty() => t,
                Ok(_) => HintError::Empty.fallback().to_string(),
                Err(error) => {
                    warn!("Cannot fetch the explanation of {}: {error}", request.expression);
                    error.fallback().to_string()
                }
            };
            if flag.load(Ordering::Relaxed) {
                debug!("Hint request for {} cancelled", request.expression);
                return;
            }
            // The receiver is gone when the request was abandoned
            let _ = sender.send_blocking(text);
        });

        PendingHint {
            receiver,
            cancelled,
        }
    }
}
