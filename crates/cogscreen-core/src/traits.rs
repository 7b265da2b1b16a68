//! Collaborator traits the tasks use to talk to the participant.
//!
//! Tasks never touch stdin, stdout, or the system clock directly, so a test can
//! script the participant and skip every pause.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

use crate::error::CogError;

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Line-oriented participant I/O.
#[async_trait]
pub trait Console: Send + Sync {
    /// Show one line of text.
    fn display(&self, line: &str);

    /// Show `prompt` and wait for one line of input, without its line ending.
    ///
    /// End of input reads as an empty line.
    async fn read_line(&self, prompt: &str) -> Result<String, CogError>;
}

/// Console backed by the process's stdin, showing text on stdout or stderr.
pub struct StdConsole {
    stdin: tokio::sync::Mutex<BufReader<Stdin>>,
    to_stderr: bool,
}

impl StdConsole {
    /// Prompts and task text on stdout.
    pub fn new() -> Self {
        Self {
            stdin: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin())),
            to_stderr: false,
        }
    }

    /// Prompts and task text on stderr, leaving stdout for machine-readable output.
    pub fn on_stderr() -> Self {
        Self {
            to_stderr: true,
            ..Self::new()
        }
    }

    fn write_prompt(&self, prompt: &str) -> std::io::Result<()> {
        use std::io::Write;

        if self.to_stderr {
            let mut err = std::io::stderr().lock();
            write!(err, "{prompt}")?;
            err.flush()
        } else {
            let mut out = std::io::stdout().lock();
            write!(out, "{prompt}")?;
            out.flush()
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    fn display(&self, line: &str) {
        if self.to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    async fn read_line(&self, prompt: &str) -> Result<String, CogError> {
        self.write_prompt(prompt)
            .map_err(|e| CogError::Input(e.to_string()))?;

        let mut line = String::new();
        let mut stdin = self.stdin.lock().await;
        let read = stdin
            .read_line(&mut line)
            .await
            .map_err(|e| CogError::Input(e.to_string()))?;
        if read == 0 {
            tracing::debug!("stdin closed, treating as empty answer");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Console that replays canned answers and records everything shown.
///
/// Once the script runs out every further read returns an empty line.
pub struct ScriptedConsole {
    answers: Mutex<VecDeque<String>>,
    transcript: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            transcript: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Lines passed to [`Console::display`], in order.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Prompts passed to [`Console::read_line`], in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn display(&self, line: &str) {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }

    async fn read_line(&self, prompt: &str) -> Result<String, CogError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Pacer
// ---------------------------------------------------------------------------

/// Blocking pauses for timed stimulus presentation.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real wall-clock pauses.
pub struct SleepPacer;

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately. For tests and `--no-pause` runs.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self, _: Duration) {}
}
