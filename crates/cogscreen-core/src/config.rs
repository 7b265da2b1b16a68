//! Task and session configuration.
//!
//! Each task receives its own immutable config value. Everything derives
//! serde with per-field defaults so a partial TOML file fills in the rest.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::composite::CompositeWeights;
use crate::error::CogError;
use crate::selection::DEFAULT_WORD_BANK;

/// Parameters for the immediate memory task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of target words to study.
    pub n_words: usize,
    /// How long the word list stays on screen.
    pub study_seconds: f64,
    /// Test with yes/no recognition instead of free recall.
    pub recognition: bool,
    /// Number of lure words mixed in for recognition.
    pub recognition_lures: usize,
    /// Seed for target/lure selection and shuffling. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Words to sample from. Must not contain duplicates.
    pub word_bank: Vec<String>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            n_words: 10,
            study_seconds: 10.0,
            recognition: false,
            recognition_lures: 10,
            seed: Some(0),
            word_bank: DEFAULT_WORD_BANK.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl MemoryConfig {
    pub fn validate(&self) -> Result<(), CogError> {
        if self.n_words > self.word_bank.len() {
            return Err(CogError::config(format!(
                "n_words ({}) exceeds word bank size ({})",
                self.n_words,
                self.word_bank.len()
            )));
        }
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.word_bank.iter().find(|w| !seen.insert(w.to_lowercase())) {
            return Err(CogError::config(format!("word bank contains duplicate '{dup}'")));
        }
        if self.recognition {
            let remaining = self.word_bank.len() - self.n_words;
            if self.recognition_lures > remaining {
                return Err(CogError::config(format!(
                    "recognition_lures ({}) exceeds words left after targets ({remaining})",
                    self.recognition_lures
                )));
            }
        }
        duration_secs("memory.study_seconds", self.study_seconds)
    }

    pub fn study_duration(&self) -> Duration {
        seconds(self.study_seconds)
    }
}

/// Parameters for the reaction-time task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    pub n_trials: u32,
    /// Lower bound of the foreperiod, in seconds.
    pub min_foreperiod: f64,
    /// Upper bound of the foreperiod, in seconds.
    pub max_foreperiod: f64,
    /// Mix in no-go trials.
    pub go_no_go: bool,
    /// Probability that a trial is no-go when `go_no_go` is set.
    pub no_go_rate: f64,
    /// How long a no-go stimulus stays up before the self-report prompt.
    pub no_go_window_seconds: f64,
    pub seed: Option<u64>,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            n_trials: 10,
            min_foreperiod: 0.8,
            max_foreperiod: 2.2,
            go_no_go: false,
            no_go_rate: 0.25,
            no_go_window_seconds: 1.2,
            seed: Some(0),
        }
    }
}

impl ReactionConfig {
    pub fn validate(&self) -> Result<(), CogError> {
        duration_secs("reaction.min_foreperiod", self.min_foreperiod)?;
        duration_secs("reaction.max_foreperiod", self.max_foreperiod)?;
        duration_secs("reaction.no_go_window_seconds", self.no_go_window_seconds)?;
        if self.min_foreperiod > self.max_foreperiod {
            return Err(CogError::config(format!(
                "min_foreperiod ({}) is greater than max_foreperiod ({})",
                self.min_foreperiod, self.max_foreperiod
            )));
        }
        if !(0.0..=1.0).contains(&self.no_go_rate) {
            return Err(CogError::config(format!(
                "no_go_rate ({}) must be between 0 and 1",
                self.no_go_rate
            )));
        }
        Ok(())
    }
}

/// Parameters for the multi-domain screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiDomainConfig {
    pub serial_start: i64,
    pub serial_step: i64,
    /// Number of subtraction steps asked.
    pub serial_n: u32,
    pub digit_span_len: u32,
    /// How long the digit string is shown.
    pub digit_display_seconds: f64,
    /// Number/letter pairs in the alternating sequence (at most 26).
    pub sequence_pairs: u32,
    pub seed: Option<u64>,
}

impl Default for MultiDomainConfig {
    fn default() -> Self {
        Self {
            serial_start: 100,
            serial_step: 7,
            serial_n: 5,
            digit_span_len: 6,
            digit_display_seconds: 3.0,
            sequence_pairs: 6,
            seed: None,
        }
    }
}

impl MultiDomainConfig {
    pub fn validate(&self) -> Result<(), CogError> {
        if self.sequence_pairs > 26 {
            return Err(CogError::config(format!(
                "sequence_pairs ({}) exceeds the 26 available letters",
                self.sequence_pairs
            )));
        }
        duration_secs("multidomain.digit_display_seconds", self.digit_display_seconds)
    }
}

/// Full configuration for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub memory: MemoryConfig,
    pub reaction: ReactionConfig,
    pub multidomain: MultiDomainConfig,
    pub composite: CompositeWeights,
}

impl SessionConfig {
    /// Load a session configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Parse a TOML string (missing sections fall back to defaults).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SessionConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Render as TOML, e.g. for a starter config file.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }

    /// Force every task onto the same seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.memory.seed = Some(seed);
        self.reaction.seed = Some(seed);
        self.multidomain.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), CogError> {
        self.memory.validate()?;
        self.reaction.validate()?;
        self.multidomain.validate()?;
        self.composite.validate()
    }
}

/// A duration field must be a finite, non-negative number of seconds that
/// fits in a `Duration`.
fn duration_secs(name: &str, value: f64) -> Result<(), CogError> {
    Duration::try_from_secs_f64(value).map(|_| ()).map_err(|_| {
        CogError::config(format!(
            "{name} must be a non-negative number of seconds that fits in a duration, got {value}"
        ))
    })
}

/// Convert validated seconds into a `Duration`, clamping anything odd to zero.
pub(crate) fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::ZERO)
}
