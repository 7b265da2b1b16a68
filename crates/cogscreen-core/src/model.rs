//! Core data model types for cogscreen.
//!
//! Every task run produces exactly one [`TaskResult`]; the session keeps them
//! keyed by [`TaskKind`] until the report is rendered.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named metrics attached to a task result. `None` marks a metric that could
/// not be computed (e.g. no go trials to average).
pub type Metrics = BTreeMap<String, Option<f64>>;

/// Identifies which task produced a result.
///
/// Variant order is session order, so a `BTreeMap<TaskKind, _>` iterates the
/// way the session ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    #[serde(rename = "memory_immediate_recall")]
    ImmediateRecall,
    #[serde(rename = "memory_immediate_recognition")]
    ImmediateRecognition,
    #[serde(rename = "reaction_simple")]
    ReactionSimple,
    #[serde(rename = "reaction_go_nogo")]
    ReactionGoNoGo,
    #[serde(rename = "multidomain_screen")]
    Multidomain,
    #[serde(rename = "memory_delayed_recall")]
    DelayedRecall,
    Composite,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::ImmediateRecall => "memory_immediate_recall",
            TaskKind::ImmediateRecognition => "memory_immediate_recognition",
            TaskKind::ReactionSimple => "reaction_simple",
            TaskKind::ReactionGoNoGo => "reaction_go_nogo",
            TaskKind::Multidomain => "multidomain_screen",
            TaskKind::DelayedRecall => "memory_delayed_recall",
            TaskKind::Composite => "composite",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory_immediate_recall" => Ok(TaskKind::ImmediateRecall),
            "memory_immediate_recognition" => Ok(TaskKind::ImmediateRecognition),
            "reaction_simple" => Ok(TaskKind::ReactionSimple),
            "reaction_go_nogo" => Ok(TaskKind::ReactionGoNoGo),
            "multidomain_screen" => Ok(TaskKind::Multidomain),
            "memory_delayed_recall" => Ok(TaskKind::DelayedRecall),
            "composite" => Ok(TaskKind::Composite),
            other => Err(format!("unknown task: {other}")),
        }
    }
}

/// The outcome of one task run. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Which task produced this result.
    pub task: TaskKind,
    /// Free-text participant identifier.
    pub participant_id: String,
    /// Primary score. Direction depends on the task: reaction scores are
    /// milliseconds (lower is better), everything else is higher-is-better.
    pub score: Option<f64>,
    /// Best achievable score, when the task has one.
    pub max_score: Option<f64>,
    /// Named numeric metrics.
    #[serde(default)]
    pub metrics: Metrics,
    /// Task-specific detail (targets, answers, trials, config).
    #[serde(default)]
    pub raw: serde_json::Map<String, serde_json::Value>,
}

impl TaskResult {
    /// Look up a metric, flattening "absent" and "null" into `None`.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten()
    }
}

/// Stimulus shown on a reaction trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StimulusKind {
    Go,
    NoGo,
}

impl StimulusKind {
    /// The word flashed to the participant.
    pub fn label(&self) -> &'static str {
        match self {
            StimulusKind::Go => "GO",
            StimulusKind::NoGo => "NO",
        }
    }
}

/// One reaction trial, appended in order while the task runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    /// 1-based trial number.
    pub index: u32,
    pub stimulus: StimulusKind,
    pub foreperiod_seconds: f64,
    /// Stimulus-to-response time; always `None` on no-go trials.
    pub reaction_time_ms: Option<f64>,
    pub correct: bool,
}
