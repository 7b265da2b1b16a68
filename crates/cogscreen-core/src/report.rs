//! Session report: every task result plus the composite, with text and JSON
//! renderings.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{TaskKind, TaskResult};

/// Everything one session produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique session identifier.
    pub id: Uuid,
    pub participant_id: String,
    /// When the first task started.
    pub started_at: DateTime<Utc>,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Results keyed by task, in session order, composite last.
    pub results: BTreeMap<TaskKind, TaskResult>,
}

impl SessionReport {
    pub fn get(&self, task: TaskKind) -> Option<&TaskResult> {
        self.results.get(&task)
    }

    pub fn composite(&self) -> Option<&TaskResult> {
        self.get(TaskKind::Composite)
    }

    /// Plain-text summary: each task's name, score, and metrics.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (task, result) in &self.results {
            out.push_str(&format!("{}\n", task.as_str().to_uppercase()));
            out.push_str(&format!("  Score: {}\n", format_value(result.score)));
            if let Some(max) = result.max_score {
                out.push_str(&format!("  Max score: {}\n", format_value(Some(max))));
            }
            for (name, value) in &result.metrics {
                out.push_str(&format!("  {name}: {}\n", format_value(*value)));
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("failed to parse report JSON")
    }
}

/// Render a score or metric: `-` when absent, whole numbers without
/// decimals, everything else to three places.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => format!("{v:.3}"),
    }
}
