//! Free-recall scoring, shared by immediate and delayed recall.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::text::normalize_tokens;

/// Outcome of comparing a recall response against the studied targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallScore {
    /// Normalized tokens in typed order, duplicates kept.
    pub recalled: Vec<String>,
    /// Recalled words that were targets, sorted.
    pub correct: Vec<String>,
    /// Recalled words that were not targets, sorted.
    pub intrusions: Vec<String>,
    /// Number of distinct recalled tokens.
    pub n_recalled: usize,
    /// Number of distinct targets.
    pub max_score: usize,
}

impl RecallScore {
    pub fn score(&self) -> usize {
        self.correct.len()
    }
}

/// Score a free-text recall response.
///
/// Matching is exact on normalized tokens: case and edge punctuation are
/// ignored, near-misses earn nothing, and a word typed twice counts once.
pub fn score_recall(targets: &[String], recalled_text: &str) -> RecallScore {
    let recalled = normalize_tokens(recalled_text);

    let target_set: BTreeSet<String> = targets.iter().map(|t| t.to_lowercase()).collect();
    let recalled_set: BTreeSet<String> = recalled.iter().cloned().collect();

    let correct: Vec<String> = target_set.intersection(&recalled_set).cloned().collect();
    let intrusions: Vec<String> = recalled_set.difference(&target_set).cloned().collect();

    RecallScore {
        n_recalled: recalled_set.len(),
        max_score: target_set.len(),
        recalled,
        correct,
        intrusions,
    }
}
