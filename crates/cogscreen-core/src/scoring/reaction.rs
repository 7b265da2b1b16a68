//! Aggregate metrics over reaction trials.

use serde::{Deserialize, Serialize};

use crate::composite::conversions::speed_from_rt_ms;
use crate::model::{StimulusKind, Trial};

/// Summary of one reaction run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReactionSummary {
    /// Mean reaction time over go trials with a measured time.
    pub avg_rt_ms: Option<f64>,
    /// `1000 / avg_rt_ms`; higher is better.
    pub speed_score: Option<f64>,
    /// Correct trials over all trials, no-go included.
    pub accuracy: Option<f64>,
    pub n_go_trials: usize,
    pub n_trials: usize,
}

/// Reduce a trial log to its summary metrics.
///
/// No-go trials never contribute a reaction time. With no timed go trials the
/// average and speed are `None`; with no trials at all, so is accuracy.
pub fn summarize_trials(trials: &[Trial]) -> ReactionSummary {
    let go_rts: Vec<f64> = trials
        .iter()
        .filter(|t| t.stimulus == StimulusKind::Go)
        .filter_map(|t| t.reaction_time_ms)
        .collect();

    let avg_rt_ms = if go_rts.is_empty() {
        None
    } else {
        Some(go_rts.iter().sum::<f64>() / go_rts.len() as f64)
    };

    let accuracy = if trials.is_empty() {
        None
    } else {
        Some(trials.iter().filter(|t| t.correct).count() as f64 / trials.len() as f64)
    };

    ReactionSummary {
        avg_rt_ms,
        speed_score: avg_rt_ms.and_then(speed_from_rt_ms),
        accuracy,
        n_go_trials: go_rts.len(),
        n_trials: trials.len(),
    }
}
