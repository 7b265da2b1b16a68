//! Interactive tasks.
//!
//! Each task validates its config, talks to the participant through a
//! [`Console`](crate::traits::Console), times stimuli with a
//! [`Pacer`](crate::traits::Pacer), and hands the answers to a pure scorer.
//! Randomness comes in as an explicit `StdRng`.

pub mod delayed_recall;
pub mod memory;
pub mod multidomain;
pub mod reaction;

use serde_json::json;
use tokio::time::Instant;

use crate::model::{Metrics, TaskKind, TaskResult};
use crate::scoring::RecallScore;
use crate::traits::Console;

pub use delayed_recall::run_delayed_recall;
pub use memory::{run_immediate_memory, MemoryOutcome};
pub use multidomain::run_multidomain;
pub use reaction::run_reaction;

/// Blank lines shown after a study display so the answer is not on screen.
const CLEAR_LINES: usize = 30;

/// Push the previous display off screen.
pub(crate) fn clear_screen(console: &dyn Console, lines: usize) {
    console.display(&"\n".repeat(lines.saturating_sub(1)));
}

pub(crate) fn elapsed_seconds(start: Instant) -> f64 {
    start.elapsed().as_secs_f64()
}

/// Build the result shared by immediate and delayed free recall.
pub(crate) fn recall_result(
    task: TaskKind,
    participant_id: &str,
    targets: &[String],
    score: RecallScore,
    elapsed: f64,
) -> TaskResult {
    let mut metrics = Metrics::new();
    metrics.insert("n_recalled".into(), Some(score.n_recalled as f64));
    metrics.insert("n_correct".into(), Some(score.correct.len() as f64));
    metrics.insert("n_intrusions".into(), Some(score.intrusions.len() as f64));
    metrics.insert("elapsed_seconds".into(), Some(elapsed));

    let mut raw = serde_json::Map::new();
    raw.insert("targets".into(), json!(targets));
    raw.insert("recalled".into(), json!(score.recalled));
    raw.insert("correct".into(), json!(score.correct));
    raw.insert("intrusions".into(), json!(score.intrusions));

    TaskResult {
        task,
        participant_id: participant_id.to_string(),
        score: Some(score.score() as f64),
        max_score: Some(score.max_score as f64),
        metrics,
        raw,
    }
}
