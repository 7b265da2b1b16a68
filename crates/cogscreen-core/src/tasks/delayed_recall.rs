//! Delayed free recall of the words studied in the immediate memory task.
//!
//! The delay itself is whatever ran in between; this task only asks.

use anyhow::Result;
use tokio::time::Instant;

use super::{elapsed_seconds, recall_result};
use crate::model::{TaskKind, TaskResult};
use crate::scoring::score_recall;
use crate::traits::Console;

/// Ask for the earlier word list again and score it against `targets`.
pub async fn run_delayed_recall(
    participant_id: &str,
    targets: &[String],
    console: &dyn Console,
) -> Result<TaskResult> {
    let start = Instant::now();
    tracing::info!(participant_id, n_targets = targets.len(), "starting delayed recall task");

    console.display("\n=== Delayed Recall Task ===");
    console.display("Earlier, you saw a list of words. Now recall as many as you can.");
    let typed = console.read_line("Your recall: ").await?;

    let score = score_recall(targets, &typed);
    tracing::info!(correct = score.score(), "delayed recall task complete");

    Ok(recall_result(
        TaskKind::DelayedRecall,
        participant_id,
        targets,
        score,
        elapsed_seconds(start),
    ))
}
