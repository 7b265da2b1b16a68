//! Immediate memory: study a word list, then free recall or yes/no recognition.

use std::collections::HashMap;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde_json::json;
use tokio::time::Instant;

use super::{clear_screen, elapsed_seconds, recall_result, CLEAR_LINES};
use crate::config::MemoryConfig;
use crate::model::{Metrics, TaskKind, TaskResult};
use crate::scoring::recognition::is_yes;
use crate::scoring::{score_recall, score_recognition};
use crate::selection::{choose_lures, choose_words};
use crate::traits::{Console, Pacer};

/// Result of the immediate memory task plus the studied words, which the
/// delayed recall task needs later.
#[derive(Debug, Clone)]
pub struct MemoryOutcome {
    pub result: TaskResult,
    pub targets: Vec<String>,
}

/// Run the immediate memory task.
///
/// Fails with `InvalidConfiguration` before showing anything if the config is
/// inconsistent.
pub async fn run_immediate_memory(
    participant_id: &str,
    config: &MemoryConfig,
    rng: &mut StdRng,
    console: &dyn Console,
    pacer: &dyn Pacer,
) -> Result<MemoryOutcome> {
    config.validate()?;
    let targets = choose_words(&config.word_bank, config.n_words, rng)?;
    let start = Instant::now();
    tracing::info!(
        participant_id,
        n_words = config.n_words,
        recognition = config.recognition,
        "starting immediate memory task"
    );

    console.display("\n=== Immediate Memory Task ===");
    console.display(&format!(
        "You will see {} words. Try to remember them.",
        config.n_words
    ));
    console.display("Words:");
    console.display(&format!("  {}", targets.join("  ")));
    console.display(&format!("\nStudy time: {} seconds...", config.study_seconds));
    pacer.pause(config.study_duration()).await;
    clear_screen(console, CLEAR_LINES);

    let result = if config.recognition {
        recognition(participant_id, config, &targets, rng, console, start).await?
    } else {
        console.display(
            "Recall as many words as you can. Type them separated by spaces or commas.",
        );
        let typed = console.read_line("Your recall: ").await?;
        let score = score_recall(&targets, &typed);
        tracing::debug!(
            correct = score.score(),
            intrusions = score.intrusions.len(),
            "immediate recall scored"
        );
        let mut result = recall_result(
            TaskKind::ImmediateRecall,
            participant_id,
            &targets,
            score,
            elapsed_seconds(start),
        );
        result.raw.insert("config".into(), config_json(config));
        result
    };

    tracing::info!(score = ?result.score, "immediate memory task complete");
    Ok(MemoryOutcome { result, targets })
}

async fn recognition(
    participant_id: &str,
    config: &MemoryConfig,
    targets: &[String],
    rng: &mut StdRng,
    console: &dyn Console,
    start: Instant,
) -> Result<TaskResult> {
    let lures = choose_lures(&config.word_bank, targets, config.recognition_lures, rng)?;
    let mut options: Vec<String> = targets.iter().chain(&lures).cloned().collect();
    options.shuffle(rng);

    console.display("Recognition test: For each word, type Y if it was shown, else N.");
    let mut responses = HashMap::new();
    for word in &options {
        let answer = console.read_line(&format!("Was '{word}' shown? (Y/N): ")).await?;
        responses.insert(word.clone(), is_yes(&answer));
    }

    let score = score_recognition(targets, &lures, &responses);
    tracing::debug!(hits = score.hits, false_alarms = score.false_alarms, "recognition scored");

    let mut metrics = Metrics::new();
    metrics.insert("hits".into(), Some(score.hits as f64));
    metrics.insert("false_alarms".into(), Some(score.false_alarms as f64));
    metrics.insert("elapsed_seconds".into(), Some(elapsed_seconds(start)));

    let mut raw = serde_json::Map::new();
    raw.insert("targets".into(), json!(targets));
    raw.insert("lures".into(), json!(lures));
    raw.insert("presented".into(), json!(options));
    raw.insert("responses".into(), json!(responses));
    raw.insert("config".into(), config_json(config));

    Ok(TaskResult {
        task: TaskKind::ImmediateRecognition,
        participant_id: participant_id.to_string(),
        score: Some(score.corrected as f64),
        max_score: Some(score.max_score as f64),
        metrics,
        raw,
    })
}

fn config_json(config: &MemoryConfig) -> serde_json::Value {
    json!({
        "n_words": config.n_words,
        "study_seconds": config.study_seconds,
        "recognition": config.recognition,
        "recognition_lures": config.recognition_lures,
        "seed": config.seed,
        "word_bank_size": config.word_bank.len(),
    })
}
