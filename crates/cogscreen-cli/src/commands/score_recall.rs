//! The `cogscreen score-recall` command.

use anyhow::Result;

use cogscreen_core::scoring::score_recall;

pub fn execute(targets: &str, recalled: &str) -> Result<()> {
    let targets: Vec<String> = targets
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    anyhow::ensure!(!targets.is_empty(), "at least one target word is required");

    let score = score_recall(&targets, recalled);
    let output = serde_json::json!({
        "score": score.score(),
        "max_score": score.max_score,
        "correct": score.correct,
        "intrusions": score.intrusions,
        "n_recalled": score.n_recalled,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
