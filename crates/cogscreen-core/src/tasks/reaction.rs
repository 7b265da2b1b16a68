//! Reaction-time task, simple or go/no-go.
//!
//! Input is line-buffered, so a key pressed during a no-go stimulus cannot be
//! seen. After the no-go window closes the participant is asked whether they
//! pressed Enter, and that self-report decides the trial. Catching the press
//! itself would need raw terminal input.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::json;
use tokio::time::Instant;

use crate::config::{seconds, ReactionConfig};
use crate::model::{Metrics, StimulusKind, TaskKind, TaskResult, Trial};
use crate::scoring::recognition::is_yes;
use crate::scoring::summarize_trials;
use crate::traits::{Console, Pacer};

/// Where a single trial is in its life cycle.
#[derive(Debug)]
enum TrialState {
    /// Waiting out the foreperiod.
    AwaitStimulus,
    /// Stimulus on screen since `onset`.
    StimulusShown { onset: Instant },
    ResponseCollected(Trial),
}

/// Parameters drawn for one trial before it starts.
struct TrialPlan {
    index: u32,
    stimulus: StimulusKind,
    foreperiod_seconds: f64,
}

pub async fn run_reaction(
    participant_id: &str,
    config: &ReactionConfig,
    rng: &mut StdRng,
    console: &dyn Console,
    pacer: &dyn Pacer,
) -> Result<TaskResult> {
    config.validate()?;
    tracing::info!(
        participant_id,
        n_trials = config.n_trials,
        go_no_go = config.go_no_go,
        "starting reaction task"
    );

    console.display("\n=== Reaction Speed Task ===");
    if config.go_no_go {
        console.display("Rule: Press Enter ONLY when you see 'GO'. Do nothing on 'NO'.");
    } else {
        console.display("Rule: Press Enter as fast as possible when you see 'GO'.");
    }
    console.read_line("Press Enter to start...").await?;

    let mut trials = Vec::with_capacity(config.n_trials as usize);
    for i in 0..config.n_trials {
        let plan = plan_trial(i + 1, config, rng);
        let trial = run_trial(&plan, config, console, pacer).await?;
        tracing::debug!(
            index = trial.index,
            stimulus = ?trial.stimulus,
            rt_ms = ?trial.reaction_time_ms,
            correct = trial.correct,
            "trial complete"
        );
        trials.push(trial);
    }

    let summary = summarize_trials(&trials);
    tracing::info!(
        avg_rt_ms = ?summary.avg_rt_ms,
        accuracy = ?summary.accuracy,
        "reaction task complete"
    );

    let mut metrics = Metrics::new();
    metrics.insert("avg_rt_ms".into(), summary.avg_rt_ms);
    metrics.insert("speed_score".into(), summary.speed_score);
    metrics.insert("accuracy".into(), summary.accuracy);
    metrics.insert("n_go_trials".into(), Some(summary.n_go_trials as f64));
    metrics.insert("n_trials".into(), Some(summary.n_trials as f64));

    let mut raw = serde_json::Map::new();
    raw.insert("trials".into(), serde_json::to_value(&trials)?);
    raw.insert("config".into(), serde_json::to_value(config)?);

    Ok(TaskResult {
        task: if config.go_no_go {
            TaskKind::ReactionGoNoGo
        } else {
            TaskKind::ReactionSimple
        },
        participant_id: participant_id.to_string(),
        // Raw milliseconds, lower is better. Use `speed_score` for blending.
        score: summary.avg_rt_ms,
        max_score: None,
        metrics,
        raw,
    })
}

/// Draw the foreperiod first, then the stimulus kind.
fn plan_trial(index: u32, config: &ReactionConfig, rng: &mut StdRng) -> TrialPlan {
    let foreperiod_seconds = rng.gen_range(config.min_foreperiod..=config.max_foreperiod);
    let stimulus = if config.go_no_go && rng.gen::<f64>() <= config.no_go_rate {
        StimulusKind::NoGo
    } else {
        StimulusKind::Go
    };
    TrialPlan {
        index,
        stimulus,
        foreperiod_seconds,
    }
}

async fn run_trial(
    plan: &TrialPlan,
    config: &ReactionConfig,
    console: &dyn Console,
    pacer: &dyn Pacer,
) -> Result<Trial> {
    let mut state = TrialState::AwaitStimulus;
    loop {
        state = match state {
            TrialState::AwaitStimulus => {
                pacer.pause(seconds(plan.foreperiod_seconds)).await;
                console.display(&format!(
                    "\nTrial {}/{}: {}",
                    plan.index,
                    config.n_trials,
                    plan.stimulus.label()
                ));
                TrialState::StimulusShown {
                    onset: Instant::now(),
                }
            }
            TrialState::StimulusShown { onset } => {
                let (reaction_time_ms, correct) = match plan.stimulus {
                    StimulusKind::Go => {
                        console.read_line("Press Enter NOW!").await?;
                        (Some(onset.elapsed().as_secs_f64() * 1000.0), true)
                    }
                    StimulusKind::NoGo => {
                        console.display(&format!(
                            "(No-go) Wait {:.1}s... Do NOT press Enter.",
                            config.no_go_window_seconds
                        ));
                        pacer.pause(seconds(config.no_go_window_seconds)).await;
                        let answer = console
                            .read_line("Did you press Enter during the NO trial? (y/n): ")
                            .await?;
                        (None, !is_yes(&answer))
                    }
                };
                TrialState::ResponseCollected(Trial {
                    index: plan.index,
                    stimulus: plan.stimulus,
                    foreperiod_seconds: plan.foreperiod_seconds,
                    reaction_time_ms,
                    correct,
                })
            }
            TrialState::ResponseCollected(trial) => return Ok(trial),
        };
    }
}
