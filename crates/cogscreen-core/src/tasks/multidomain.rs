//! Multi-domain screen: serial subtraction, forward digit span, and an
//! alternating number/letter sequence, summed into one score.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::json;
use tokio::time::Instant;

use super::{clear_screen, elapsed_seconds};
use crate::config::{seconds, MultiDomainConfig};
use crate::model::{Metrics, TaskKind, TaskResult};
use crate::scoring::multidomain::{
    alternating_sequence, score_digit_span, score_sequence, score_serial, sequence_tokens,
    serial_expected,
};
use crate::scoring::MultiDomainScore;
use crate::traits::{Console, Pacer};

const DIGIT_CLEAR_LINES: usize = 20;

pub async fn run_multidomain(
    participant_id: &str,
    config: &MultiDomainConfig,
    rng: &mut StdRng,
    console: &dyn Console,
    pacer: &dyn Pacer,
) -> Result<TaskResult> {
    config.validate()?;
    let start = Instant::now();
    tracing::info!(participant_id, "starting multi-domain screen");
    console.display("\n=== Multi-domain Screening ===");

    // Part 1: serial subtraction. The prompt always shows the correct running
    // value, never the participant's previous answer.
    console.display("\nPart 1: Serial subtraction");
    console.display(&format!(
        "Start at {} and subtract {} each time.",
        config.serial_start, config.serial_step
    ));
    let expected = serial_expected(config.serial_start, config.serial_step, config.serial_n);
    let mut answers = Vec::with_capacity(expected.len());
    let shown_values = std::iter::once(config.serial_start).chain(expected.iter().copied());
    for (i, shown) in shown_values.take(expected.len()).enumerate() {
        let prompt = format!("Step {}: {shown} - {} = ", i + 1, config.serial_step);
        answers.push(console.read_line(&prompt).await?.trim().to_string());
    }
    let serial = score_serial(&answers, &expected);
    tracing::debug!(points = serial.points, max = serial.max_points, "serial subtraction scored");

    // Part 2: forward digit span.
    console.display("\nPart 2: Digit span (forward)");
    let digits: String = (0..config.digit_span_len)
        .map(|_| char::from(b'0' + rng.gen_range(0..=9u8)))
        .collect();
    console.display("Memorize these digits:");
    console.display(&digits.chars().map(String::from).collect::<Vec<_>>().join(" "));
    pacer.pause(seconds(config.digit_display_seconds)).await;
    clear_screen(console, DIGIT_CLEAR_LINES);
    let typed_digits = console
        .read_line("Type the digits in the same order (no spaces needed): ")
        .await?;
    let digit_span = score_digit_span(&digits, &typed_digits);
    tracing::debug!(correct = digit_span.points, "digit span scored");

    // Part 3: alternating sequence.
    console.display("\nPart 3: Alternating sequence (executive switching)");
    console.display("Type the alternating sequence like: 1 a 2 b 3 c ...");
    let expected_seq = alternating_sequence(config.sequence_pairs);
    let typed_seq = console.read_line("Your sequence: ").await?;
    let typed_tokens = sequence_tokens(&typed_seq);
    let sequence = score_sequence(&typed_tokens, &expected_seq);
    tracing::debug!(
        points = sequence.points,
        max = sequence.max_points,
        "alternating sequence scored"
    );

    let score = MultiDomainScore {
        serial,
        digit_span,
        sequence,
    };

    let mut metrics = Metrics::new();
    metrics.insert("percent".into(), score.percent());
    metrics.insert("serial_correct".into(), Some(f64::from(serial.points)));
    metrics.insert("digit_span_correct".into(), Some(f64::from(digit_span.points)));
    metrics.insert("sequence_correct".into(), Some(f64::from(sequence.points)));
    metrics.insert("elapsed_seconds".into(), Some(elapsed_seconds(start)));

    let mut raw = serde_json::Map::new();
    raw.insert(
        "serial".into(),
        json!({ "answers": answers, "expected": expected, "correct": serial.points }),
    );
    raw.insert(
        "digit_span".into(),
        json!({ "digits": digits, "typed": typed_digits, "correct": digit_span.points }),
    );
    raw.insert(
        "sequence".into(),
        json!({
            "expected": expected_seq,
            "typed_tokens": typed_tokens,
            "correct": sequence.points,
        }),
    );

    tracing::info!(
        total = score.total_points(),
        max = score.max_points(),
        "multi-domain screen complete"
    );

    Ok(TaskResult {
        task: TaskKind::Multidomain,
        participant_id: participant_id.to_string(),
        score: Some(f64::from(score.total_points())),
        max_score: Some(f64::from(score.max_points())),
        metrics,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::task_rng;
    use crate::traits::{NoopPacer, ScriptedConsole};

    fn config() -> MultiDomainConfig {
        MultiDomainConfig {
            serial_n: 3,
            digit_span_len: 4,
            sequence_pairs: 3,
            seed: Some(11),
            ..Default::default()
        }
    }

    /// Digits shown for a given seed, read back from the transcript.
    fn shown_digits(console: &ScriptedConsole) -> String {
        let transcript = console.transcript();
        let pos = transcript
            .iter()
            .position(|l| l == "Memorize these digits:")
            .unwrap();
        transcript[pos + 1].replace(' ', "")
    }

    #[tokio::test]
    async fn perfect_run() {
        // Discover the digits with a dry run on the same seed.
        let dry = ScriptedConsole::new(Vec::<String>::new());
        run_multidomain("p1", &config(), &mut task_rng(Some(11)), &dry, &NoopPacer)
            .await
            .unwrap();
        let digits = shown_digits(&dry);
        assert_eq!(digits.len(), 4);

        let console = ScriptedConsole::new(vec![
            "93".to_string(),
            "86".to_string(),
            "79".to_string(),
            digits.clone(),
            "1a2b3c".to_string(),
        ]);
        let result = run_multidomain("p1", &config(), &mut task_rng(Some(11)), &console, &NoopPacer)
            .await
            .unwrap();

        assert_eq!(shown_digits(&console), digits);
        assert_eq!(result.task, TaskKind::Multidomain);
        assert_eq!(result.score, Some(10.0));
        assert_eq!(result.max_score, Some(10.0));
        assert_eq!(result.metric("percent"), Some(1.0));
        assert_eq!(result.metric("sequence_correct"), Some(6.0));
    }

    #[tokio::test]
    async fn malformed_answers_degrade_to_incorrect() {
        let console = ScriptedConsole::new(["93", "eighty-six", "80", "not digits", "1 a 2"]);
        let result = run_multidomain("p1", &config(), &mut task_rng(Some(11)), &console, &NoopPacer)
            .await
            .unwrap();

        assert_eq!(result.metric("serial_correct"), Some(1.0));
        assert_eq!(result.metric("digit_span_correct"), Some(0.0));
        assert_eq!(result.metric("sequence_correct"), Some(3.0));
        assert_eq!(result.score, Some(4.0));
        assert_eq!(result.metric("percent"), Some(0.4));
    }

    #[tokio::test]
    async fn serial_prompts_show_true_running_value() {
        let console = ScriptedConsole::new(["0", "0", "0"]);
        run_multidomain("p1", &config(), &mut task_rng(Some(1)), &console, &NoopPacer)
            .await
            .unwrap();
        let prompts = console.prompts();
        assert_eq!(prompts[0], "Step 1: 100 - 7 = ");
        assert_eq!(prompts[1], "Step 2: 93 - 7 = ");
        assert_eq!(prompts[2], "Step 3: 86 - 7 = ");
    }

    #[tokio::test]
    async fn too_many_pairs_is_invalid() {
        let config = MultiDomainConfig {
            sequence_pairs: 30,
            ..Default::default()
        };
        let console = ScriptedConsole::new(Vec::<String>::new());
        let err = run_multidomain("p1", &config, &mut task_rng(None), &console, &NoopPacer)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("sequence_pairs"));
    }
}
