//! Weighted, missing-tolerant blend of task results into one composite score.
//!
//! Four signals feed the blend: immediate recall, delayed recall, reaction
//! speed, and the multi-domain percentage. A signal that is absent (task not
//! run, metric null) drops out of both the weighted sum and the weight total,
//! so the remaining weights are renormalized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::CogError;
use crate::model::{Metrics, TaskKind, TaskResult};

/// Unit conversions that put heterogeneous task metrics on a
/// higher-is-better scale.
pub mod conversions {
    /// Milliseconds per second; a 250 ms reaction time maps to speed 4.0.
    pub const SPEED_NUMERATOR_MS: f64 = 1000.0;

    /// Multiplier taking a 0-1 fraction onto a 0-10 scale.
    pub const PERCENT_SCALE: f64 = 10.0;

    /// Reaction speed from a mean reaction time. `None` unless `rt_ms > 0`.
    pub fn speed_from_rt_ms(rt_ms: f64) -> Option<f64> {
        (rt_ms > 0.0).then(|| SPEED_NUMERATOR_MS / rt_ms)
    }

    /// Multi-domain fraction (0-1) to a 0-10 score.
    pub fn percent_to_ten_scale(percent: f64) -> f64 {
        percent * PERCENT_SCALE
    }
}

/// Weight of each composite component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeWeights {
    pub immediate_recall: f64,
    pub delayed_recall: f64,
    pub reaction_speed: f64,
    pub multidomain: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            immediate_recall: 0.25,
            delayed_recall: 0.30,
            reaction_speed: 0.25,
            multidomain: 0.20,
        }
    }
}

impl CompositeWeights {
    pub fn validate(&self) -> Result<(), CogError> {
        let weights = [
            ("immediate_recall", self.immediate_recall),
            ("delayed_recall", self.delayed_recall),
            ("reaction_speed", self.reaction_speed),
            ("multidomain", self.multidomain),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CogError::config(format!(
                    "composite weight {name} must be non-negative, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

/// One signal that made it into the blend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub name: &'static str,
    pub value: f64,
    pub weight: f64,
}

/// Pull the available signals out of a result map, in fixed order.
pub fn collect_components(
    results: &BTreeMap<TaskKind, TaskResult>,
    weights: &CompositeWeights,
) -> Vec<Component> {
    let immediate = results.get(&TaskKind::ImmediateRecall).and_then(|r| r.score);
    let delayed = results.get(&TaskKind::DelayedRecall).and_then(|r| r.score);
    let speed = results
        .get(&TaskKind::ReactionSimple)
        .or_else(|| results.get(&TaskKind::ReactionGoNoGo))
        .and_then(|r| r.metric("avg_rt_ms"))
        .and_then(conversions::speed_from_rt_ms);
    let multidomain = results
        .get(&TaskKind::Multidomain)
        .and_then(|r| r.metric("percent"))
        .map(conversions::percent_to_ten_scale);

    [
        ("immediate_recall", immediate, weights.immediate_recall),
        ("delayed_recall", delayed, weights.delayed_recall),
        ("reaction_speed", speed, weights.reaction_speed),
        ("multidomain", multidomain, weights.multidomain),
    ]
    .into_iter()
    .filter_map(|(name, value, weight)| value.map(|value| Component { name, value, weight }))
    .collect()
}

/// Blend task results into a composite [`TaskResult`].
///
/// Pure function of its inputs. With no usable signals the score is `None`
/// and metrics are empty; otherwise `score = Σ value·weight / Σ weight` over
/// the present components, and the metrics record how many were present and
/// the weight total used.
pub fn composite_from_results(
    results: &BTreeMap<TaskKind, TaskResult>,
    weights: &CompositeWeights,
) -> TaskResult {
    let participant_id = results
        .values()
        .map(|r| r.participant_id.clone())
        .next()
        .unwrap_or_default();

    let components = collect_components(results, weights);
    let weights_sum: f64 = components.iter().map(|c| c.weight).sum();

    if components.is_empty() {
        return TaskResult {
            task: TaskKind::Composite,
            participant_id,
            score: None,
            max_score: None,
            metrics: Metrics::new(),
            raw: serde_json::Map::new(),
        };
    }

    let weighted: f64 = components.iter().map(|c| c.value * c.weight).sum();
    let score = (weights_sum > 0.0).then(|| weighted / weights_sum);

    let mut metrics = Metrics::new();
    metrics.insert("components_present".into(), Some(components.len() as f64));
    metrics.insert("weights_sum".into(), Some(weights_sum));

    let mut raw = serde_json::Map::new();
    raw.insert(
        "components".into(),
        json!(components.iter().map(|c| c.name).collect::<Vec<_>>()),
    );
    raw.insert(
        "parts".into(),
        json!(components.iter().map(|c| c.value).collect::<Vec<_>>()),
    );
    raw.insert(
        "weights".into(),
        json!(components.iter().map(|c| c.weight).collect::<Vec<_>>()),
    );

    TaskResult {
        task: TaskKind::Composite,
        participant_id,
        score,
        max_score: None,
        metrics,
        raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(task: TaskKind, score: Option<f64>, metrics: &[(&str, Option<f64>)]) -> TaskResult {
        TaskResult {
            task,
            participant_id: "p1".into(),
            score,
            max_score: None,
            metrics: metrics.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            raw: serde_json::Map::new(),
        }
    }

    fn map(results: Vec<TaskResult>) -> BTreeMap<TaskKind, TaskResult> {
        results.into_iter().map(|r| (r.task, r)).collect()
    }

    #[test]
    fn renormalizes_over_present_components() {
        let results = map(vec![
            result(TaskKind::DelayedRecall, Some(8.0), &[]),
            result(TaskKind::ReactionSimple, Some(250.0), &[("avg_rt_ms", Some(250.0))]),
        ]);
        let composite = composite_from_results(&results, &CompositeWeights::default());

        let expected = (8.0 * 0.30 + 4.0 * 0.25) / (0.30 + 0.25);
        assert!((composite.score.unwrap() - expected).abs() < 1e-12);
        assert_eq!(composite.metric("components_present"), Some(2.0));
        assert!((composite.metric("weights_sum").unwrap() - 0.55).abs() < 1e-12);
        assert_eq!(composite.participant_id, "p1");
    }

    #[test]
    fn all_four_components() {
        let results = map(vec![
            result(TaskKind::ImmediateRecall, Some(6.0), &[]),
            result(TaskKind::DelayedRecall, Some(5.0), &[]),
            result(TaskKind::ReactionSimple, Some(500.0), &[("avg_rt_ms", Some(500.0))]),
            result(TaskKind::Multidomain, Some(9.0), &[("percent", Some(0.5))]),
        ]);
        let composite = composite_from_results(&results, &CompositeWeights::default());
        let expected = 6.0 * 0.25 + 5.0 * 0.30 + 2.0 * 0.25 + 5.0 * 0.20;
        assert!((composite.score.unwrap() - expected).abs() < 1e-12);
        assert_eq!(composite.metric("components_present"), Some(4.0));
        assert_eq!(
            composite.raw["components"],
            json!(["immediate_recall", "delayed_recall", "reaction_speed", "multidomain"])
        );
    }

    #[test]
    fn no_components_yields_null_score() {
        let composite = composite_from_results(&BTreeMap::new(), &CompositeWeights::default());
        assert_eq!(composite.score, None);
        assert!(composite.metrics.is_empty());
        assert!(composite.raw.is_empty());
    }

    #[test]
    fn null_metrics_are_skipped() {
        let results = map(vec![
            result(TaskKind::ReactionSimple, None, &[("avg_rt_ms", None)]),
            result(TaskKind::Multidomain, Some(0.0), &[("percent", None)]),
            result(TaskKind::ImmediateRecall, None, &[]),
        ]);
        let composite = composite_from_results(&results, &CompositeWeights::default());
        assert_eq!(composite.score, None);
        assert!(composite.metrics.is_empty());
    }

    #[test]
    fn zero_reaction_time_is_not_a_signal() {
        let results = map(vec![
            result(TaskKind::ReactionSimple, Some(0.0), &[("avg_rt_ms", Some(0.0))]),
            result(TaskKind::ImmediateRecall, Some(3.0), &[]),
        ]);
        let composite = composite_from_results(&results, &CompositeWeights::default());
        assert_eq!(composite.score, Some(3.0));
        assert_eq!(composite.metric("components_present"), Some(1.0));
    }

    #[test]
    fn go_no_go_reaction_used_when_simple_absent() {
        let results = map(vec![result(
            TaskKind::ReactionGoNoGo,
            Some(400.0),
            &[("avg_rt_ms", Some(400.0))],
        )]);
        let composite = composite_from_results(&results, &CompositeWeights::default());
        assert_eq!(composite.score, Some(2.5));
    }

    #[test]
    fn recognition_does_not_stand_in_for_recall() {
        let results = map(vec![result(TaskKind::ImmediateRecognition, Some(7.0), &[])]);
        let composite = composite_from_results(&results, &CompositeWeights::default());
        assert_eq!(composite.score, None);
    }

    #[test]
    fn zero_weights_yield_null_score() {
        let weights = CompositeWeights {
            immediate_recall: 0.0,
            ..Default::default()
        };
        let results = map(vec![result(TaskKind::ImmediateRecall, Some(5.0), &[])]);
        let composite = composite_from_results(&results, &weights);
        assert_eq!(composite.score, None);
        assert_eq!(composite.metric("components_present"), Some(1.0));
    }

    #[test]
    fn aggregation_is_idempotent() {
        let results = map(vec![
            result(TaskKind::ImmediateRecall, Some(6.0), &[]),
            result(TaskKind::Multidomain, Some(9.0), &[("percent", Some(0.75))]),
        ]);
        let weights = CompositeWeights::default();
        let first = composite_from_results(&results, &weights);
        let second = composite_from_results(&results, &weights);
        assert_eq!(first, second);
    }

    #[test]
    fn negative_weights_rejected() {
        let weights = CompositeWeights {
            reaction_speed: -0.1,
            ..Default::default()
        };
        assert!(weights.validate().unwrap_err().is_configuration());
        assert!(CompositeWeights::default().validate().is_ok());
    }

    #[test]
    fn conversions() {
        assert_eq!(conversions::speed_from_rt_ms(250.0), Some(4.0));
        assert_eq!(conversions::speed_from_rt_ms(0.0), None);
        assert_eq!(conversions::speed_from_rt_ms(-5.0), None);
        assert_eq!(conversions::percent_to_ten_scale(0.5), 5.0);
    }
}
