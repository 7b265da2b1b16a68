//! Yes/no recognition scoring (corrected recognition).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Outcome of a recognition test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionScore {
    /// Targets answered "yes".
    pub hits: usize,
    /// Lures answered "yes".
    pub false_alarms: usize,
    /// `hits - false_alarms`, floored at zero.
    pub corrected: usize,
    /// Number of targets.
    pub max_score: usize,
}

/// Interpret a typed answer: anything starting with `y` (any case) is "yes".
pub fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}

/// Score yes/no responses over targets and lures.
///
/// Words missing from `responses` count as "no". Presentation order has no
/// effect on the result.
pub fn score_recognition(
    targets: &[String],
    lures: &[String],
    responses: &HashMap<String, bool>,
) -> RecognitionScore {
    let said_yes = |word: &String| responses.get(word).copied().unwrap_or(false);

    let hits = targets.iter().filter(|w| said_yes(*w)).count();
    let false_alarms = lures.iter().filter(|w| said_yes(*w)).count();

    RecognitionScore {
        hits,
        false_alarms,
        corrected: hits.saturating_sub(false_alarms),
        max_score: targets.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn responses(pairs: &[(&str, bool)]) -> HashMap<String, bool> {
        pairs.iter().map(|(w, yes)| (w.to_string(), *yes)).collect()
    }

    #[test]
    fn hits_minus_false_alarms() {
        let score = score_recognition(
            &words(&["a", "b", "c"]),
            &words(&["x", "y"]),
            &responses(&[("a", true), ("b", false), ("c", true), ("x", true), ("y", false)]),
        );
        assert_eq!(score.hits, 2);
        assert_eq!(score.false_alarms, 1);
        assert_eq!(score.corrected, 1);
        assert_eq!(score.max_score, 3);
    }

    #[test]
    fn corrected_recognition_never_negative() {
        let lures = words(&["v", "w", "x", "y", "z"]);
        let all_yes: Vec<(&str, bool)> = ["v", "w", "x", "y", "z"]
            .iter()
            .map(|w| (*w, true))
            .collect();
        let score = score_recognition(&words(&["a", "b"]), &lures, &responses(&all_yes));
        assert_eq!(score.hits, 0);
        assert_eq!(score.false_alarms, 5);
        assert_eq!(score.corrected, 0);
    }

    #[test]
    fn missing_responses_count_as_no() {
        let score = score_recognition(&words(&["a"]), &words(&["x"]), &HashMap::new());
        assert_eq!(score.hits, 0);
        assert_eq!(score.false_alarms, 0);
    }

    #[test]
    fn yes_parsing() {
        assert!(is_yes("Y"));
        assert!(is_yes("  yes please"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
        assert!(!is_yes("sure"));
    }
}
