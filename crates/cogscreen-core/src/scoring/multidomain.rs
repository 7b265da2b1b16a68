//! Sub-scorers for the multi-domain screen: serial subtraction, forward digit
//! span, and the alternating number/letter sequence.

use serde::{Deserialize, Serialize};

use crate::text::alphanumeric_only;

/// Points earned on one sub-test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScore {
    pub points: u32,
    pub max_points: u32,
}

/// Combined multi-domain result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiDomainScore {
    pub serial: SubScore,
    pub digit_span: SubScore,
    pub sequence: SubScore,
}

impl MultiDomainScore {
    pub fn total_points(&self) -> u32 {
        self.serial.points + self.digit_span.points + self.sequence.points
    }

    pub fn max_points(&self) -> u32 {
        self.serial.max_points + self.digit_span.max_points + self.sequence.max_points
    }

    /// Fraction of available points earned, `None` when nothing was scorable.
    pub fn percent(&self) -> Option<f64> {
        match self.max_points() {
            0 => None,
            max => Some(self.total_points() as f64 / max as f64),
        }
    }
}

/// Correct running values for `n` subtractions of `step` from `start`.
pub fn serial_expected(start: i64, step: i64, n: u32) -> Vec<i64> {
    (1..=i64::from(n))
        .map(|i| start.saturating_sub(step.saturating_mul(i)))
        .collect()
}

/// Score serial-subtraction answers position by position.
///
/// Each answer is compared with the correct value for its step, not with the
/// participant's previous answer, so one slip does not cascade. Non-numeric
/// answers are simply wrong.
pub fn score_serial(answers: &[String], expected: &[i64]) -> SubScore {
    let points = answers
        .iter()
        .zip(expected)
        .filter(|(given, want)| match given.trim().parse::<i64>() {
            Ok(value) => value == **want,
            Err(_) => {
                tracing::warn!(
                    answer = given.as_str(),
                    "non-numeric serial subtraction answer scored as incorrect"
                );
                false
            }
        })
        .count() as u32;

    SubScore {
        points,
        max_points: expected.len() as u32,
    }
}

/// Score a forward digit span: all-or-nothing, ignoring spacing and punctuation
/// in the typed answer.
pub fn score_digit_span(digits: &str, typed: &str) -> SubScore {
    let matched = alphanumeric_only(typed) == digits;
    SubScore {
        points: u32::from(matched),
        max_points: 1,
    }
}

/// Expected alternating sequence `1, a, 2, b, ...` for `pairs` pairs.
pub fn alternating_sequence(pairs: u32) -> Vec<String> {
    (0..pairs.min(26))
        .flat_map(|i| {
            let letter = char::from(b'a' + i as u8);
            [(i + 1).to_string(), letter.to_string()]
        })
        .collect()
}

/// Tokenize a typed sequence.
///
/// Splits on commas and whitespace. Two tokens or fewer means the participant
/// ran the sequence together (`"1a2b3c"`), so fall back to one token per
/// alphanumeric character.
pub fn sequence_tokens(typed: &str) -> Vec<String> {
    let lowered = typed.trim().to_lowercase();
    let tokens: Vec<String> = lowered
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if tokens.len() <= 2 {
        alphanumeric_only(typed).chars().map(String::from).collect()
    } else {
        tokens
    }
}

/// Count positions where the typed token equals the expected one.
///
/// Length mismatches just leave fewer positions to compare.
pub fn score_sequence(typed_tokens: &[String], expected: &[String]) -> SubScore {
    let points = typed_tokens
        .iter()
        .zip(expected)
        .filter(|(typed, want)| typed == want)
        .count() as u32;

    SubScore {
        points,
        max_points: expected.len() as u32,
    }
}
