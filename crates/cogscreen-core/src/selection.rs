//! Seeded word sampling.
//!
//! Randomness is always passed in as an explicit [`Rng`], never pulled from a
//! thread-local generator, so a fixed seed reproduces a session exactly.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::error::CogError;

/// Built-in bank of simple, common nouns.
pub const DEFAULT_WORD_BANK: &[&str] = &[
    "apple", "river", "chair", "pencil", "window", "garden", "orange", "planet", "mirror",
    "coffee", "school", "button", "mountain", "pillow", "guitar", "station", "ticket",
    "camera", "bottle", "cookie", "forest", "doctor", "street", "yellow", "pocket", "circle",
    "castle", "shadow", "rocket", "blanket", "violin", "battery", "bridge", "candle",
    "silver", "engine", "market", "thunder", "flower", "wallet", "island", "sweater",
    "kitchen",
];

/// Build the random source for one task: seeded when `seed` is set, from OS
/// entropy otherwise.
pub fn task_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draw `n` distinct words from `bank` without replacement.
///
/// The result is in random draw order. Fails with
/// [`CogError::InvalidConfiguration`] when `n` exceeds the bank size.
pub fn choose_words<R: Rng + ?Sized>(
    bank: &[String],
    n: usize,
    rng: &mut R,
) -> Result<Vec<String>, CogError> {
    if n > bank.len() {
        return Err(CogError::config(format!(
            "cannot choose {n} words from a bank of {}",
            bank.len()
        )));
    }
    Ok(index::sample(rng, bank.len(), n)
        .into_iter()
        .map(|i| bank[i].clone())
        .collect())
}

/// Draw `n` lures from the part of `bank` not already used as targets.
pub fn choose_lures<R: Rng + ?Sized>(
    bank: &[String],
    targets: &[String],
    n: usize,
    rng: &mut R,
) -> Result<Vec<String>, CogError> {
    let pool: Vec<String> = bank
        .iter()
        .filter(|w| !targets.contains(w))
        .cloned()
        .collect();
    choose_words(&pool, n, rng)
}
