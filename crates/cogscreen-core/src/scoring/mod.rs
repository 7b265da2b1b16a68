//! Pure scoring functions, one module per task family.
//!
//! Nothing here prompts, sleeps, or draws random numbers; the interactive
//! tasks in [`crate::tasks`] collect answers and hand them over.

pub mod multidomain;
pub mod reaction;
pub mod recall;
pub mod recognition;

pub use multidomain::{MultiDomainScore, SubScore};
pub use reaction::{summarize_trials, ReactionSummary};
pub use recall::{score_recall, RecallScore};
pub use recognition::{score_recognition, RecognitionScore};
