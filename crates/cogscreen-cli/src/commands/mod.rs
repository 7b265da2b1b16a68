pub mod config;
pub mod run;
pub mod score_recall;
