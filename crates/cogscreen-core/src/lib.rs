//! cogscreen-core: Task scoring, composite aggregation, and session flow.
//!
//! The scorers in [`scoring`] and the aggregator in [`composite`] are pure
//! functions. The interactive tasks in [`tasks`] wrap them with prompts, timed
//! pauses, and participant input supplied through the [`traits`] collaborators.

pub mod composite;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod tasks;
pub mod text;
pub mod traits;
