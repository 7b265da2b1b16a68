//! Session orchestrator.
//!
//! Runs the fixed battery in order: immediate memory, reaction, multi-domain,
//! delayed recall. Each task finishes before the next starts. The only state
//! carried between tasks is the studied word list, handed from immediate
//! memory to delayed recall. The composite is computed last.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use uuid::Uuid;

use crate::composite::composite_from_results;
use crate::config::SessionConfig;
use crate::report::SessionReport;
use crate::selection::task_rng;
use crate::tasks::{run_delayed_recall, run_immediate_memory, run_multidomain, run_reaction};
use crate::traits::{Console, Pacer};

/// Runs one participant through the battery.
pub struct Session {
    config: SessionConfig,
    console: Arc<dyn Console>,
    pacer: Arc<dyn Pacer>,
}

impl Session {
    pub fn new(config: SessionConfig, console: Arc<dyn Console>, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            config,
            console,
            pacer,
        }
    }

    /// Run all four tasks and the composite.
    ///
    /// The whole configuration is validated before the first prompt, so an
    /// inconsistent config aborts without asking the participant anything.
    pub async fn run(&self, participant_id: &str) -> Result<SessionReport> {
        self.config.validate()?;

        let id = Uuid::new_v4();
        let started_at = chrono::Utc::now();
        let start = Instant::now();
        let console = self.console.as_ref();
        let pacer = self.pacer.as_ref();
        tracing::info!(%id, participant_id, "session started");

        let mut results = BTreeMap::new();

        let memory = run_immediate_memory(
            participant_id,
            &self.config.memory,
            &mut task_rng(self.config.memory.seed),
            console,
            pacer,
        )
        .await?;
        results.insert(memory.result.task, memory.result);

        let reaction = run_reaction(
            participant_id,
            &self.config.reaction,
            &mut task_rng(self.config.reaction.seed),
            console,
            pacer,
        )
        .await?;
        results.insert(reaction.task, reaction);

        let multidomain = run_multidomain(
            participant_id,
            &self.config.multidomain,
            &mut task_rng(self.config.multidomain.seed),
            console,
            pacer,
        )
        .await?;
        results.insert(multidomain.task, multidomain);

        let delayed = run_delayed_recall(participant_id, &memory.targets, console).await?;
        results.insert(delayed.task, delayed);

        let composite = composite_from_results(&results, &self.config.composite);
        tracing::info!(%id, composite = ?composite.score, "session complete");
        results.insert(composite.task, composite);

        Ok(SessionReport {
            id,
            participant_id: participant_id.to_string(),
            started_at,
            duration_ms: start.elapsed().as_millis() as u64,
            results,
        })
    }
}
