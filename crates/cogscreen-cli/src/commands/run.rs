//! The `cogscreen run` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use cogscreen_core::config::SessionConfig;
use cogscreen_core::report::{format_value, SessionReport};
use cogscreen_core::session::Session;
use cogscreen_core::traits::{Console, NoopPacer, Pacer, SleepPacer, StdConsole};

use crate::OutputFormat;

pub struct RunOptions {
    pub participant: Option<String>,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub recognition: bool,
    pub go_no_go: bool,
    pub no_pause: bool,
    pub format: OutputFormat,
}

pub async fn execute(options: RunOptions) -> Result<()> {
    let mut config = match &options.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if options.recognition {
        config.memory.recognition = true;
    }
    if options.go_no_go {
        config.reaction.go_no_go = true;
    }
    config.validate()?;
    tracing::debug!(?config, "resolved session config");

    // Keep stdout clean for the JSON document.
    let console: Arc<dyn Console> = if options.format == OutputFormat::Json {
        Arc::new(StdConsole::on_stderr())
    } else {
        Arc::new(StdConsole::new())
    };
    let pacer: Arc<dyn Pacer> = if options.no_pause {
        Arc::new(NoopPacer)
    } else {
        Arc::new(SleepPacer)
    };

    console.display("\nWelcome to the cognitive test demo.");
    console.display("This is NOT a diagnosis. Just a learning tool.\n");

    let participant_id = match options.participant {
        Some(id) => id,
        None => console
            .read_line("Enter your participant ID (e.g. 'me'): ")
            .await?
            .trim()
            .to_string(),
    };

    console.display("\nStarting session...\n");
    let session = Session::new(config, Arc::clone(&console), pacer);
    let report = session.run(&participant_id).await?;

    match options.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Table => {
            println!("\n=== SESSION COMPLETE ===\n");
            println!("{}", summary_table(&report));
        }
        OutputFormat::Text => {
            println!("\n=== SESSION COMPLETE ===\n");
            print!("{}", report.to_text());
        }
    }

    Ok(())
}

fn summary_table(report: &SessionReport) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Task", "Score", "Max", "Metrics"]);

    for (task, result) in &report.results {
        let metrics = result
            .metrics
            .iter()
            .map(|(name, value)| format!("{name}: {}", format_value(*value)))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(task),
            Cell::new(format_value(result.score)),
            Cell::new(format_value(result.max_score)),
            Cell::new(metrics),
        ]);
    }

    table
}
