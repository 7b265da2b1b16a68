//! cogscreen CLI: runs the cognitive screening battery in a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "cogscreen", version, about = "Cognitive screening demo (not a diagnosis)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full session: memory, reaction, multi-domain, delayed recall
    Run {
        /// Participant identifier (prompted for when omitted)
        #[arg(long)]
        participant: Option<String>,

        /// Session config TOML file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Seed every task with the same value
        #[arg(long)]
        seed: Option<u64>,

        /// Use yes/no recognition instead of free recall for the memory task
        #[arg(long)]
        recognition: bool,

        /// Mix no-go trials into the reaction task
        #[arg(long)]
        go_no_go: bool,

        /// Skip study, display, and foreperiod pauses
        #[arg(long)]
        no_pause: bool,

        /// Summary format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the default session config as TOML
    Config,

    /// Score a recall response against a target list and print JSON
    ScoreRecall {
        /// Target words, comma-separated
        #[arg(long)]
        targets: String,

        /// The recall response as typed
        #[arg(long)]
        recalled: String,
    },
}

/// How the session summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Table,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cogscreen_core=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            participant,
            config,
            seed,
            recognition,
            go_no_go,
            no_pause,
            format,
        } => {
            commands::run::execute(commands::run::RunOptions {
                participant,
                config,
                seed,
                recognition,
                go_no_go,
                no_pause,
                format,
            })
            .await
        }
        Commands::Config => commands::config::execute(),
        Commands::ScoreRecall { targets, recalled } => {
            commands::score_recall::execute(&targets, &recalled)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
