//! `jira-sync` CLI entry-point.
//!
//! Available sub-commands:
//! - `describe`: print a pipeline's bindings and reactions as JSON.
//! - `validate`: check a pipeline's wiring.
//! - `react`: dispatch one event against a saved state.
//! - `simulate`: dry-run a pipeline against mock services.

mod commands;
mod settings;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use settings::{FlowArgs, Settings};

#[derive(Parser)]
#[command(
    name = "jira-sync",
    about = "Turns Jira activity into Slack messages and Trello cards",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the pipeline's service bindings and reactions.
    Describe {
        #[command(flatten)]
        flow: FlowArgs,
    },
    /// Validate the pipeline's wiring.
    Validate {
        #[command(flatten)]
        flow: FlowArgs,
    },
    /// Dispatch one event and print the tasks the pipeline emits.
    React {
        #[command(flatten)]
        settings: Settings,
        /// JSON file holding the accumulated state. Empty when omitted.
        #[arg(long)]
        state: Option<PathBuf>,
        /// Event as JSON, e.g. `{"type":"task_finished","task_name":"fetch-mentions","status":"success"}`.
        #[arg(long)]
        event: Option<String>,
        /// Date reactions see as today (YYYY-MM-DD).
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Run the pipeline to completion against mock services.
    Simulate {
        #[command(flatten)]
        settings: Settings,
        /// JSON object mapping task names to the output their service returns.
        #[arg(long)]
        responses: PathBuf,
        #[arg(long, default_value_t = 1_000)]
        max_tasks: usize,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing `.env` is fine; one that exists but does not parse is not.
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("cannot load .env"),
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Describe { flow } => {
            println!("{}", commands::describe(flow.flow.into())?);
        }
        Command::Validate { flow } => match commands::validate(flow.flow.into()) {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("❌ Validation failed: {e}");
                std::process::exit(1);
            }
        },
        Command::React { settings, state, event, today } => {
            let config = settings.sync_config();
            info!("dispatching against {:?} pipeline", settings.flow());
            let tasks = commands::react(settings.flow(), &config, state.as_deref(), event.as_deref(), today)?;
            println!("{tasks}");
        }
        Command::Simulate { settings, responses, max_tasks, today } => {
            let config = settings.sync_config();
            info!("simulating {:?} pipeline with {}", settings.flow(), config.empty_results);
            let state = commands::simulate(settings.flow(), &config, &responses, max_tasks, today).await?;
            println!("{state}");
        }
    }

    Ok(())
}
