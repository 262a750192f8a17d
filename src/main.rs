//! # CW - Content Workflow Board
//!
//! A command-line content workflow board with four fixed stages and an optional
//! terminal user interface (TUI).
//!
//! ## Key Features
//!
//! - **Fixed Pipeline**: Draft → Visuals → Audit → Approved, one step at a time from the
//!   card buttons, or any column at once by picking a card up and dropping it
//! - **Team Ownership**: Medical, Visual and QA teams; medical work starts in Draft,
//!   everything else joins at Visuals
//! - **Live Metrics**: Eight workflow metrics recomputed from the whole board on every read,
//!   whatever team filter is active
//! - **Scriptable**: Feed a JSON list of intents to `cw apply` and get the resulting board back
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the kanban board
//! cw ui
//!
//! # Print the QA team's tasks
//! cw list --team qa
//!
//! # Show metrics as JSON
//! cw metrics --json
//!
//! # Replay a script of intents against an empty board
//! cw --empty apply intents.json
//! ```
//!
//! ## Key Commands
//!
//! - `cw ui` - Kanban board with metrics header, create form and pick-up/drop moves
//! - `cw list` - Task table with team and stage filters
//! - `cw metrics` - Workflow metrics
//! - `cw apply <file>` - Apply a JSON intent script
//! - `cw completions <shell>` - Shell completion script
//!
//! The board lives in memory only. Each run starts from the sample tasks (or an empty
//! board with `--empty`) and nothing is written back when it ends.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod board;
pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod metrics;
pub mod seed;
pub mod task;
pub mod tui {
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod task_form;
    pub mod workflow;
    pub mod workflow_run;
}
#[cfg(test)]
mod test_support;

use cli::Cli;
use cmd::*;
use error::AppError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut board = build_board(cli.empty);

    match cli.command {
        Commands::Ui { team } => cmd_ui(board, team),
        Commands::List { team, status, json } => cmd_list(&board, team, status, json),
        Commands::Metrics { json } => cmd_metrics(&board, json),
        Commands::Apply { file, team, json } => cmd_apply(&mut board, &file, team, json),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Install the global subscriber.
///
/// The TUI owns the terminal, so without a log file its output is discarded.
fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = if let Some(path) = &cli.log_file {
        let file = File::options()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AppError::LogFile {
                path: path.clone(),
                source,
            })?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
    } else if matches!(cli.command, Commands::Ui { .. }) {
        builder.with_writer(io::sink).try_init()
    } else {
        builder.with_writer(io::stderr).try_init()
    };
    // A subscriber may already be installed; keep it.
    let _ = installed;
    Ok(())
}
