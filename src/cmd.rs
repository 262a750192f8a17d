//! Command implementations for the CLI interface.
//!
//! Each subcommand builds on a fresh in-memory board, issues intents or reads
//! views from it, and prints the result as a table or JSON.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use mockable::{Clock, DefaultClock};
use serde::Serialize;
use tracing::{info, warn};

use crate::board::{Board, Intent};
use crate::error::AppError;
use crate::fields::*;
use crate::metrics::Metrics;
use crate::seed::sample_tasks;
use crate::task::Task;
use crate::tui::workflow_run::run_workflow_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the workflow kanban board interface.
    Ui {
        /// Team filter to open the board with.
        #[arg(long, value_enum, default_value_t = TeamFilter::All)]
        team: TeamFilter,
    },

    /// List tasks with optional filters.
    List {
        /// Only show tasks owned by this team.
        #[arg(long, value_enum, default_value_t = TeamFilter::All)]
        team: TeamFilter,
        /// Only show tasks in this stage.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show metrics for the whole board.
    Metrics {
        /// Print JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Apply a JSON array of intents in order, then print the board.
    Apply {
        /// Path to the intent script.
        file: PathBuf,
        /// Team filter for the printed task list. Metrics are unfiltered.
        #[arg(long, value_enum, default_value_t = TeamFilter::All)]
        team: TeamFilter,
        /// Print JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Outcome of one scripted intent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentOutcome {
    pub step: usize,
    pub intent: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyReport<'a> {
    version: u64,
    outcomes: &'a [IntentOutcome],
    tasks: Vec<&'a Task>,
    metrics: Metrics,
}

#[derive(Debug, Serialize)]
struct ListReport<'a> {
    tasks: Vec<&'a Task>,
}

/// Build the board a command starts from.
pub fn build_board(empty: bool) -> Board {
    if empty {
        Board::new()
    } else {
        Board::with_tasks(sample_tasks(), Arc::new(DefaultClock))
    }
}

pub fn cmd_ui(board: Board, team: TeamFilter) -> Result<(), AppError> {
    info!(filter = team.label(), "opening workflow board");
    let board = run_workflow_tui(board, team)?;
    info!(version = board.version(), "workflow board closed");
    Ok(())
}

pub fn cmd_list<C: Clock>(
    board: &Board<C>,
    team: TeamFilter,
    status: Option<Status>,
    json: bool,
) -> Result<(), AppError> {
    let tasks = filter_tasks(board, team, status);
    if json {
        println!("{}", serde_json::to_string_pretty(&ListReport { tasks })?);
    } else {
        print!("{}", render_table(&tasks));
    }
    Ok(())
}

pub fn cmd_metrics<C: Clock>(board: &Board<C>, json: bool) -> Result<(), AppError> {
    let metrics = board.metrics();
    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        print!("{}", render_metrics(&metrics));
    }
    Ok(())
}

pub fn cmd_apply<C: Clock>(
    board: &mut Board<C>,
    file: &Path,
    team: TeamFilter,
    json: bool,
) -> Result<(), AppError> {
    let intents = read_intents(file)?;
    info!(path = %file.display(), count = intents.len(), "applying intent script");
    let outcomes = apply_intents(board, intents);

    let tasks = filter_tasks(board, team, None);
    if json {
        let report = ApplyReport {
            version: board.version(),
            outcomes: &outcomes,
            tasks,
            metrics: board.metrics(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &outcomes {
            match (&outcome.task, &outcome.reason) {
                (Some(id), _) => println!("ok    {:>3}  {} -> #{}", outcome.step, outcome.intent, id),
                (None, Some(reason)) => println!("skip  {:>3}  {}: {}", outcome.step, outcome.intent, reason),
                (None, None) => println!("skip  {:>3}  {}", outcome.step, outcome.intent),
            }
        }
        println!();
        print!("{}", render_table(&tasks));
        println!();
        print!("{}", render_metrics(&board.metrics()));
    }
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Parse an intent script from disk.
pub fn read_intents(path: &Path) -> Result<Vec<Intent>, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AppError::ParseScript {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply intents one at a time. Declined intents are reported and skipped.
pub fn apply_intents<C: Clock>(board: &mut Board<C>, intents: Vec<Intent>) -> Vec<IntentOutcome> {
    intents
        .into_iter()
        .enumerate()
        .map(|(i, intent)| {
            let step = i + 1;
            let summary = describe_intent(&intent);
            match board.apply(intent) {
                Ok(id) => IntentOutcome {
                    step,
                    intent: summary,
                    accepted: true,
                    task: Some(id.0),
                    reason: None,
                },
                Err(reason) => {
                    warn!(step, intent = %summary, %reason, "intent declined");
                    IntentOutcome {
                        step,
                        intent: summary,
                        accepted: false,
                        task: None,
                        reason: Some(reason.to_string()),
                    }
                }
            }
        })
        .collect()
}

/// One-line description of an intent for reports.
pub fn describe_intent(intent: &Intent) -> String {
    match intent {
        Intent::Create(new_task) => format!("create \"{}\" ({})", new_task.title, new_task.team),
        Intent::Advance { id } => format!("advance {id}"),
        Intent::Revert { id } => format!("revert {id}"),
        Intent::Relocate { id, status, index } => format!("relocate {id} to {status}[{index}]"),
    }
}

fn filter_tasks<C: Clock>(board: &Board<C>, team: TeamFilter, status: Option<Status>) -> Vec<&Task> {
    board
        .view(team)
        .filter(|t| status.map_or(true, |s| t.status == s))
        .collect()
}

/// Render tasks as a fixed-width table.
pub fn render_table(tasks: &[&Task]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:<8} {:<9} {:>4} {:>4} {:<14} {}",
        "ID", "Team", "Stage", "Hrs", "Rev", "Assignee", "Title"
    );
    for t in tasks {
        let assignee = t.assignee.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<5} {:<8} {:<9} {:>4} {:>4} {:<14} {}",
            t.id.0,
            t.team.label(),
            t.status.label(),
            t.hours_worked,
            t.revision_count,
            truncate(assignee, 14),
            t.title
        );
    }
    if tasks.is_empty() {
        out.push_str("(no tasks)\n");
    }
    out
}

/// Render metrics as labelled lines.
pub fn render_metrics(metrics: &Metrics) -> String {
    let mut out = String::from("Workflow Metrics\n");
    for card in metrics.cards() {
        let _ = writeln!(out, "  {:<22} {}", card.label, card.value);
    }
    out
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
