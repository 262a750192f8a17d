use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// In-memory content workflow board.
/// Every run starts from the sample board, or an empty one with --empty.
#[derive(Parser)]
#[command(name = "cw", version, about = "Content workflow board CLI")]
pub struct Cli {
    /// Start from an empty board instead of the sample tasks.
    #[arg(long, global = true)]
    pub empty: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, env = "CW_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "content_workflow=trace". RUST_LOG wins if set.
    #[arg(long, global = true, env = "CW_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}
