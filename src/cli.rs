//! CLI definitions for domlens.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// domlens CLI.
#[derive(Parser)]
#[command(name = "domlens")]
#[command(about = "Visual element inspector driven against headless page fixtures")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults are used when it does not exist)
    #[arg(short, long, default_value = "domlens.toml", global = true)]
    pub config: PathBuf,

    /// Also write daily-rotated logs into this directory
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Replay a scripted inspection session against a page fixture
    Replay {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Replay script (JSON)
        #[arg(long)]
        script: PathBuf,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Print extracted element info for a page fixture
    Inspect {
        /// Page fixture (JSON)
        #[arg(long)]
        page: PathBuf,

        /// Only this named element
        #[arg(long)]
        element: Option<String>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}
