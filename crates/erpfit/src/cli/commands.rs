//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::OutputFormat;

/// Take command arguments.
#[derive(Debug, Args)]
pub struct TakeCommand {
    /// Print results as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Score command arguments.
#[derive(Debug, Args)]
pub struct ScoreCommand {
    /// JSON file holding an array of `{"question_id", "value"}` objects
    pub file: PathBuf,

    /// Output format (defaults to `output.format` from configuration)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

/// Questions command arguments.
#[derive(Debug, Args)]
pub struct QuestionsCommand {
    /// Only list section N (0 = psychometric, 1 = technical, 2 = WISCAR)
    #[arg(short, long, value_name = "N")]
    pub section: Option<usize>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        file: Option<PathBuf>,
    },
}

/// Report format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}
