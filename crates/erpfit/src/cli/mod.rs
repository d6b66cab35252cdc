//! Command-line interface for erpfit.
//!
//! This module provides the CLI structure for the `erpfit` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, FormatArg, QuestionsCommand, ScoreCommand, TakeCommand};

use crate::logging::Verbosity;

/// erpfit - Find out whether ERP consulting suits you
///
/// Walks through psychometric, technical and WISCAR questions and
/// recommends whether to pursue a career as an ERP consultant.
#[derive(Debug, Parser)]
#[command(name = "erpfit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Take the assessment interactively
    Take(TakeCommand),

    /// Score a saved set of answers
    Score(ScoreCommand),

    /// List the questions
    Questions(QuestionsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
