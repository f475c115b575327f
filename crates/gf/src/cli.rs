//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the gf CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use grid_filter_rs::MatchStrategy;

/// gf - Filter tabular data with per-column keywords
#[derive(Parser, Debug)]
#[command(name = "gf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter the rows of a JSON or CSV file
    #[command(alias = "f")]
    Filter {
        /// Data file (.json array of objects, or .csv with a header row)
        file: PathBuf,

        /// Column filter as COLUMN=KEYWORD (repeatable, applied in order)
        #[arg(
            short = 'f',
            long = "filter",
            value_name = "COLUMN=KEYWORD",
            value_parser = parse_filter,
            action = clap::ArgAction::Append
        )]
        filters: Vec<(String, String)>,

        /// How multi-word keywords match (default: from config)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Columns to display, comma separated (default: all)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Show at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show how a keyword is classified
    #[command(alias = "c")]
    Classify {
        /// The keyword, exactly as typed into a column filter
        #[arg(allow_hyphen_values = true)]
        keyword: String,

        /// How multi-word keywords match (default: from config)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Match strategy for multi-word keywords
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    /// Whole keyword as one substring
    Default,
    /// Every term as a substring
    Fuzzy,
    /// Every term as a whole word
    Tokens,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Default => MatchStrategy::Default,
            StrategyArg::Fuzzy => MatchStrategy::Fuzzy,
            StrategyArg::Tokens => MatchStrategy::Tokens,
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Parses a `COLUMN=KEYWORD` filter argument.
///
/// Only the first `=` separates; `age==5` filters `age` with keyword `=5`.
fn parse_filter(arg: &str) -> Result<(String, String), String> {
    let (column, keyword) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=KEYWORD, got '{arg}'"))?;

    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in '{arg}'"));
    }

    Ok((column.to_string(), keyword.to_string()))
}
