// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::collection::InputFormat;
use crate::config::RankOverrides;

/// Reorders test collections so failures and informative tests surface earlier
#[derive(Parser)]
#[command(name = "forerun")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "FORERUN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reorder a discovered test collection (pre-execution hook)
    Order(OrderArgs),
    /// Record execution outcomes for future runs (post-execution hook)
    Record(RecordArgs),
    /// Show stored test features
    Report(ReportArgs),
    /// Initialize forerun configuration
    Init(InitArgs),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Ranking options shared by commands; unset values fall back to forerun.toml.
#[derive(clap::Args, Default)]
pub struct RankArgs {
    /// Weights for duration, recent failure and change relatedness (e.g. 1-0-0; 0-0-0 = random)
    #[arg(long, value_name = "W-W-W")]
    pub weight: Option<String>,

    /// Group level: param, method, file, folder
    #[arg(long, value_name = "LEVEL")]
    pub level: Option<String>,

    /// Seed for random order
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Run tests in the order listed in FILE (one id per line)
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,
}

impl RankArgs {
    pub fn overrides(&self) -> RankOverrides {
        RankOverrides {
            weight: self.weight.clone(),
            level: self.level.clone(),
            seed: self.seed,
            replay: self.replay.clone(),
            hist_len: None,
        }
    }
}

#[derive(clap::Args)]
pub struct OrderArgs {
    /// Collection to reorder (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input format
    #[arg(short, long, default_value = "text")]
    pub format: InputFormat,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    #[command(flatten)]
    pub rank: RankArgs,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct RecordArgs {
    /// Outcome records (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Input format
    #[arg(short, long, default_value = "text")]
    pub format: InputFormat,

    /// Maximum runs remembered since a test last failed
    #[arg(long, value_name = "N")]
    pub hist_len: Option<u32>,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl RecordArgs {
    pub fn overrides(&self) -> RankOverrides {
        RankOverrides {
            hist_len: self.hist_len,
            ..Default::default()
        }
    }
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Overwrite existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
