// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use forerun::cli::{Cli, Command};
use forerun::error::ConfigError;

mod cmd_init;
mod cmd_order;
mod cmd_record;
mod cmd_report;

/// Exit status for configuration errors (matches clap usage errors).
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Order(args) => cmd_order::run(&cli, args),
        Command::Record(args) => cmd_record::run(&cli, args),
        Command::Report(args) => cmd_report::run(&cli, args),
        Command::Init(args) => cmd_init::run(args),
        Command::Completions(args) => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "forerun", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("forerun: error: {e:#}");
            if is_config_error(&e) {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn is_config_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ConfigError>().is_some()
        || e
            .downcast_ref::<forerun::Error>()
            .is_some_and(forerun::Error::is_config)
}

/// Logs go to stderr; filter from `FORERUN_LOG` (default: warn).
fn init_logging() {
    let filter = EnvFilter::try_from_env("FORERUN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
