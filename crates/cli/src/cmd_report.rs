// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.

use std::io::Write;

use forerun::cli::{Cli, OutputFormat, ReportArgs};
use forerun::engine;
use forerun::project::Project;
use forerun::report;

/// Run the report command.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let project = Project::load(cli.config.as_deref(), &cwd)?;

    let snapshot = engine::snapshot(&project.store())?;
    let output = report::format_report(args.output, &snapshot)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write!(handle, "{output}")?;
    // Add trailing newline for JSON output
    if matches!(args.output, OutputFormat::Json) {
        writeln!(handle)?;
    }
    Ok(())
}
