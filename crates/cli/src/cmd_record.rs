// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record command implementation.

use anyhow::Context;

use forerun::Engine;
use forerun::cli::{Cli, RecordArgs};
use forerun::collection::TestReport;
use forerun::project::Project;
use forerun::report;
use forerun::verbose::VerboseLogger;

use crate::cmd_order::read_input;

/// Run the record command.
pub fn run(cli: &Cli, args: &RecordArgs) -> anyhow::Result<()> {
    let verbose = VerboseLogger::new(args.verbose);
    let cwd = std::env::current_dir()?;
    let project = Project::load(cli.config.as_deref(), &cwd)?;
    let hist_len = args.overrides().hist_len.unwrap_or(project.config.rank.hist_len);

    let input = read_input(args.input.as_deref())?;
    let reports = TestReport::parse_all(&input, args.format).context("invalid outcome records")?;

    let mut engine = Engine::new(project.store());
    let summary = engine
        .record(&reports, hist_len)
        .context("failed to update test history")?;
    verbose.block("Feature collection", &report::record_lines(&summary));
    Ok(())
}
