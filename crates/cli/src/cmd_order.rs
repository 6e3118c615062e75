// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Order command implementation.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;

use forerun::Engine;
use forerun::cli::{Cli, OrderArgs, OutputFormat};
use forerun::collection::Collection;
use forerun::config::RankSettings;
use forerun::project::Project;
use forerun::report;
use forerun::verbose::VerboseLogger;

/// Run the order command.
pub fn run(cli: &Cli, args: &OrderArgs) -> anyhow::Result<()> {
    let verbose = VerboseLogger::new(args.verbose);
    let cwd = std::env::current_dir()?;
    let project = Project::load(cli.config.as_deref(), &cwd)?;

    // Validate everything before touching the collection
    let settings =
        RankSettings::resolve(&project.config.rank, &args.rank.overrides(), &project.root)?;
    let detector = project.detector()?;
    config_section(&verbose, &project, &settings);

    let input = read_input(args.input.as_deref())?;
    let mut collection = Collection::parse(&input, args.format).context("invalid test collection")?;
    let constraints = collection.constrained(&settings.constraint_markers);

    let mut engine = Engine::new(project.store());
    let diagnostics =
        engine.prioritize_or_keep(&settings, &mut collection, &detector, &constraints)?;
    verbose.block("Prioritization", &report::diagnostics_lines(&diagnostics));

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            for item in &collection.items {
                writeln!(handle, "{}", item.id)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, &collection.ids())?;
            writeln!(handle)?;
        }
    }
    handle.flush()?;
    Ok(())
}

fn config_section(verbose: &VerboseLogger, project: &Project, settings: &RankSettings) {
    if !verbose.is_enabled() {
        return;
    }
    let source = match &project.config_path {
        Some(path) => path.strip_prefix(&project.root).unwrap_or(path).display().to_string(),
        None => "(defaults)".to_string(),
    };
    let mut lines = vec![format!("Config: {source}")];
    lines.extend(report::settings_lines(settings));
    verbose.block("Configuration", &lines);
}

/// Read a file, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
