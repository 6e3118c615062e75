// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command implementation.

use forerun::cli::InitArgs;
use forerun::config::{self, defaults::CONFIG_FILE};
use forerun::error::ConfigError;

/// Write a default forerun.toml in the current directory.
pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let path = std::env::current_dir()?.join(CONFIG_FILE);
    if path.exists() && !args.force {
        return Err(ConfigError::AlreadyExists {
            path: CONFIG_FILE.into(),
        }
        .into());
    }
    std::fs::write(&path, config::default_template())?;
    println!("Created {}", CONFIG_FILE);
    Ok(())
}
