// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types.
//!
//! Configuration problems are reported before any test is touched.
//! Degenerate data (empty history, first run, flat features) is never an error.

use std::path::PathBuf;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Invalid or incompatible settings, detected before ordering starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Cannot parse input for `--weight`: {input:?}. \
         Valid examples: 1-0-0, 0.4-0.2-0.2, and 2-7-1."
    )]
    InvalidWeight { input: String },

    #[error("Invalid input for `--level`: {input:?}. Expected one of: param, method, file, folder.")]
    InvalidLevel { input: String },

    #[error("Invalid input for `normalization`: {input:?}. Expected one of: min-max, z-score.")]
    InvalidNormalization { input: String },

    #[error("File provided to `--replay` cannot be read: {}", path.display())]
    Replay {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`--replay` cannot be used together with random order (weight 0-0-0)")]
    ReplayWithRandom,

    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{} already exists (use --force to overwrite)", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("invalid glob pattern {pattern:?}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Failure of the persistent cache.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cache I/O failed at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache record {key:?} could not be encoded")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure surfaced by the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to hash {}", path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for errors that must abort the session rather than fall back.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
