// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and resolution.
//!
//! `forerun.toml` is deserialized into [`Config`]; CLI overrides are then
//! layered on top by [`RankSettings::resolve`], which performs all validation.

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::group::GroupLevel;
use crate::normalize::Normalization;
use crate::order::{RankMode, ReplayOrder};
use crate::score::WeightVector;

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config format version.
    #[serde(default = "Config::default_version")]
    pub version: u32,

    /// Ranking settings.
    #[serde(default)]
    pub rank: RankConfig,

    /// Change-tracking settings.
    #[serde(default)]
    pub changes: ChangesConfig,

    /// Cache location.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            rank: RankConfig::default(),
            changes: ChangesConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    fn default_version() -> u32 {
        1
    }
}

/// Weight as written in the config file: `"1-0-0"` or `[1, 0, 0]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WeightSpec {
    Text(String),
    Values(Vec<f64>),
}

impl WeightSpec {
    fn parse(&self) -> Result<WeightVector, ConfigError> {
        match self {
            WeightSpec::Text(s) => s.parse(),
            WeightSpec::Values(values) => match values.as_slice() {
                [time, fail, rel] => WeightVector::new(*time, *fail, *rel).ok_or_else(|| {
                    ConfigError::InvalidWeight {
                        input: format!("{values:?}"),
                    }
                }),
                _ => Err(ConfigError::InvalidWeight {
                    input: format!("{values:?}"),
                }),
            },
        }
    }
}

/// `[rank]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankConfig {
    /// Weights for (duration, recent failure, change relatedness).
    #[serde(default)]
    pub weight: Option<WeightSpec>,

    /// Group level token.
    #[serde(default)]
    pub level: Option<String>,

    /// Cap on `runs_since_failure`.
    #[serde(default = "RankConfig::default_hist_len")]
    pub hist_len: u32,

    /// Seed for random order.
    #[serde(default = "RankConfig::default_seed")]
    pub seed: u64,

    /// Replay file, relative to the project root.
    #[serde(default)]
    pub replay: Option<PathBuf>,

    /// Normalization strategy token.
    #[serde(default)]
    pub normalization: Option<String>,

    /// Markers that exempt an item from reordering.
    #[serde(default = "defaults::rank::constraint_markers")]
    pub constraint_markers: Vec<String>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            weight: None,
            level: None,
            hist_len: Self::default_hist_len(),
            seed: Self::default_seed(),
            replay: None,
            normalization: None,
            constraint_markers: defaults::rank::constraint_markers(),
        }
    }
}

impl RankConfig {
    pub(crate) fn default_hist_len() -> u32 {
        defaults::rank::HIST_LEN
    }

    pub(crate) fn default_seed() -> u64 {
        defaults::rank::SEED
    }
}

/// `[changes]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangesConfig {
    /// Tracked source patterns.
    #[serde(default = "defaults::changes::source")]
    pub source: Vec<String>,

    /// Patterns excluded from tracking.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            source: defaults::changes::source(),
            exclude: Vec::new(),
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Cache directory, relative to the project root.
    #[serde(default = "CacheConfig::default_dir")]
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

impl CacheConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(defaults::cache::DIR)
    }
}

/// Load and parse a config file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse config content; `path` is used for error messages only.
pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct RankOverrides {
    pub weight: Option<String>,
    pub level: Option<String>,
    pub seed: Option<u64>,
    pub replay: Option<PathBuf>,
    pub hist_len: Option<u32>,
}

/// Fully validated ranking settings.
#[derive(Debug, Clone)]
pub struct RankSettings {
    /// Normalized weights as resolved (zero vector selects random mode).
    pub weights: WeightVector,
    pub level: GroupLevel,
    pub hist_len: u32,
    pub seed: u64,
    pub normalization: Normalization,
    pub replay_path: Option<PathBuf>,
    pub mode: RankMode,
    pub constraint_markers: Vec<String>,
}

impl RankSettings {
    /// Merge config and overrides, validating every value.
    ///
    /// Relative replay paths from the config file resolve against `root`;
    /// those passed on the command line are used as given.
    pub fn resolve(
        config: &RankConfig,
        overrides: &RankOverrides,
        root: &Path,
    ) -> Result<Self, ConfigError> {
        let weights = match (&overrides.weight, &config.weight) {
            (Some(cli), _) => cli.parse()?,
            (None, Some(spec)) => spec.parse()?,
            (None, None) => defaults::rank::WEIGHT.parse()?,
        };

        let level: GroupLevel = overrides
            .level
            .as_deref()
            .or(config.level.as_deref())
            .unwrap_or(defaults::rank::LEVEL)
            .parse()?;

        let normalization: Normalization = config
            .normalization
            .as_deref()
            .unwrap_or(defaults::rank::NORMALIZATION)
            .parse()?;

        let hist_len = overrides.hist_len.unwrap_or(config.hist_len);
        let seed = overrides.seed.unwrap_or(config.seed);

        let replay_path = match (&overrides.replay, &config.replay) {
            (Some(cli), _) => Some(cli.clone()),
            (None, Some(path)) => Some(root.join(path)),
            (None, None) => None,
        };

        let mode = match &replay_path {
            Some(_) if weights.is_random() => return Err(ConfigError::ReplayWithRandom),
            Some(path) => RankMode::Replay(ReplayOrder::load(path)?),
            None if weights.is_random() => RankMode::Random { seed },
            None => RankMode::Score(weights),
        };

        Ok(Self {
            weights,
            level,
            hist_len,
            seed,
            normalization,
            replay_path,
            mode,
            constraint_markers: config.constraint_markers.clone(),
        })
    }
}

/// Default config written by `forerun init`.
pub fn default_template() -> String {
    format!(
        "version = 1\n\
         \n\
         [rank]\n\
         weight = \"{weight}\"\n\
         level = \"{level}\"\n\
         hist_len = {hist_len}\n\
         seed = {seed}\n\
         \n\
         [changes]\n\
         source = [\"**/*\"]\n",
        weight = defaults::rank::WEIGHT,
        level = defaults::rank::LEVEL,
        hist_len = defaults::rank::HIST_LEN,
        seed = defaults::rank::SEED,
    )
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
