// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.
//! Individual config structs delegate to these constants via their `default_*` methods.

/// Config file name searched for by discovery.
pub const CONFIG_FILE: &str = "forerun.toml";

/// Default ranking settings.
pub mod rank {
    /// Default weight: fastest tests first.
    pub const WEIGHT: &str = "1-0-0";

    /// Default group level (each parameterized case is its own group).
    pub const LEVEL: &str = "param";

    /// Default amount of passing runs remembered per test since its last failure.
    pub const HIST_LEN: u32 = 50;

    /// Default seed for random order.
    pub const SEED: u64 = 0;

    /// Default normalization strategy.
    pub const NORMALIZATION: &str = "min-max";

    /// Markers that exempt an item from reordering.
    pub fn constraint_markers() -> Vec<String> {
        vec!["order".to_string(), "dependency".to_string()]
    }
}

/// Default change-tracking patterns.
pub mod changes {
    /// Every non-ignored file under the root is tracked.
    pub fn source() -> Vec<String> {
        vec!["**/*".to_string()]
    }
}

/// Default cache location.
pub mod cache {
    /// Cache directory, relative to the project root.
    pub const DIR: &str = ".forerun";

    /// Namespace prefix for every cache key.
    pub const NAMESPACE: &str = "forerun_data";
}

/// Decimal places kept for recorded durations.
pub const DURATION_PRECISION: i32 = 3;
