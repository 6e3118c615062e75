// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test prioritization engine.
//!
//! Reorders a discovered test collection so failures and information-rich
//! tests run earlier, without changing which tests run or their outcome.

pub mod change;
pub mod cli;
pub mod collection;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod feedback;
pub mod file_reader;
pub mod group;
pub mod normalize;
pub mod order;
pub mod project;
pub mod report;
pub mod score;
pub mod store;
pub mod verbose;
pub mod walker;

#[cfg(test)]
pub mod test_utils;

pub use collection::{Collection, TestItem, TestReport};
pub use engine::{Diagnostics, Engine};
pub use error::{ConfigError, Error};
