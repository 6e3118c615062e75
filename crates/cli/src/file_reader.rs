// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File reading with size-based strategy, used for content hashing.
//!
// Allow unsafe_code for memory-mapped I/O (required by memmap2).
// Safety justification:
// 1. File handle is valid (just opened)
// 2. We don't mutate the mapped memory
// 3. A file modified while hashed is picked up as changed on the next run
#![allow(unsafe_code)]
//!
//! - < 64KB: Direct read into buffer
//! - >= 64KB: Memory-mapped I/O

use std::fs::{self, File};
use std::io;
use std::path::Path;

use memmap2::Mmap;

/// Files at or above this size are memory-mapped.
pub const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Raw bytes of a file, either owned or memory-mapped.
pub enum FileContent {
    /// Small file read into memory.
    Owned(Vec<u8>),
    /// Large file memory-mapped.
    Mapped(Mmap),
}

impl FileContent {
    /// Read file using appropriate strategy based on size.
    pub fn read(path: &Path) -> io::Result<Self> {
        let size = fs::metadata(path)?.len();

        if size < MMAP_THRESHOLD {
            Ok(FileContent::Owned(fs::read(path)?))
        } else {
            let file = File::open(path)?;
            // SAFETY: File handle is valid (just opened) and we don't mutate the mapped memory.
            let mmap = unsafe { Mmap::map(&file)? };
            Ok(FileContent::Mapped(mmap))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Owned(bytes) => bytes,
            FileContent::Mapped(mmap) => mmap,
        }
    }
}

#[cfg(test)]
#[path = "file_reader_tests.rs"]
mod tests;
