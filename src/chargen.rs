// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Character generator ROM image

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Size of the character ROM in bytes (512 glyphs of 8 bytes)
pub const CHAR_ROM_SIZE: usize = 0x1000;

#[derive(Debug, Error)]
pub enum ChargenError {
    #[error("character ROM must be 4096 bytes, got {0}")]
    WrongSize(usize),
    #[error("failed to read character ROM: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable 4KB font image, loaded once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct CharRom {
    data: Box<[u8; CHAR_ROM_SIZE]>,
}

impl CharRom {
    /// All-zero ROM, used when no font asset is available
    pub fn blank() -> Self {
        Self {
            data: Box::new([0; CHAR_ROM_SIZE]),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChargenError> {
        if bytes.len() != CHAR_ROM_SIZE {
            return Err(ChargenError::WrongSize(bytes.len()));
        }
        let mut rom = Self::blank();
        rom.data.copy_from_slice(bytes);
        Ok(rom)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ChargenError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn read(&self, offset: usize) -> u8 {
        self.data[offset % CHAR_ROM_SIZE]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for CharRom {
    fn default() -> Self {
        Self::blank()
    }
}

impl std::fmt::Debug for CharRom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CharRom({} bytes)", CHAR_ROM_SIZE)
    }
}
