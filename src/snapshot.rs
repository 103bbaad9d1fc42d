// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Save-state images of the controller.
//!
//! Layout of the binary form:
//!
//! ```text
//! "VSNP" | version (1) | vram (0x20000) | palette (0x200) | layers (2 x 16)
//!        | ptr0 (3, LE) | inc0 | ptr1 (3, LE) | inc1 | addrsel
//! ```

use std::fs;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::core::VideoAddressSpace;
use crate::io::AddressPointer;
use crate::layer::{LAYER_COUNT, LAYER_REGISTERS};
use crate::palette::PALETTE_BYTES;

const MAGIC: &[u8; 4] = b"VSNP";
const VERSION: u8 = 1;
const IO_BYTES: usize = 9;
const HEADER_BYTES: usize = 5;

/// Total size of an encoded snapshot
pub const SNAPSHOT_SIZE: usize = HEADER_BYTES
    + VideoAddressSpace::VRAM_SIZE
    + PALETTE_BYTES
    + LAYER_COUNT * LAYER_REGISTERS
    + IO_BYTES;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("not a snapshot image")]
    BadMagic,
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
    #[error("snapshot is {actual} bytes, expected {expected}")]
    Truncated { expected: usize, actual: usize },
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Register state of the CPU-facing ports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
pub struct IoState {
    pub addresses: [u32; 2],
    pub increments: [u8; 2],
    pub addr_sel: bool,
}

impl IoState {
    pub fn pointers(&self) -> [AddressPointer; 2] {
        [0, 1].map(|i| AddressPointer {
            address: self.addresses[i],
            increment: self.increments[i],
        })
    }
}

/// Everything a save state needs. The character ROM is not included; it is
/// reloaded from the font asset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-spec", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub vram: Vec<u8>,
    pub palette: Vec<u8>,
    pub layers: [[u8; LAYER_REGISTERS]; LAYER_COUNT],
    pub io: IoState,
}

impl Snapshot {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_SIZE);
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&self.vram);
        out.resize(HEADER_BYTES + VideoAddressSpace::VRAM_SIZE, 0);
        out.extend_from_slice(&self.palette);
        out.resize(HEADER_BYTES + VideoAddressSpace::VRAM_SIZE + PALETTE_BYTES, 0);
        for layer in &self.layers {
            out.extend_from_slice(layer);
        }
        for i in 0..2 {
            out.extend_from_slice(&self.io.addresses[i].to_le_bytes()[..3]);
            out.push(self.io.increments[i]);
        }
        out.push(self.io.addr_sel as u8);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        if bytes.len() < HEADER_BYTES || &bytes[..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }
        if bytes[4] != VERSION {
            return Err(SnapshotError::UnsupportedVersion(bytes[4]));
        }
        if bytes.len() != SNAPSHOT_SIZE {
            return Err(SnapshotError::Truncated {
                expected: SNAPSHOT_SIZE,
                actual: bytes.len(),
            });
        }

        let (vram, rest) = bytes[HEADER_BYTES..].split_at(VideoAddressSpace::VRAM_SIZE);
        let (palette, rest) = rest.split_at(PALETTE_BYTES);
        let (layer_bytes, io) = rest.split_at(LAYER_COUNT * LAYER_REGISTERS);

        let mut layers = [[0u8; LAYER_REGISTERS]; LAYER_COUNT];
        for (dst, src) in layers.iter_mut().zip(layer_bytes.chunks_exact(LAYER_REGISTERS)) {
            dst.copy_from_slice(src);
        }

        let pointer = |at: usize| u32::from_le_bytes([io[at], io[at + 1], io[at + 2], 0]);
        Ok(Self {
            vram: vram.to_vec(),
            palette: palette.to_vec(),
            layers,
            io: IoState {
                addresses: [pointer(0), pointer(4)],
                increments: [io[3], io[7]],
                addr_sel: io[8] & 1 != 0,
            },
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes())?;
        debug!("snapshot written to {}", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes).inspect_err(|e| warn!("{}: {e}", path.display()))
    }

    #[cfg(feature = "serde-spec")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    #[cfg(feature = "serde-spec")]
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut vram = vec![0u8; VideoAddressSpace::VRAM_SIZE];
        vram[0x1234] = 0x56;
        let mut layers = [[0u8; LAYER_REGISTERS]; LAYER_COUNT];
        layers[1][3] = 0x9A;
        Snapshot {
            vram,
            palette: vec![0x11; PALETTE_BYTES],
            layers,
            io: IoState {
                addresses: [0xABCDE, 0x00042],
                increments: [3, 15],
                addr_sel: true,
            },
        }
    }

    #[test]
    fn binary_image_has_fixed_size() {
        assert_eq!(sample().to_bytes().len(), SNAPSHOT_SIZE);
    }

    #[test]
    fn decodes_encoded_image() {
        let snap = sample();
        assert_eq!(Snapshot::from_bytes(&snap.to_bytes()).unwrap(), snap);
    }

    #[test]
    fn rejects_foreign_data() {
        assert!(matches!(
            Snapshot::from_bytes(b"PNG\0\0\0"),
            Err(SnapshotError::BadMagic)
        ));
        let mut bytes = sample().to_bytes();
        bytes[4] = 9;
        assert!(matches!(
            Snapshot::from_bytes(&bytes),
            Err(SnapshotError::UnsupportedVersion(9))
        ));
        bytes[4] = VERSION;
        bytes.truncate(100);
        assert!(matches!(
            Snapshot::from_bytes(&bytes),
            Err(SnapshotError::Truncated { actual: 100, .. })
        ));
    }
}
