// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layer register banks and their decoded form.
//!
//! Register layout (per layer, 16 bytes):
//!
//! | Reg | Bits | Meaning |
//! |-----|------|---------|
//! | 0   | 0    | enable |
//! | 0   | 1-2  | horizontal scale - 1 |
//! | 0   | 3-4  | vertical scale - 1 |
//! | 0   | 5-7  | mode |
//! | 1   | 0-1  | map width (32 << n) |
//! | 1   | 2-3  | map height (32 << n) |
//! | 1   | 4    | tile width (8 << n), tile modes |
//! | 1   | 5    | tile height (8 << n), tile modes |
//! | 2,3 | -    | map base (`r2 << 2 \| r3 << 10`) |
//! | 4,5 | -    | tile base (`r4 << 2 \| r5 << 10`) |
//! | 6,7 | -    | hscroll (12 bit); bitmap: stride / palette offset |
//! | 8,9 | -    | vscroll (12 bit) |

use bitflags::bitflags;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Number of layers
pub const LAYER_COUNT: usize = 2;

/// Registers per layer
pub const LAYER_REGISTERS: usize = 16;

/// Tile base the reset state points layer 0 at (character ROM)
pub const DEFAULT_TILE_BASE: u32 = 0x20000;

bitflags! {
    /// Attribute bits held in the second byte of a tile-mode map entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MapAttr: u8 {
        const TILE_HI = 0x03;
        const HFLIP = 0x04;
        const VFLIP = 0x08;
        const PALETTE = 0xF0;
    }
}

/// Rendering family selected by the mode field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Modes 0 and 1: 8x8 1bpp glyphs with per-cell colours
    Text,
    /// Modes 2-4: 2/4/8bpp tiles with flip and palette offset
    Tile,
    /// Modes 5-7: one screen-sized tile with a configurable stride
    Bitmap,
}

impl LayerKind {
    fn from_mode(mode: u8) -> Self {
        match mode & 0x07 {
            0 | 1 => LayerKind::Text,
            2..=4 => LayerKind::Tile,
            _ => LayerKind::Bitmap,
        }
    }
}

/// Decoded view of one register bank, consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerConfig {
    pub enabled: bool,
    pub mode: u8,
    pub kind: LayerKind,
    pub bits_per_pixel: u32,
    pub hscale: u32,
    pub vscale: u32,
    /// Map size in tiles (unused in bitmap mode)
    pub map_width: u32,
    pub map_height: u32,
    /// Tile size in pixels
    pub tile_width: u32,
    pub tile_height: u32,
    pub map_base: u32,
    pub tile_base: u32,
    pub hscroll: u32,
    pub vscroll: u32,
    /// Bitmap line stride in units of 4 bytes
    pub bitmap_stride: u32,
    /// Bitmap palette offset (register 7 low nibble)
    pub bitmap_palette_offset: u8,
}

impl LayerConfig {
    /// Decode a register bank. Every bit pattern is valid.
    pub fn decode(regs: &[u8; LAYER_REGISTERS]) -> Self {
        let mode = regs[0] >> 5;
        let kind = LayerKind::from_mode(mode);

        let bits_per_pixel = match mode {
            0 | 1 => 1,
            2 | 5 => 2,
            3 | 6 => 4,
            _ => 8,
        };

        let (map_width, map_height) = match kind {
            LayerKind::Bitmap => (0, 0),
            _ => (
                1 << ((regs[1] & 0x03) as u32 + 5),
                1 << (((regs[1] >> 2) & 0x03) as u32 + 5),
            ),
        };

        let (tile_width, tile_height) = match kind {
            LayerKind::Text => (8, 8),
            LayerKind::Tile => (
                1 << (((regs[1] >> 4) & 0x01) as u32 + 3),
                1 << (((regs[1] >> 5) & 0x01) as u32 + 3),
            ),
            LayerKind::Bitmap => (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
        };

        Self {
            enabled: regs[0] & 0x01 != 0,
            mode,
            kind,
            bits_per_pixel,
            hscale: ((regs[0] >> 1) & 0x03) as u32 + 1,
            vscale: ((regs[0] >> 3) & 0x03) as u32 + 1,
            map_width,
            map_height,
            tile_width,
            tile_height,
            map_base: (regs[2] as u32) << 2 | (regs[3] as u32) << 10,
            tile_base: (regs[4] as u32) << 2 | (regs[5] as u32) << 10,
            hscroll: regs[6] as u32 | ((regs[7] & 0x0F) as u32) << 8,
            vscroll: regs[8] as u32 | ((regs[9] & 0x0F) as u32) << 8,
            bitmap_stride: regs[6] as u32,
            bitmap_palette_offset: regs[7] & 0x0F,
        }
    }
}

/// Both layer register banks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerBank {
    regs: [[u8; LAYER_REGISTERS]; LAYER_COUNT],
}

impl LayerBank {
    /// Create a bank in its reset state
    pub fn new() -> Self {
        let mut bank = Self {
            regs: [[0; LAYER_REGISTERS]; LAYER_COUNT],
        };
        bank.reset();
        bank
    }

    /// Layer 0 enabled in text mode 0 with tiles from the character ROM,
    /// everything else zero.
    pub fn reset(&mut self) {
        self.regs = [[0; LAYER_REGISTERS]; LAYER_COUNT];
        self.regs[0][0] = 0x01;
        // register 4 keeps only bits 2..9 of the base, which are zero here
        self.regs[0][4] = (DEFAULT_TILE_BASE >> 2) as u8;
        self.regs[0][5] = (DEFAULT_TILE_BASE >> 10) as u8;
    }

    // Layers are selected by bit 0 of the index, as address bit 4 does in
    // the register window; higher bits are ignored.
    fn bank(layer: usize) -> usize {
        layer & 1
    }

    pub fn read(&self, layer: usize, reg: usize) -> u8 {
        self.regs[Self::bank(layer)][reg % LAYER_REGISTERS]
    }

    pub fn write(&mut self, layer: usize, reg: usize, value: u8) {
        self.regs[Self::bank(layer)][reg % LAYER_REGISTERS] = value;
    }

    /// Registers of layer `layer & 1`
    pub fn registers(&self, layer: usize) -> &[u8; LAYER_REGISTERS] {
        &self.regs[Self::bank(layer)]
    }

    pub fn config(&self, layer: usize) -> LayerConfig {
        LayerConfig::decode(self.registers(layer))
    }
}

impl Default for LayerBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_state_points_layer0_at_char_rom() {
        let bank = LayerBank::new();
        let cfg = bank.config(0);
        assert!(cfg.enabled);
        assert_eq!(cfg.kind, LayerKind::Text);
        assert_eq!(cfg.tile_base, DEFAULT_TILE_BASE);
        assert_eq!(bank.read(0, 5), 0x80);
        assert!(!bank.config(1).enabled);
        assert_eq!(bank.registers(1), &[0; LAYER_REGISTERS]);
    }

    #[test]
    fn decodes_scale_mode_and_dimensions() {
        let mut regs = [0u8; LAYER_REGISTERS];
        // mode 3, vscale 4, hscale 2, enabled
        regs[0] = (3 << 5) | (3 << 3) | (1 << 1) | 1;
        // map 128x64, tile 16x8
        regs[1] = 0x02 | (0x01 << 2) | 0x10;
        let cfg = LayerConfig::decode(&regs);
        assert_eq!(cfg.kind, LayerKind::Tile);
        assert_eq!(cfg.bits_per_pixel, 4);
        assert_eq!((cfg.hscale, cfg.vscale), (2, 4));
        assert_eq!((cfg.map_width, cfg.map_height), (128, 64));
        assert_eq!((cfg.tile_width, cfg.tile_height), (16, 8));
    }

    #[test]
    fn text_mode_ignores_tile_size_bits() {
        let mut regs = [0u8; LAYER_REGISTERS];
        regs[0] = 1;
        regs[1] = 0x30 | 0x0F;
        let cfg = LayerConfig::decode(&regs);
        assert_eq!((cfg.tile_width, cfg.tile_height), (8, 8));
        assert_eq!((cfg.map_width, cfg.map_height), (256, 256));
    }

    #[test]
    fn bitmap_mode_spans_screen() {
        let mut regs = [0u8; LAYER_REGISTERS];
        regs[0] = (7 << 5) | 1;
        regs[6] = 80;
        regs[7] = 0x3A;
        let cfg = LayerConfig::decode(&regs);
        assert_eq!(cfg.kind, LayerKind::Bitmap);
        assert_eq!(cfg.bits_per_pixel, 8);
        assert_eq!((cfg.tile_width, cfg.tile_height), (640, 480));
        assert_eq!(cfg.bitmap_stride, 80);
        assert_eq!(cfg.bitmap_palette_offset, 0x0A);
    }

    #[test]
    fn bases_and_scroll_combine_register_pairs() {
        let mut regs = [0u8; LAYER_REGISTERS];
        regs[2] = 0x01;
        regs[3] = 0x02;
        regs[4] = 0xFF;
        regs[5] = 0xFF;
        regs[6] = 0x34;
        regs[7] = 0xF2;
        regs[8] = 0x78;
        regs[9] = 0x15;
        let cfg = LayerConfig::decode(&regs);
        assert_eq!(cfg.map_base, 0x804);
        assert_eq!(cfg.tile_base, 0x3FFFC);
        assert_eq!(cfg.hscroll, 0x234);
        assert_eq!(cfg.vscroll, 0x578);
    }

    #[test]
    fn layer_index_selects_by_low_bit() {
        let mut bank = LayerBank::new();
        bank.write(3, 6, 0x42);
        assert_eq!(bank.read(1, 6), 0x42);
        assert_eq!(bank.read(0, 6), 0x00);
        assert_eq!(bank.registers(2), bank.registers(0));
        assert!(!bank.config(3).enabled);
    }

    #[test]
    fn map_attr_splits_entry_byte() {
        let attr = MapAttr::from_bits_truncate(0x5E);
        assert!(attr.contains(MapAttr::HFLIP));
        assert!(attr.contains(MapAttr::VFLIP));
        assert_eq!((attr & MapAttr::TILE_HI).bits(), 0x02);
        assert_eq!((attr & MapAttr::PALETTE).bits() >> 4, 0x05);
    }
}
