// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

use log::debug;

use crate::chargen::CharRom;
use crate::layer::{LayerBank, LayerConfig};
use crate::palette::Palette;

/// Target of a video address after decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ram(usize),
    CharRom(usize),
    Layer { layer: usize, reg: usize },
    Palette(usize),
    Unmapped,
}

/// The controller's internal address space: 128KB video RAM, the character
/// ROM, both layer register banks and the palette.
pub struct VideoAddressSpace {
    vram: Vec<u8>,
    char_rom: CharRom,
    layers: LayerBank,
    palette: Palette,
}

impl VideoAddressSpace {
    pub const VRAM_SIZE: usize = 0x20000; // 128KB
    pub const CHAR_ROM_BASE: u32 = 0x20000;
    pub const CHAR_ROM_END: u32 = 0x21000;
    pub const LAYER0_BASE: u32 = 0x40000;
    pub const LAYER1_BASE: u32 = 0x40010;
    pub const LAYER_END: u32 = 0x40020;
    pub const PALETTE_BASE: u32 = 0x40200;
    pub const PALETTE_END: u32 = 0x40400;

    /// Value returned for reads from unassigned addresses
    pub const UNMAPPED: u8 = 0xFF;

    pub fn new(char_rom: CharRom) -> Self {
        Self {
            vram: vec![0; Self::VRAM_SIZE],
            char_rom,
            layers: LayerBank::new(),
            palette: Palette::new(),
        }
    }

    /// Map an address to its backing store. Total over all `u32` values.
    pub fn decode(addr: u32) -> Region {
        match addr {
            a if a < Self::CHAR_ROM_BASE => Region::Ram(a as usize),
            a if a < Self::CHAR_ROM_END => Region::CharRom((a & 0xFFF) as usize),
            a if a < Self::LAYER0_BASE => Region::Unmapped,
            a if a < Self::LAYER1_BASE => Region::Layer {
                layer: 0,
                reg: (a & 0xF) as usize,
            },
            a if a < Self::LAYER_END => Region::Layer {
                layer: 1,
                reg: (a & 0xF) as usize,
            },
            a if a < Self::PALETTE_BASE => Region::Unmapped,
            a if a < Self::PALETTE_END => Region::Palette((a & 0x1FF) as usize),
            _ => Region::Unmapped,
        }
    }

    /// Read a byte from the video address space
    pub fn read_u8(&self, addr: u32) -> u8 {
        match Self::decode(addr) {
            Region::Ram(offset) => self.vram[offset],
            Region::CharRom(offset) => self.char_rom.read(offset),
            Region::Layer { layer, reg } => self.layers.read(layer, reg),
            Region::Palette(offset) => self.palette.read(offset),
            Region::Unmapped => Self::UNMAPPED,
        }
    }

    /// Write a byte to the video address space
    pub fn write_u8(&mut self, addr: u32, value: u8) {
        match Self::decode(addr) {
            Region::Ram(offset) => self.vram[offset] = value,
            Region::Layer { layer, reg } => self.layers.write(layer, reg, value),
            Region::Palette(offset) => self.palette.write(offset, value),
            // ROM and unassigned space ignore writes
            Region::CharRom(_) | Region::Unmapped => {}
        }
    }

    /// Read little-endian u16
    pub fn read_u16(&self, addr: u32) -> u16 {
        let lo = self.read_u8(addr) as u16;
        let hi = self.read_u8(addr.wrapping_add(1)) as u16;
        lo | (hi << 8)
    }

    /// Write little-endian u16
    pub fn write_u16(&mut self, addr: u32, v: u16) {
        self.write_u8(addr, (v & 0xFF) as u8);
        self.write_u8(addr.wrapping_add(1), (v >> 8) as u8);
    }

    /// Restore layer registers and palette. VRAM and ROM are left alone.
    pub fn reset(&mut self) {
        debug!("video address space reset: default layers and palette");
        self.layers.reset();
        self.palette.reset();
    }

    pub fn layer_config(&self, layer: usize) -> LayerConfig {
        self.layers.config(layer)
    }

    pub fn layers(&self) -> &LayerBank {
        &self.layers
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    pub fn char_rom(&self) -> &CharRom {
        &self.char_rom
    }

    /// Bulk-copy bytes into video RAM starting at `offset`, clipped to the RAM size
    pub fn load_vram(&mut self, offset: usize, data: &[u8]) {
        if offset >= Self::VRAM_SIZE {
            return;
        }
        let end = (offset + data.len()).min(Self::VRAM_SIZE);
        self.vram[offset..end].copy_from_slice(&data[..end - offset]);
    }

    pub(crate) fn load_palette(&mut self, bytes: &[u8]) {
        self.palette.load(bytes);
    }

    pub(crate) fn load_layer(&mut self, layer: usize, regs: &[u8]) {
        for (reg, &value) in regs.iter().enumerate().take(crate::layer::LAYER_REGISTERS) {
            self.layers.write(layer, reg, value);
        }
    }
}

impl Default for VideoAddressSpace {
    fn default() -> Self {
        Self::new(CharRom::blank())
    }
}
