// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! 256-entry palette store.
//!
//! Every entry is a 12-bit `0x0RGB` colour stored as two little-endian bytes,
//! so the whole store is 512 bytes and is mapped byte-for-byte into the video
//! address space at 0x40200.

/// Number of palette entries
pub const PALETTE_ENTRIES: usize = 256;

/// Size of the palette store in bytes
pub const PALETTE_BYTES: usize = PALETTE_ENTRIES * 2;

/// Palette loaded on every controller reset.
#[rustfmt::skip]
pub const DEFAULT_PALETTE: [u16; PALETTE_ENTRIES] = [
    0x000, 0xfff, 0x800, 0xafe, 0xc4c, 0x0c5, 0x00a, 0xee7, 0xd85, 0x640, 0xf77, 0x333, 0x777, 0xaf6, 0x08f, 0xbbb,
    0x000, 0x111, 0x222, 0x333, 0x444, 0x555, 0x666, 0x777, 0x888, 0x999, 0xaaa, 0xbbb, 0xccc, 0xddd, 0xeee, 0xfff,
    0x211, 0x433, 0x644, 0x866, 0xa88, 0xc99, 0xfbb, 0x211, 0x422, 0x633, 0x844, 0xa55, 0xc66, 0xf77, 0x200, 0x411,
    0x611, 0x822, 0xa22, 0xc33, 0xf33, 0x200, 0x400, 0x600, 0x800, 0xa00, 0xc00, 0xf00, 0x221, 0x443, 0x664, 0x886,
    0xaa8, 0xcc9, 0xfeb, 0x211, 0x432, 0x653, 0x874, 0xa95, 0xcb6, 0xfd7, 0x210, 0x431, 0x651, 0x862, 0xa82, 0xca3,
    0xfc3, 0x210, 0x430, 0x640, 0x860, 0xa80, 0xc90, 0xfb0, 0x121, 0x343, 0x564, 0x786, 0x9a8, 0xbc9, 0xdfb, 0x121,
    0x342, 0x463, 0x684, 0x8a5, 0x9c6, 0xbf7, 0x120, 0x241, 0x461, 0x582, 0x6a2, 0x8c3, 0x9f3, 0x120, 0x240, 0x360,
    0x480, 0x5a0, 0x6c0, 0x7f0, 0x121, 0x343, 0x465, 0x686, 0x8a8, 0x9ca, 0xbfc, 0x121, 0x242, 0x364, 0x485, 0x5a6,
    0x6c8, 0x7f9, 0x020, 0x141, 0x162, 0x283, 0x2a4, 0x3c5, 0x3f6, 0x020, 0x041, 0x061, 0x082, 0x0a2, 0x0c3, 0x0f3,
    0x122, 0x344, 0x466, 0x688, 0x8aa, 0x9cc, 0xbff, 0x122, 0x244, 0x366, 0x488, 0x5aa, 0x6cc, 0x7ff, 0x022, 0x144,
    0x166, 0x288, 0x2aa, 0x3cc, 0x3ff, 0x022, 0x044, 0x066, 0x088, 0x0aa, 0x0cc, 0x0ff, 0x112, 0x334, 0x456, 0x668,
    0x88a, 0x9ac, 0xbcf, 0x112, 0x224, 0x346, 0x458, 0x56a, 0x68c, 0x79f, 0x002, 0x114, 0x126, 0x238, 0x24a, 0x35c,
    0x36f, 0x002, 0x014, 0x016, 0x028, 0x02a, 0x03c, 0x03f, 0x112, 0x334, 0x546, 0x768, 0x98a, 0xb9c, 0xdbf, 0x112,
    0x324, 0x436, 0x648, 0x85a, 0x96c, 0xb7f, 0x102, 0x214, 0x416, 0x528, 0x62a, 0x83c, 0x93f, 0x102, 0x204, 0x306,
    0x408, 0x50a, 0x60c, 0x70f, 0x212, 0x434, 0x646, 0x868, 0xa8a, 0xc9c, 0xfbe, 0x211, 0x423, 0x635, 0x847, 0xa59,
    0xc6b, 0xf7d, 0x201, 0x413, 0x615, 0x826, 0xa28, 0xc3a, 0xf3c, 0x201, 0x403, 0x604, 0x806, 0xa08, 0xc09, 0xf0b,
];

/// Byte-addressable palette store
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    bytes: [u8; PALETTE_BYTES],
}

impl Palette {
    /// Create a palette holding [`DEFAULT_PALETTE`]
    pub fn new() -> Self {
        let mut palette = Self {
            bytes: [0; PALETTE_BYTES],
        };
        palette.reset();
        palette
    }

    /// Reload the default table
    pub fn reset(&mut self) {
        for (slot, entry) in self.bytes.chunks_exact_mut(2).zip(DEFAULT_PALETTE) {
            slot.copy_from_slice(&entry.to_le_bytes());
        }
    }

    pub fn read(&self, offset: usize) -> u8 {
        self.bytes[offset % PALETTE_BYTES]
    }

    pub fn write(&mut self, offset: usize, value: u8) {
        self.bytes[offset % PALETTE_BYTES] = value;
    }

    /// Packed 12-bit entry for a colour index
    pub fn entry(&self, index: u8) -> u16 {
        let i = index as usize * 2;
        u16::from_le_bytes([self.bytes[i], self.bytes[i + 1]])
    }

    /// Expand an entry to 8-bit `[r, g, b]`.
    ///
    /// Nibbles are shifted into the high half only; the low nibble stays zero.
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        let entry = self.entry(index);
        [
            (((entry >> 8) & 0xF) << 4) as u8,
            (((entry >> 4) & 0xF) << 4) as u8,
            ((entry & 0xF) << 4) as u8,
        ]
    }

    /// Raw store, two bytes per entry
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn load(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(PALETTE_BYTES);
        self.bytes[..len].copy_from_slice(&bytes[..len]);
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette")
            .field("entries", &PALETTE_ENTRIES)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entries_are_little_endian() {
        let palette = Palette::new();
        // entry 1 = 0xfff
        assert_eq!(palette.read(2), 0xff);
        assert_eq!(palette.read(3), 0x0f);
        // entry 2 = 0x800
        assert_eq!(palette.read(4), 0x00);
        assert_eq!(palette.read(5), 0x08);
        assert_eq!(palette.entry(255), 0xf0b);
    }

    #[test]
    fn rgb_uses_high_nibble_only() {
        let palette = Palette::new();
        assert_eq!(palette.rgb(0), [0, 0, 0]);
        assert_eq!(palette.rgb(1), [0xf0, 0xf0, 0xf0]);
        assert_eq!(palette.rgb(2), [0x80, 0x00, 0x00]);
        assert_eq!(palette.rgb(14), [0x00, 0x80, 0xf0]);
    }

    #[test]
    fn writes_change_entries_until_reset() {
        let mut palette = Palette::new();
        palette.write(2, 0x34);
        palette.write(3, 0x12);
        assert_eq!(palette.entry(1), 0x1234);
        palette.reset();
        assert_eq!(palette.entry(1), 0x0fff);
    }
}
