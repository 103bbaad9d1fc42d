// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Two-layer frame composition.
//!
//! Every call recomputes the full 640x480 frame: layer 1 is drawn over layer 0
//! and palette index 0 is transparent. Pixels are stored as four bytes,
//! `[b, g, r, 0]`, which is XRGB8888 in little-endian memory order.

use crate::core::VideoAddressSpace;
use crate::layer::LayerConfig;
use crate::render::layer_pixel;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Bytes per output pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Output frame in XRGB8888 byte order
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub const WIDTH: usize = SCREEN_WIDTH;
    pub const HEIGHT: usize = SCREEN_HEIGHT;
    /// Bytes per row
    pub const PITCH: usize = SCREEN_WIDTH * BYTES_PER_PIXEL;

    pub fn new() -> Self {
        Self {
            pixels: vec![0; Self::PITCH * Self::HEIGHT],
        }
    }

    /// Raw bytes, row-major, [`Self::PITCH`] bytes per row
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// `[r, g, b]` of the pixel at (`x`, `y`)
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * Self::WIDTH + x) * BYTES_PER_PIXEL;
        [self.pixels[i + 2], self.pixels[i + 1], self.pixels[i]]
    }

    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.pixels[y * Self::PITCH..(y + 1) * Self::PITCH]
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Framebuffer({}x{})", Self::WIDTH, Self::HEIGHT)
    }
}

/// Both layer configurations, decoded once per frame
#[derive(Debug, Clone, Copy)]
struct FrameLayers {
    layer0: LayerConfig,
    layer1: LayerConfig,
}

impl FrameLayers {
    fn capture(space: &VideoAddressSpace) -> Self {
        Self {
            layer0: space.layer_config(0),
            layer1: space.layer_config(1),
        }
    }

    fn index(&self, space: &VideoAddressSpace, x: u32, y: u32) -> u8 {
        match layer_pixel(space, &self.layer1, x, y) {
            0 => layer_pixel(space, &self.layer0, x, y),
            index => index,
        }
    }
}

/// Composited palette index at (`x`, `y`): layer 1 unless it is transparent.
pub fn final_index(space: &VideoAddressSpace, x: u32, y: u32) -> u8 {
    FrameLayers::capture(space).index(space, x, y)
}

/// Render a complete frame into `fb`.
pub fn compose(space: &VideoAddressSpace, fb: &mut Framebuffer) {
    let layers = FrameLayers::capture(space);
    let palette = space.palette();

    for y in 0..Framebuffer::HEIGHT {
        let row = fb.row_mut(y);
        for (x, px) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let index = layers.index(space, x as u32, y as u32);
            let [r, g, b] = palette.rgb(index);
            px[0] = b;
            px[1] = g;
            px[2] = r;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_reg(space: &mut VideoAddressSpace, layer: u32, reg: u32, value: u8) {
        space.write_u8(VideoAddressSpace::LAYER0_BASE + layer * 16 + reg, value);
    }

    /// Both layers in 8bpp bitmap mode, layer 0 at 0x00000 and layer 1 at
    /// 0x10000, stride 160 (640 bytes per row).
    fn bitmap_layers() -> VideoAddressSpace {
        let mut space = VideoAddressSpace::default();
        for layer in 0..2 {
            set_reg(&mut space, layer, 0, (7 << 5) | 1);
            set_reg(&mut space, layer, 4, 0x00);
            set_reg(&mut space, layer, 5, (layer * 0x40) as u8);
            set_reg(&mut space, layer, 6, 160);
        }
        space
    }

    #[test]
    fn layer1_falls_back_to_layer0_when_transparent() {
        let mut space = bitmap_layers();
        space.write_u8(0x00000, 5);
        space.write_u8(0x10000, 0);
        space.write_u8(0x00001, 5);
        space.write_u8(0x10001, 7);
        assert_eq!(final_index(&space, 0, 0), 5);
        assert_eq!(final_index(&space, 1, 0), 7);
    }

    #[test]
    fn compose_writes_bgrx_bytes() {
        let mut space = bitmap_layers();
        // index 2 = 0x800 (red), index 14 = 0x08f
        space.write_u8(0x00000, 2);
        space.write_u8(640 + 3, 14);
        let mut fb = Framebuffer::new();
        compose(&space, &mut fb);
        assert_eq!(&fb.as_bytes()[0..4], &[0x00, 0x00, 0x80, 0x00]);
        assert_eq!(fb.rgb(0, 0), [0x80, 0x00, 0x00]);
        assert_eq!(fb.rgb(3, 1), [0x00, 0x80, 0xF0]);
        assert_eq!(fb.rgb(1, 0), [0, 0, 0]);
    }

    #[test]
    fn compose_uses_live_palette() {
        let mut space = bitmap_layers();
        space.write_u8(0x00000, 1);
        space.write_u16(VideoAddressSpace::PALETTE_BASE + 2, 0x0A5C);
        let mut fb = Framebuffer::new();
        compose(&space, &mut fb);
        assert_eq!(fb.rgb(0, 0), [0xA0, 0x50, 0xC0]);
    }

    #[test]
    fn both_layers_disabled_gives_colour_zero() {
        let mut space = VideoAddressSpace::default();
        set_reg(&mut space, 0, 0, 0);
        space.write_u16(VideoAddressSpace::PALETTE_BASE, 0x0123);
        let mut fb = Framebuffer::new();
        compose(&space, &mut fb);
        assert_eq!(fb.rgb(0, 0), [0x10, 0x20, 0x30]);
        assert_eq!(fb.rgb(639, 479), [0x10, 0x20, 0x30]);
    }
}
