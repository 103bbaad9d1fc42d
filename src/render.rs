// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-pixel layer evaluation.
//!
//! [`layer_pixel`] turns a screen coordinate into a palette index for one
//! layer. It only reads the address space, so a whole frame can be evaluated
//! against a shared borrow. Index 0 means transparent.
//!
//! Bitmap modes are treated as tile modes with a single screen-sized tile:
//! they skip scrolling and the map lookup, and address rows through the stride
//! register instead of the tile width.

use bitvec::prelude::*;

use crate::core::VideoAddressSpace;
use crate::layer::{LayerConfig, LayerKind, MapAttr};

/// Attributes of the map cell covering a pixel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    tile_index: u32,
    fg: u8,
    bg: u8,
    palette_offset: u8,
}

/// Palette index of `layer` at screen position (`x`, `y`). Only bit 0 of
/// `layer` selects the bank.
pub fn resolve_color(space: &VideoAddressSpace, layer: usize, x: u32, y: u32) -> u8 {
    layer_pixel(space, &space.layer_config(layer), x, y)
}

/// Palette index for a decoded layer configuration at (`x`, `y`).
pub fn layer_pixel(space: &VideoAddressSpace, cfg: &LayerConfig, x: u32, y: u32) -> u8 {
    if !cfg.enabled {
        return 0;
    }

    let mut eff_x = x / cfg.hscale;
    let mut eff_y = y / cfg.vscale;

    if cfg.kind != LayerKind::Bitmap {
        eff_x = (eff_x + cfg.hscroll) % (cfg.map_width * cfg.tile_width);
        eff_y = (eff_y + cfg.vscroll) % (cfg.map_height * cfg.tile_height);
    }

    let mut xx = eff_x % cfg.tile_width;
    let mut yy = eff_y % cfg.tile_height;

    let cell = match cfg.kind {
        LayerKind::Bitmap => Cell {
            palette_offset: cfg.bitmap_palette_offset,
            ..Cell::default()
        },
        LayerKind::Text | LayerKind::Tile => {
            let entry = cfg.map_base
                + (eff_y / cfg.tile_height * cfg.map_width + eff_x / cfg.tile_width) * 2;
            let byte0 = space.read_u8(entry);
            let byte1 = space.read_u8(entry + 1);
            match cfg.kind {
                LayerKind::Text if cfg.mode == 0 => Cell {
                    tile_index: byte0 as u32,
                    fg: byte1 & 0x0F,
                    bg: byte1 >> 4,
                    palette_offset: 0,
                },
                LayerKind::Text => Cell {
                    tile_index: byte0 as u32,
                    fg: byte1,
                    ..Cell::default()
                },
                _ => {
                    let attr = MapAttr::from_bits_truncate(byte1);
                    if attr.contains(MapAttr::VFLIP) {
                        yy ^= cfg.tile_height - 1;
                    }
                    if attr.contains(MapAttr::HFLIP) {
                        xx ^= cfg.tile_width - 1;
                    }
                    Cell {
                        tile_index: byte0 as u32 | ((attr & MapAttr::TILE_HI).bits() as u32) << 8,
                        palette_offset: (attr & MapAttr::PALETTE).bits() >> 4,
                        ..Cell::default()
                    }
                }
            }
        }
    };

    let bpp = cfg.bits_per_pixel;
    let tile_size = (cfg.tile_width * bpp * cfg.tile_height) >> 3;
    let row = match cfg.kind {
        LayerKind::Bitmap => yy * cfg.bitmap_stride * 4,
        _ => (yy * cfg.tile_width * bpp) >> 3,
    };
    let col = (xx * bpp) >> 3;
    let offset = cell.tile_index * tile_size + row + col;
    let byte = space.read_u8(cfg.tile_base + offset);

    let color = extract(byte, bpp, xx, &cell);
    apply_palette_offset(color, cell.palette_offset)
}

/// Pull the pixel at column `xx` out of a tile byte, leftmost pixel in the
/// most significant bits.
fn extract(byte: u8, bpp: u32, xx: u32, cell: &Cell) -> u8 {
    let bpp = bpp as usize;
    let slot = xx as usize % (8 / bpp);
    let bits = byte.view_bits::<Msb0>();
    if bpp == 1 {
        if bits[slot] { cell.fg } else { cell.bg }
    } else {
        bits[slot * bpp..(slot + 1) * bpp].load_be::<u8>()
    }
}

/// Move colours 1-15 into the 16-colour bank picked by `offset`.
fn apply_palette_offset(color: u8, offset: u8) -> u8 {
    if offset != 0 && (1..16).contains(&color) {
        color + (offset << 4)
    } else {
        color
    }
}
