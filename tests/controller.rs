// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end checks driving the controller only through its CPU ports.

use pretty_assertions::assert_eq;
use vera_core::chargen::CHAR_ROM_SIZE;
use vera_core::compositor::final_index;
use vera_core::core::{Region, VideoAddressSpace};
use vera_core::io::{PORT_ADDR_HI, PORT_ADDR_LO, PORT_ADDR_MID, PORT_CTRL, PORT_DATA0, PORT_DATA1};
use vera_core::layer::LayerBank;
use vera_core::palette::{DEFAULT_PALETTE, Palette};
use vera_core::{CharRom, Vdp, resolve_color};

const GLYPH_A: [u8; 8] = [0x18, 0x3C, 0x66, 0x7E, 0x66, 0x66, 0x66, 0x00];

fn seek(vdp: &mut Vdp, addr: u32, inc: u8) {
    vdp.write_port(PORT_ADDR_HI, ((addr >> 16) as u8 & 0x0F) | (inc << 4));
    vdp.write_port(PORT_ADDR_MID, (addr >> 8) as u8);
    vdp.write_port(PORT_ADDR_LO, addr as u8);
}

fn poke(vdp: &mut Vdp, addr: u32, bytes: &[u8]) {
    seek(vdp, addr, 1);
    for &b in bytes {
        vdp.write_port(PORT_DATA0, b);
    }
}

#[test]
fn every_address_decodes_to_one_region() {
    let mut space = VideoAddressSpace::default();
    for addr in (0..=0xF_FFFFu32).step_by(0x11) {
        let region = VideoAddressSpace::decode(addr);
        let expected_mapped = addr < 0x21000
            || (0x40000..0x40020).contains(&addr)
            || (0x40200..0x40400).contains(&addr);
        assert_eq!(region != Region::Unmapped, expected_mapped, "{addr:#07x}");
        if region == Region::Unmapped {
            space.write_u8(addr, 0x00);
            assert_eq!(space.read_u8(addr), 0xFF);
        }
    }
}

#[test]
fn auto_increment_reads_every_third_byte() {
    let mut vdp = Vdp::default();
    poke(&mut vdp, 0x1000, &[10, 11, 12, 13, 14, 15, 16]);
    seek(&mut vdp, 0x1000, 3);
    let got: Vec<u8> = (0..3).map(|_| vdp.read_port(PORT_DATA0)).collect();
    assert_eq!(got, vec![10, 13, 16]);
}

#[test]
fn second_data_port_keeps_its_own_pointer() {
    let mut vdp = Vdp::default();
    poke(&mut vdp, 0x2000, &[1, 2, 3, 4]);
    vdp.write_port(PORT_CTRL, 0x01);
    seek(&mut vdp, 0x2002, 1);
    vdp.write_port(PORT_CTRL, 0x00);
    seek(&mut vdp, 0x2000, 1);
    assert_eq!(vdp.read_port(PORT_DATA1), 3);
    assert_eq!(vdp.read_port(PORT_DATA0), 1);
    assert_eq!(vdp.read_port(PORT_DATA1), 4);
    assert_eq!(vdp.read_port(PORT_DATA0), 2);
}

#[test]
fn reset_port_restores_documented_defaults() {
    let mut vdp = Vdp::default();
    poke(&mut vdp, 0x40000, &[0xFF; 32]);
    poke(&mut vdp, 0x40200, &[0x5A; 512]);
    vdp.write_port(PORT_CTRL, 0x01);
    seek(&mut vdp, 0x12345, 7);

    vdp.write_port(PORT_CTRL, 0x80);

    assert_eq!(vdp.space().layers(), &LayerBank::new());
    assert_eq!(vdp.space().palette(), &Palette::new());
    assert_eq!(vdp.space().palette().entry(7), DEFAULT_PALETTE[7]);
    assert_eq!(vdp.space().layer_config(0).tile_base, 0x20000);
    assert!(vdp.space().layer_config(0).enabled);
    assert_eq!(vdp.read_port(PORT_CTRL), 0);
    assert_eq!(vdp.read_port(PORT_ADDR_HI), 0);
    assert_eq!(vdp.read_port(PORT_ADDR_MID), 0);
    assert_eq!(vdp.read_port(PORT_ADDR_LO), 0);
}

#[test]
fn text_layer_reproduces_glyph() {
    let mut image = vec![0u8; CHAR_ROM_SIZE];
    image[65 * 8..66 * 8].copy_from_slice(&GLYPH_A);
    let mut vdp = Vdp::new(CharRom::from_bytes(&image).unwrap());
    poke(&mut vdp, 0x0000, &[65, 0x01]);

    let frame = vdp.render_frame().clone();
    let white = [0xF0, 0xF0, 0xF0];
    for y in 0..8usize {
        for x in 0..8usize {
            let set = GLYPH_A[y] >> (7 - x) & 1 == 1;
            let index = resolve_color(vdp.space(), 0, x as u32, y as u32);
            assert_eq!(index, set as u8, "({x}, {y})");
            assert_eq!(frame.rgb(x, y) == white, set, "({x}, {y})");
        }
    }
}

#[test]
fn layer1_overrides_layer0_except_where_transparent() {
    let mut vdp = Vdp::default();
    // layer 0: 8bpp bitmap at 0x00000; layer 1: 8bpp bitmap at 0x10000
    for (base, tile_hi) in [(0x40000, 0x00), (0x40010, 0x40)] {
        poke(&mut vdp, base, &[0xE1, 0x00, 0x00, 0x00, 0x00, tile_hi, 160]);
    }
    poke(&mut vdp, 0x00000, &[5, 5]);
    poke(&mut vdp, 0x10000, &[0, 7]);
    assert_eq!(final_index(vdp.space(), 0, 0), 5);
    assert_eq!(final_index(vdp.space(), 1, 0), 7);
}

#[test]
fn bitmap_stride_addresses_rows() {
    let mut vdp = Vdp::default();
    poke(&mut vdp, 0x40000, &[0xE1, 0x00, 0x00, 0x00, 0x00, 0x00, 80]);
    for y in [0u32, 1, 2, 100] {
        poke(&mut vdp, y * 80 * 4 + 9, &[0x40 + y as u8]);
        assert_eq!(resolve_color(vdp.space(), 0, 9, y), 0x40 + y as u8);
    }
}

#[test]
fn disabled_layers_render_palette_entry_zero() {
    let mut vdp = Vdp::default();
    poke(&mut vdp, 0x40000, &[0x00]);
    poke(&mut vdp, 0x40200, &[0x21, 0x03]);
    let frame = vdp.render_frame();
    assert_eq!(frame.rgb(0, 0), [0x30, 0x20, 0x10]);
    assert_eq!(frame.rgb(639, 479), [0x30, 0x20, 0x10]);
}
