// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use vera_core::compositor::{Framebuffer, compose};
use vera_core::core::VideoAddressSpace;

fn text_and_tiles() -> VideoAddressSpace {
    let mut space = VideoAddressSpace::default();
    for i in 0..0x20000u32 {
        space.write_u8(i, (i.wrapping_mul(2_654_435_761) >> 13) as u8);
    }
    // layer 1: 4bpp 16x16 tiles, map at 0x0000, tiles at 0x8000
    for (reg, value) in [0x61u8, 0x35, 0x00, 0x00, 0x00, 0x20].into_iter().enumerate() {
        space.write_u8(VideoAddressSpace::LAYER1_BASE + reg as u32, value);
    }
    space
}

fn bench_compose(c: &mut Criterion) {
    let space = text_and_tiles();
    let mut fb = Framebuffer::new();
    c.bench_function("compose 640x480", |b| {
        b.iter(|| compose(black_box(&space), &mut fb))
    });
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
