// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Video controller state aggregate.
//!
//! [`Vdp`] owns the video address space, the port registers and the output
//! frame. Instances are fully independent; nothing is global.

use log::{debug, trace};

use crate::chargen::CharRom;
use crate::compositor::{self, Framebuffer};
use crate::core::VideoAddressSpace;
use crate::io::{IoRegisters, PORT_CTRL};
use crate::layer::LAYER_COUNT;
use crate::snapshot::{IoState, Snapshot};

pub struct Vdp {
    space: VideoAddressSpace,
    io: IoRegisters,
    framebuffer: Framebuffer,
    frame_count: u64,
}

impl Vdp {
    /// Create a controller with `char_rom` mapped at 0x20000, in reset state
    pub fn new(char_rom: CharRom) -> Self {
        debug!("vdp init with {:?}", char_rom);
        let mut vdp = Self {
            space: VideoAddressSpace::new(char_rom),
            io: IoRegisters::new(),
            framebuffer: Framebuffer::new(),
            frame_count: 0,
        };
        vdp.reset();
        vdp
    }

    /// Same effect as writing 0x80 to the control port
    pub fn reset(&mut self) {
        self.write_port(PORT_CTRL, 0x80);
    }

    /// CPU read of port `port` (0-5; other ports read 0)
    pub fn read_port(&mut self, port: u8) -> u8 {
        self.io.read(&self.space, port)
    }

    /// CPU write of port `port` (0-5; other ports are ignored)
    pub fn write_port(&mut self, port: u8, value: u8) {
        trace!("port[{port}] <- {value:#04x}");
        self.io.write(&mut self.space, port, value);
    }

    /// Recompute the whole frame from current state
    pub fn render_frame(&mut self) -> &Framebuffer {
        compositor::compose(&self.space, &mut self.framebuffer);
        self.frame_count += 1;
        trace!("frame {} composed", self.frame_count);
        &self.framebuffer
    }

    /// Last composed frame
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn space(&self) -> &VideoAddressSpace {
        &self.space
    }

    /// Direct access to the address space, bypassing the ports
    pub fn space_mut(&mut self) -> &mut VideoAddressSpace {
        &mut self.space
    }

    pub fn io(&self) -> &IoRegisters {
        &self.io
    }

    pub fn snapshot(&self) -> Snapshot {
        let pointers = [self.io.pointer(0), self.io.pointer(1)];
        Snapshot {
            vram: self.space.vram().to_vec(),
            palette: self.space.palette().as_bytes().to_vec(),
            layers: [0, 1].map(|layer| *self.space.layers().registers(layer)),
            io: IoState {
                addresses: pointers.map(|p| p.address),
                increments: pointers.map(|p| p.increment),
                addr_sel: self.io.addr_sel(),
            },
        }
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.space.load_vram(0, &snapshot.vram);
        self.space.load_palette(&snapshot.palette);
        for layer in 0..LAYER_COUNT {
            self.space.load_layer(layer, &snapshot.layers[layer]);
        }
        self.io.restore(snapshot.io.pointers(), snapshot.io.addr_sel);
        debug!("vdp state restored from snapshot");
    }
}

impl Default for Vdp {
    fn default() -> Self {
        Self::new(CharRom::blank())
    }
}
