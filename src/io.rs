// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! CPU-facing register interface.
//!
//! The CPU sees six byte-wide ports. Ports 0-2 expose the address pointer
//! chosen by the select bit; ports 3 and 4 are data windows bound to pointer 0
//! and pointer 1, each advancing its pointer after every access.

use log::trace;

use crate::core::VideoAddressSpace;

/// Address pointer bits 16-19 (low nibble) and increment (high nibble)
pub const PORT_ADDR_HI: u8 = 0;
/// Address pointer bits 8-15
pub const PORT_ADDR_MID: u8 = 1;
/// Address pointer bits 0-7
pub const PORT_ADDR_LO: u8 = 2;
/// Data window through pointer 0
pub const PORT_DATA0: u8 = 3;
/// Data window through pointer 1
pub const PORT_DATA1: u8 = 4;
/// Select bit (bit 0) and reset strobe (bit 7)
pub const PORT_CTRL: u8 = 5;

const CTRL_RESET: u8 = 0x80;
const CTRL_ADDRSEL: u8 = 0x01;

/// Pointers are 20 bits wide
pub const ADDRESS_MASK: u32 = 0xF_FFFF;

/// Pointer/increment pair addressed through the ports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressPointer {
    pub address: u32,
    pub increment: u8,
}

impl AddressPointer {
    /// Return the current address and step past it
    fn advance(&mut self) -> u32 {
        let address = self.address;
        self.address = (self.address + self.increment as u32) & ADDRESS_MASK;
        address
    }
}

/// Port-side state of the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoRegisters {
    pointers: [AddressPointer; 2],
    addr_sel: bool,
}

impl IoRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear both pointers, both increments and the select bit
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn pointer(&self, sel: usize) -> AddressPointer {
        self.pointers[sel & 1]
    }

    pub fn addr_sel(&self) -> bool {
        self.addr_sel
    }

    pub(crate) fn restore(&mut self, pointers: [AddressPointer; 2], addr_sel: bool) {
        self.pointers = pointers.map(|p| AddressPointer {
            address: p.address & ADDRESS_MASK,
            increment: p.increment & 0x0F,
        });
        self.addr_sel = addr_sel;
    }

    fn selected(&self) -> &AddressPointer {
        &self.pointers[self.addr_sel as usize]
    }

    fn selected_mut(&mut self) -> &mut AddressPointer {
        &mut self.pointers[self.addr_sel as usize]
    }

    /// Read a port. Data port reads advance their pointer.
    pub fn read(&mut self, space: &VideoAddressSpace, port: u8) -> u8 {
        match port {
            PORT_ADDR_HI => {
                let ptr = self.selected();
                ((ptr.address >> 16) as u8 & 0x0F) | (ptr.increment << 4)
            }
            PORT_ADDR_MID => (self.selected().address >> 8) as u8,
            PORT_ADDR_LO => self.selected().address as u8,
            PORT_DATA0 | PORT_DATA1 => {
                let address = self.pointers[(port - PORT_DATA0) as usize].advance();
                let value = space.read_u8(address);
                trace!("read  vram[{address:#07x}] = {value:#04x}");
                value
            }
            PORT_CTRL => self.addr_sel as u8,
            _ => 0,
        }
    }

    /// Write a port. A reset strobe on the control port also resets `space`.
    pub fn write(&mut self, space: &mut VideoAddressSpace, port: u8, value: u8) {
        match port {
            PORT_ADDR_HI => {
                let ptr = self.selected_mut();
                ptr.address = (ptr.address & 0x0_FFFF) | ((value & 0x0F) as u32) << 16;
                ptr.increment = value >> 4;
            }
            PORT_ADDR_MID => {
                let ptr = self.selected_mut();
                ptr.address = (ptr.address & 0xF_00FF) | (value as u32) << 8;
            }
            PORT_ADDR_LO => {
                let ptr = self.selected_mut();
                ptr.address = (ptr.address & 0xF_FF00) | value as u32;
            }
            PORT_DATA0 | PORT_DATA1 => {
                let address = self.pointers[(port - PORT_DATA0) as usize].advance();
                trace!("write vram[{address:#07x}] = {value:#04x}");
                space.write_u8(address, value);
            }
            PORT_CTRL => {
                if value & CTRL_RESET != 0 {
                    self.reset();
                    space.reset();
                }
                self.addr_sel = value & CTRL_ADDRSEL != 0;
            }
            _ => {}
        }
    }
}
