// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! VERA video controller emulator
//!
//! This library models the video chip of an 8-bit home computer: a private
//! 128KB video RAM behind a six-port register window, two tile/bitmap layers
//! and a 12-bit palette, composited into a 640x480 frame.

pub mod chargen;
pub mod compositor;
pub mod config;
pub mod core;
pub mod display;
pub mod io;
pub mod keyboard;
pub mod layer;
pub mod palette;
pub mod render;
pub mod snapshot;
pub mod vdp;

/// Visible width in pixels
pub const SCREEN_WIDTH: usize = 640;
/// Visible height in pixels
pub const SCREEN_HEIGHT: usize = 480;

// Re-export commonly used types
pub use crate::chargen::CharRom;
pub use crate::compositor::Framebuffer;
pub use crate::core::VideoAddressSpace;
pub use crate::keyboard::{HostKey, KeyboardTranslator};
pub use crate::render::resolve_color;
pub use crate::snapshot::Snapshot;
pub use crate::vdp::Vdp;
