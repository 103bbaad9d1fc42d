// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

// Standalone frontend: drives the controller through its ports the way the
// CPU would, then presents frames headless or in a window.
use anyhow::{Context, Result};
use log::{info, warn};
use vera_core::config::Config;
use vera_core::display::{Display, PpmDisplay};
use vera_core::io::{PORT_ADDR_HI, PORT_ADDR_LO, PORT_ADDR_MID, PORT_DATA0};
use vera_core::{CharRom, Snapshot, Vdp};

/// Text colour byte: foreground 1 (white), background 6 (blue)
const BANNER_COLOR: u8 = 0x61;
const MAP_COLUMNS: u32 = 32;
const MAP_ROWS: u32 = 32;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load()?;

    let char_rom = match &config.chargen {
        Some(path) => CharRom::from_file(path)
            .with_context(|| format!("loading character ROM {}", path.display()))?,
        None => {
            warn!("no character ROM given, glyphs will be blank");
            CharRom::blank()
        }
    };

    let mut vdp = Vdp::new(char_rom);
    match &config.restore {
        Some(path) => {
            let snapshot = Snapshot::load(path)
                .with_context(|| format!("restoring {}", path.display()))?;
            vdp.restore(&snapshot);
        }
        None => print_banner(&mut vdp, "VERA VIDEO CONTROLLER READY."),
    }

    if config.window {
        return run_window(&mut vdp, &config);
    }

    let frames = config.frames.unwrap_or(1);
    for _ in 0..frames {
        vdp.render_frame();
    }
    info!("rendered {} frame(s)", vdp.frame_count());

    if let Some(path) = &config.dump {
        PpmDisplay::new(path).present(vdp.framebuffer())?;
        println!("Frame written to {}", path.display());
    }
    Ok(())
}

/// Clear the default text layer and print `text` on the top row
fn print_banner(vdp: &mut Vdp, text: &str) {
    seek(vdp, 0, 1);
    for _ in 0..MAP_COLUMNS * MAP_ROWS {
        vdp.write_port(PORT_DATA0, b' ');
        vdp.write_port(PORT_DATA0, BANNER_COLOR);
    }
    seek(vdp, 0, 1);
    for byte in text.bytes() {
        vdp.write_port(PORT_DATA0, screen_code(byte));
        vdp.write_port(PORT_DATA0, BANNER_COLOR);
    }
}

fn seek(vdp: &mut Vdp, addr: u32, increment: u8) {
    vdp.write_port(PORT_ADDR_HI, ((addr >> 16) as u8 & 0x0F) | (increment << 4));
    vdp.write_port(PORT_ADDR_MID, (addr >> 8) as u8);
    vdp.write_port(PORT_ADDR_LO, addr as u8);
}

/// ASCII to character ROM index: letters live at 1-26
fn screen_code(byte: u8) -> u8 {
    match byte {
        b'A'..=b'Z' => byte - b'A' + 1,
        b'a'..=b'z' => byte - b'a' + 1,
        _ => byte,
    }
}

#[cfg(feature = "sdl2")]
fn run_window(vdp: &mut Vdp, config: &Config) -> Result<()> {
    use std::collections::VecDeque;

    use vera_core::KeyboardTranslator;
    use vera_core::display::sdl::{HostEvents, SdlDisplay};

    let mut display = SdlDisplay::new("VERA")?;
    let mut keyboard = KeyboardTranslator::new(config.esc_is_break());
    let mut scancodes = VecDeque::new();

    loop {
        match display.pump(&mut keyboard, &mut scancodes) {
            HostEvents::Quit => break,
            HostEvents::Save => {
                let path = config.snapshot_path();
                vdp.snapshot()
                    .save(&path)
                    .with_context(|| format!("saving {}", path.display()))?;
                info!("snapshot saved to {}", path.display());
            }
            HostEvents::Continue => {}
        }
        // no CPU is attached, so the key stream is only logged
        while let Some(byte) = scancodes.pop_front() {
            log::debug!("scancode {byte:#04x}");
        }

        display.present(vdp.render_frame())?;

        if config.frames.is_some_and(|n| vdp.frame_count() >= n) {
            break;
        }
    }

    if let Some(path) = &config.dump {
        PpmDisplay::new(path).present(vdp.framebuffer())?;
    }
    Ok(())
}

#[cfg(not(feature = "sdl2"))]
fn run_window(_vdp: &mut Vdp, _config: &Config) -> Result<()> {
    anyhow::bail!("this build has no window support; rebuild with `--features sdl2`")
}
