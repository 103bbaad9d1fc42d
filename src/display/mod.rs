// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Presentation of composed frames.

#[cfg(feature = "sdl2")]
pub mod sdl;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;

use crate::compositor::Framebuffer;

/// Something that can show a frame
pub trait Display {
    fn present(&mut self, frame: &Framebuffer) -> Result<()>;
}

/// Headless display writing every presented frame to a binary PPM file
#[derive(Debug)]
pub struct PpmDisplay {
    path: PathBuf,
}

impl PpmDisplay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Display for PpmDisplay {
    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;
        let mut out = BufWriter::new(file);
        write_ppm(&mut out, frame)?;
        out.flush()?;
        debug!("frame written to {}", self.path.display());
        Ok(())
    }
}

/// Encode `frame` as P6
pub fn write_ppm(out: &mut impl Write, frame: &Framebuffer) -> Result<()> {
    write!(out, "P6\n{} {}\n255\n", Framebuffer::WIDTH, Framebuffer::HEIGHT)?;
    for y in 0..Framebuffer::HEIGHT {
        for x in 0..Framebuffer::WIDTH {
            out.write_all(&frame.rgb(x, y))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ppm_has_header_and_rgb_payload() {
        let frame = Framebuffer::new();
        let mut out = Vec::new();
        write_ppm(&mut out, &frame).unwrap();
        let header = b"P6\n640 480\n255\n";
        assert!(out.starts_with(header));
        assert_eq!(out.len(), header.len() + 640 * 480 * 3);
    }
}
