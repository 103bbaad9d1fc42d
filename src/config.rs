// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Frontend configuration: command line, optionally merged with a YAML file.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

pub const DEFAULT_SNAPSHOT: &str = "vera.snapshot";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config files need the `serde-spec` feature ({0})")]
    Unsupported(PathBuf),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "serde-spec")]
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "vera", about = "VERA video controller emulator")]
pub struct Config {
    /// 4096-byte character ROM image
    #[arg(long)]
    pub chargen: Option<PathBuf>,

    /// Number of frames to render before exiting
    #[arg(long)]
    pub frames: Option<u64>,

    /// Write the last frame to this PPM file
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Where save requests write the snapshot
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Load this snapshot before the first frame
    #[arg(long)]
    pub restore: Option<PathBuf>,

    /// Send Escape as Escape instead of Pause/Break
    #[arg(long)]
    pub no_esc_break: bool,

    /// Open a window (requires the `sdl2` feature)
    #[arg(long)]
    pub window: bool,

    /// YAML file supplying defaults for the options above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Fields accepted in a YAML config file
#[cfg_attr(feature = "serde-spec", derive(serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-spec", serde(default, deny_unknown_fields))]
pub struct FileConfig {
    pub chargen: Option<PathBuf>,
    pub frames: Option<u64>,
    pub dump: Option<PathBuf>,
    pub snapshot: Option<PathBuf>,
    pub esc_is_break: Option<bool>,
}

impl Config {
    /// Parse the process arguments and merge the config file if one is named
    pub fn load() -> Result<Self, ConfigError> {
        Self::parse().resolve()
    }

    /// Merge the config file named by `--config`, if any
    pub fn resolve(self) -> Result<Self, ConfigError> {
        match self.config.clone() {
            Some(path) => Ok(self.merge(read_file(path)?)),
            None => Ok(self),
        }
    }

    /// Fill unset options from `file`; command-line values win.
    pub fn merge(mut self, file: FileConfig) -> Self {
        self.chargen = self.chargen.or(file.chargen);
        self.frames = self.frames.or(file.frames);
        self.dump = self.dump.or(file.dump);
        self.snapshot = self.snapshot.or(file.snapshot);
        if file.esc_is_break == Some(false) {
            self.no_esc_break = true;
        }
        self
    }

    pub fn esc_is_break(&self) -> bool {
        !self.no_esc_break
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT))
    }
}

#[cfg(feature = "serde-spec")]
fn read_file(path: PathBuf) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(&path)?;
    let file = serde_yaml::from_str(&text)?;
    log::debug!("loaded config from {}", path.display());
    Ok(file)
}

#[cfg(not(feature = "serde-spec"))]
fn read_file(path: PathBuf) -> Result<FileConfig, ConfigError> {
    Err(ConfigError::Unsupported(path))
}
