// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SDL2 window frontend

use anyhow::Result;
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};

use super::Display;
use crate::compositor::Framebuffer;
use crate::keyboard::{HostKey, KeyAction, KeyboardTranslator, ScanCodeSink};

/// Outcome of draining the host event queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvents {
    Continue,
    Save,
    Quit,
}

pub struct SdlDisplay {
    canvas: Canvas<Window>,
    texture: Texture<'static>,
    events: EventPump,
}

impl SdlDisplay {
    pub fn new(title: &str) -> Result<Self> {
        let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
        let video = sdl.video().map_err(anyhow::Error::msg)?;
        let window = video
            .window(title, Framebuffer::WIDTH as u32, Framebuffer::HEIGHT as u32)
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().accelerated().build()?;
        // One window per process: the creator lives as long as the program
        // so the frame texture can be kept across presents.
        let creator: &'static TextureCreator<WindowContext> =
            Box::leak(Box::new(canvas.texture_creator()));
        let texture = creator.create_texture_streaming(
            PixelFormatEnum::RGB888,
            Framebuffer::WIDTH as u32,
            Framebuffer::HEIGHT as u32,
        )?;
        let events = sdl.event_pump().map_err(anyhow::Error::msg)?;
        Ok(Self {
            canvas,
            texture,
            events,
        })
    }

    /// Forward pending key events to `sink` through `keyboard`
    pub fn pump(
        &mut self,
        keyboard: &mut KeyboardTranslator,
        sink: &mut impl ScanCodeSink,
    ) -> HostEvents {
        let mut outcome = HostEvents::Continue;
        for event in self.events.poll_iter() {
            let action = match event {
                Event::Quit { .. } => return HostEvents::Quit,
                Event::KeyDown {
                    keycode: Some(code),
                    ..
                } => host_key(code).map(|key| keyboard.key_down(key, sink)),
                Event::KeyUp {
                    keycode: Some(code),
                    ..
                } => host_key(code).map(|key| keyboard.key_up(key, sink)),
                _ => None,
            };
            if action == Some(KeyAction::SaveRequested) {
                outcome = HostEvents::Save;
            }
        }
        outcome
    }
}

impl Display for SdlDisplay {
    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        self.texture
            .update(None, frame.as_bytes(), Framebuffer::PITCH)?;
        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, None)
            .map_err(anyhow::Error::msg)?;
        self.canvas.present();
        Ok(())
    }
}

fn host_key(code: Keycode) -> Option<HostKey> {
    let key = match code {
        Keycode::Backspace => HostKey::Backspace,
        Keycode::Tab => HostKey::Tab,
        Keycode::Clear => HostKey::Clear,
        Keycode::Return => HostKey::Return,
        Keycode::Pause => HostKey::Pause,
        Keycode::Escape => HostKey::Escape,
        Keycode::Space => HostKey::Space,
        Keycode::Exclaim => HostKey::Exclaim,
        Keycode::Quotedbl => HostKey::QuoteDbl,
        Keycode::Hash => HostKey::Hash,
        Keycode::Dollar => HostKey::Dollar,
        Keycode::Ampersand => HostKey::Ampersand,
        Keycode::Quote => HostKey::Quote,
        Keycode::LeftParen => HostKey::LeftParen,
        Keycode::RightParen => HostKey::RightParen,
        Keycode::Asterisk => HostKey::Asterisk,
        Keycode::Plus => HostKey::Plus,
        Keycode::Comma => HostKey::Comma,
        Keycode::Minus => HostKey::Minus,
        Keycode::Period => HostKey::Period,
        Keycode::Slash => HostKey::Slash,
        Keycode::Num0 => HostKey::Num0,
        Keycode::Num1 => HostKey::Num1,
        Keycode::Num2 => HostKey::Num2,
        Keycode::Num3 => HostKey::Num3,
        Keycode::Num4 => HostKey::Num4,
        Keycode::Num5 => HostKey::Num5,
        Keycode::Num6 => HostKey::Num6,
        Keycode::Num7 => HostKey::Num7,
        Keycode::Num8 => HostKey::Num8,
        Keycode::Num9 => HostKey::Num9,
        Keycode::Colon => HostKey::Colon,
        Keycode::Semicolon => HostKey::Semicolon,
        Keycode::Less => HostKey::Less,
        Keycode::Equals => HostKey::Equals,
        Keycode::Greater => HostKey::Greater,
        Keycode::Question => HostKey::Question,
        Keycode::At => HostKey::At,
        Keycode::LeftBracket => HostKey::LeftBracket,
        Keycode::Backslash => HostKey::Backslash,
        Keycode::RightBracket => HostKey::RightBracket,
        Keycode::Caret => HostKey::Caret,
        Keycode::Underscore => HostKey::Underscore,
        Keycode::Backquote => HostKey::Backquote,
        Keycode::A => HostKey::A,
        Keycode::B => HostKey::B,
        Keycode::C => HostKey::C,
        Keycode::D => HostKey::D,
        Keycode::E => HostKey::E,
        Keycode::F => HostKey::F,
        Keycode::G => HostKey::G,
        Keycode::H => HostKey::H,
        Keycode::I => HostKey::I,
        Keycode::J => HostKey::J,
        Keycode::K => HostKey::K,
        Keycode::L => HostKey::L,
        Keycode::M => HostKey::M,
        Keycode::N => HostKey::N,
        Keycode::O => HostKey::O,
        Keycode::P => HostKey::P,
        Keycode::Q => HostKey::Q,
        Keycode::R => HostKey::R,
        Keycode::S => HostKey::S,
        Keycode::T => HostKey::T,
        Keycode::U => HostKey::U,
        Keycode::V => HostKey::V,
        Keycode::W => HostKey::W,
        Keycode::X => HostKey::X,
        Keycode::Y => HostKey::Y,
        Keycode::Z => HostKey::Z,
        Keycode::Delete => HostKey::Delete,
        Keycode::Up => HostKey::Up,
        Keycode::Down => HostKey::Down,
        Keycode::Right => HostKey::Right,
        Keycode::Left => HostKey::Left,
        Keycode::Insert => HostKey::Insert,
        Keycode::Home => HostKey::Home,
        Keycode::End => HostKey::End,
        Keycode::PageUp => HostKey::PageUp,
        Keycode::PageDown => HostKey::PageDown,
        Keycode::F1 => HostKey::F1,
        Keycode::F2 => HostKey::F2,
        Keycode::F3 => HostKey::F3,
        Keycode::F4 => HostKey::F4,
        Keycode::F5 => HostKey::F5,
        Keycode::F6 => HostKey::F6,
        Keycode::F7 => HostKey::F7,
        Keycode::F8 => HostKey::F8,
        Keycode::F9 => HostKey::F9,
        Keycode::F10 => HostKey::F10,
        Keycode::F11 => HostKey::F11,
        Keycode::F12 => HostKey::F12,
        Keycode::RShift => HostKey::RShift,
        Keycode::LShift => HostKey::LShift,
        Keycode::LCtrl => HostKey::LCtrl,
        Keycode::RCtrl => HostKey::RCtrl,
        Keycode::LAlt => HostKey::LAlt,
        Keycode::LGui => HostKey::LGui,
        _ => return None,
    };
    Some(key)
}
