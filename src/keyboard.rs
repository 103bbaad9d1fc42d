// Copyright (C) 2025 Dayton Fishell
// VERA Video Controller Emulator
// This file is part of vera-core.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host key to PS/2 (set 2) scan code translation.
//!
//! Codes with bit 7 set are extended keys and go out as `E0 <code & 0x7F>`.
//! F7's real code is 0x83, which collides with that flag: it is sent as
//! `E0 03`, the same way the hardware frontend always has. Releases carry
//! no `E0` prefix: they are `F0` and the raw table value.

use std::collections::VecDeque;

use log::trace;

/// Pseudo-code for the Pause/Break key, which has its own byte sequence
pub const PAUSE_BREAK: u8 = 0xFF;

const EXTENDED: u8 = 0x80;
const PREFIX_EXTENDED: u8 = 0xE0;
const PREFIX_RELEASE: u8 = 0xF0;
const PAUSE_SEQUENCE: [u8; 8] = [0xE1, 0x14, 0x77, 0xE1, 0xF0, 0x14, 0xF0, 0x77];

/// Host keys the frontend knows how to forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostKey {
    Backspace,
    Tab,
    Clear,
    Return,
    Pause,
    Escape,
    Space,
    Exclaim,
    QuoteDbl,
    Hash,
    Dollar,
    Ampersand,
    Quote,
    LeftParen,
    RightParen,
    Asterisk,
    Plus,
    Comma,
    Minus,
    Period,
    Slash,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Colon,
    Semicolon,
    Less,
    Equals,
    Greater,
    Question,
    At,
    LeftBracket,
    Backslash,
    RightBracket,
    Caret,
    Underscore,
    Backquote,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Delete,
    Up,
    Down,
    Right,
    Left,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    RShift,
    LShift,
    LCtrl,
    RCtrl,
    LAlt,
    /// Windows/Command key, used as a frontend modifier
    LGui,
}

/// Scan code for `key`, 0 if the key is not forwarded.
pub fn scancode(key: HostKey, esc_is_break: bool) -> u8 {
    use HostKey::*;
    match key {
        Backspace => 0x66,
        Tab => 0x0D,
        Return => 0x5A,
        Escape if esc_is_break => PAUSE_BREAK,
        Escape => 0x76,
        Space => 0x29,
        Exclaim | Num1 => 0x16,
        QuoteDbl | Quote => 0x52,
        Hash | Num3 => 0x26,
        Dollar | Num4 => 0x25,
        Ampersand | Num7 => 0x3D,
        LeftParen | Num9 => 0x46,
        RightParen | Num0 => 0x45,
        Asterisk | Num8 => 0x3E,
        Plus | Equals => 0x55,
        Comma | Less => 0x41,
        Minus | Underscore => 0x4E,
        Period | Greater => 0x49,
        Slash | Question => 0x4A,
        Num2 | At => 0x1E,
        Num5 => 0x2E,
        Num6 | Caret => 0x36,
        Colon | Semicolon => 0x4C,
        LeftBracket => 0x54,
        Backslash => 0x5D,
        RightBracket => 0x5B,
        Backquote => 0x0E,
        A => 0x1C,
        B => 0x32,
        C => 0x21,
        D => 0x23,
        E => 0x24,
        F => 0x2B,
        G => 0x34,
        H => 0x33,
        I => 0x43,
        J => 0x3B,
        K => 0x42,
        L => 0x4B,
        M => 0x3A,
        N => 0x31,
        O => 0x44,
        P => 0x4D,
        Q => 0x15,
        R => 0x2D,
        S => 0x1B,
        T => 0x2C,
        U => 0x3C,
        V => 0x2A,
        W => 0x1D,
        X => 0x22,
        Y => 0x35,
        Z => 0x1A,
        Up => 0x75 | EXTENDED,
        Down => 0x72 | EXTENDED,
        Right => 0x74 | EXTENDED,
        Left => 0x6B | EXTENDED,
        Home => 0x6C | EXTENDED,
        F1 => 0x05,
        F2 => 0x06,
        F3 => 0x04,
        F4 => 0x0C,
        F5 => 0x03,
        F6 => 0x0B,
        // real code 0x83; the high bit reads as the extended flag
        F7 => 0x83,
        F8 => 0x0A,
        RShift => 0x59,
        LShift => 0x12,
        LCtrl => 0x14,
        RCtrl => 0x14 | EXTENDED,
        LAlt => 0x11,
        Clear | Pause | Delete | Insert | End | PageUp | PageDown | F9 | F10 | F11 | F12
        | LGui => 0,
    }
}

/// Destination for translated scan code bytes
pub trait ScanCodeSink {
    fn push(&mut self, byte: u8);
}

impl ScanCodeSink for VecDeque<u8> {
    fn push(&mut self, byte: u8) {
        self.push_back(byte);
    }
}

impl ScanCodeSink for Vec<u8> {
    fn push(&mut self, byte: u8) {
        Vec::push(self, byte);
    }
}

/// What a host key event turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Bytes were pushed to the sink (possibly none)
    Forwarded,
    /// GUI+S: the frontend should write a snapshot
    SaveRequested,
}

/// Stateful translator tracking the host GUI modifier
#[derive(Debug, Clone)]
pub struct KeyboardTranslator {
    esc_is_break: bool,
    gui_down: bool,
}

impl KeyboardTranslator {
    pub fn new(esc_is_break: bool) -> Self {
        Self {
            esc_is_break,
            gui_down: false,
        }
    }

    pub fn key_down(&mut self, key: HostKey, sink: &mut impl ScanCodeSink) -> KeyAction {
        if key == HostKey::LGui {
            self.gui_down = true;
            return KeyAction::Forwarded;
        }
        if self.gui_down && key == HostKey::S {
            return KeyAction::SaveRequested;
        }

        let code = scancode(key, self.esc_is_break);
        trace!("key down {key:?} -> {code:#04x}");
        match code {
            0 => {}
            PAUSE_BREAK => PAUSE_SEQUENCE.iter().for_each(|&b| sink.push(b)),
            code => {
                if code & EXTENDED != 0 {
                    sink.push(PREFIX_EXTENDED);
                }
                sink.push(code & !EXTENDED);
            }
        }
        KeyAction::Forwarded
    }

    /// Release is always `F0` followed by the raw table value, including
    /// extended, unmapped and Pause/Break codes.
    pub fn key_up(&mut self, key: HostKey, sink: &mut impl ScanCodeSink) -> KeyAction {
        if key == HostKey::LGui {
            self.gui_down = false;
            return KeyAction::Forwarded;
        }

        let code = scancode(key, self.esc_is_break);
        trace!("key up   {key:?} -> {code:#04x}");
        sink.push(PREFIX_RELEASE);
        sink.push(code);
        KeyAction::Forwarded
    }
}

impl Default for KeyboardTranslator {
    fn default() -> Self {
        Self::new(true)
    }
}
