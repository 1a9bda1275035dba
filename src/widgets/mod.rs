//! # Widgets
//!
//! The small state machines owned by interactive sections. Each one is a
//! plain struct with explicit update methods; none of them renders. The
//! section renderers read their state, and the live page feeds them
//! events and timer ticks.
//!
//! ```text
//! autoplay  ─ timed index cycler (every carousel)
//! lightbox  ─ modal image viewer (gallery)
//! drag      ─ pointer drag + keyboard nudge (free text)
//! contact   ─ form values + submission (contact form)
//! ```

pub mod autoplay;
pub mod contact;
pub mod drag;
pub mod lightbox;

use serde::{Deserialize, Serialize};

/// Keys the widgets react to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM-style key name (`"ArrowLeft"`, `" "`, `"Escape"`...).
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }

    /// Keys that activate a focused control.
    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// A key press with the modifier state the widgets care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub shift: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}
