// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Display device trait and software devices

use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Backlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A character display with a colored backlight
pub trait DisplayDevice: Send {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<()>;

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()>;

    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Logs what an LCD would show
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    color: Rgb,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayDevice for ConsoleDisplay {
    fn set_cursor(&mut self, _row: u8, _col: u8) -> Result<()> {
        Ok(())
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.color = Rgb::new(r, g, b);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let Rgb { r, g, b } = self.color;
        info!("[display rgb({},{},{})] |{}|", r, g, b, text);
        Ok(())
    }
}

/// One completed write: the color active at the time and the text written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub color: Rgb,
    pub text: String,
}

#[derive(Debug, Default)]
struct Screen {
    cursor: (u8, u8),
    color: Rgb,
    frames: Vec<Frame>,
}

/// In-memory display. Clones share the same screen, so a caller can keep
/// one clone for inspection after handing the other to a controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    screen: Arc<Mutex<Screen>>,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write so far, oldest first
    pub fn frames(&self) -> Vec<Frame> {
        self.screen.lock().frames.clone()
    }

    /// Most recent write, if any
    pub fn last_frame(&self) -> Option<Frame> {
        self.screen.lock().frames.last().cloned()
    }

    pub fn cursor(&self) -> (u8, u8) {
        self.screen.lock().cursor
    }
}

impl DisplayDevice for MemoryDisplay {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<()> {
        self.screen.lock().cursor = (row, col);
        Ok(())
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.screen.lock().color = Rgb::new(r, g, b);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut screen = self.screen.lock();
        let color = screen.color;
        screen.frames.push(Frame {
            color,
            text: text.to_string(),
        });
        Ok(())
    }
}
