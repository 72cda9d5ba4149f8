//! Display module - status LCD and its state machine

mod controller;
mod device;
mod lcd;
mod timer;

pub use controller::{DisplayController, AUTO_CLEAR_AFTER};
pub use device::{ConsoleDisplay, DisplayDevice, Frame, MemoryDisplay, Rgb};
#[cfg(feature = "hardware")]
pub use lcd::Jhd1313m1;
pub use lcd::{cursor_command, LCD_ADDRESS, LCD_COLUMNS, RGB_ADDRESS};
pub use timer::AutoClearTimer;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::verification::VerificationResult;

/// What the status display is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayState {
    /// Blank
    #[default]
    Idle,
    Checking,
    Quake,
    NoQuake,
}

/// Input to the display state machine
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    StartChecking,
    ShowResult(VerificationResult),
}

/// Cloneable sender side of a [`DisplayController`]
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    commands: mpsc::UnboundedSender<DisplayCommand>,
    state: watch::Receiver<DisplayState>,
}

impl DisplayHandle {
    fn new(commands: mpsc::UnboundedSender<DisplayCommand>, state: watch::Receiver<DisplayState>) -> Self {
        Self { commands, state }
    }

    pub fn start_checking(&self) {
        self.send(DisplayCommand::StartChecking);
    }

    pub fn show_result(&self, result: VerificationResult) {
        self.send(DisplayCommand::ShowResult(result));
    }

    /// State as last published by the controller
    pub fn state(&self) -> DisplayState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.clone()
    }

    fn send(&self, command: DisplayCommand) {
        if self.commands.send(command).is_err() {
            warn!("Display controller has stopped, dropping update");
        }
    }
}
