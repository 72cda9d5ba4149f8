// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Status display state machine
//!
//! ```text
//!            start_checking            Confirmed
//!   Idle ─────────────────▶ Checking ───────────▶ Quake ───┐
//!    ▲                          │   NoEvent/Failed           │ 15s
//!    │                          └───────────────▶ NoQuake ──┤
//!    └───────────────────────────────────────────────────────┘
//! ```
//!
//! The controller owns the device, the current state and the auto-clear
//! timer. It runs as its own task and is driven through a [`DisplayHandle`].

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{AutoClearTimer, DisplayCommand, DisplayDevice, DisplayHandle, DisplayState, Rgb, LCD_COLUMNS};
use crate::verification::VerificationResult;

/// How long a verdict stays on screen
pub const AUTO_CLEAR_AFTER: Duration = Duration::from_secs(15);

const TEXT_CHECKING: &str = "Checking...";
const TEXT_QUAKE: &str = "Earthquake!";
const TEXT_NO_QUAKE: &str = "No quake.";

pub struct DisplayController {
    device: Box<dyn DisplayDevice>,
    state: DisplayState,
    timer: AutoClearTimer,
    commands: mpsc::UnboundedReceiver<DisplayCommand>,
    state_tx: watch::Sender<DisplayState>,
}

impl DisplayController {
    /// Create a controller in `Idle` plus the handle used to drive it
    pub fn new(device: Box<dyn DisplayDevice>) -> (Self, DisplayHandle) {
        let (command_tx, commands) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(DisplayState::Idle);

        let controller = Self {
            device,
            state: DisplayState::Idle,
            timer: AutoClearTimer::new(AUTO_CLEAR_AFTER),
            commands,
            state_tx,
        };
        (controller, DisplayHandle::new(command_tx, state_rx))
    }

    /// Create a controller and run it on a new task
    pub fn spawn(device: Box<dyn DisplayDevice>) -> (DisplayHandle, JoinHandle<()>) {
        let (controller, handle) = Self::new(device);
        let task = tokio::spawn(controller.run());
        (handle, task)
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn timer(&self) -> &AutoClearTimer {
        &self.timer
    }

    /// Process commands and timer expiries until every handle is dropped
    pub async fn run(mut self) {
        debug!("Display controller started");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = self.timer.expired() => self.clear(),
            }
        }
        debug!("Display controller stopped");
    }

    pub fn handle(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::StartChecking => self.start_checking(),
            DisplayCommand::ShowResult(result) => self.show_result(&result),
        }
    }

    /// Enter `Checking` from any state. A verdict timer from an earlier
    /// cycle must not blank this one, so it is cancelled.
    pub fn start_checking(&mut self) {
        self.timer.cancel();
        info!("{}", TEXT_CHECKING);
        self.render(Rgb::GREEN, TEXT_CHECKING);
        self.set_state(DisplayState::Checking);
    }

    /// Show a verdict and arm the auto-clear timer. Applied in any state:
    /// whichever result arrives last is what stays on screen.
    pub fn show_result(&mut self, result: &VerificationResult) {
        if self.state != DisplayState::Checking {
            debug!("Verification result arrived while {:?}, last completion wins", self.state);
        }

        match result {
            VerificationResult::Confirmed { events } => {
                info!("{} ({} reported event(s))", TEXT_QUAKE, events);
                self.render(Rgb::RED, TEXT_QUAKE);
                self.set_state(DisplayState::Quake);
            }
            VerificationResult::NoEvent => {
                info!("{}", TEXT_NO_QUAKE);
                self.render(Rgb::GREEN, TEXT_NO_QUAKE);
                self.set_state(DisplayState::NoQuake);
            }
            VerificationResult::Failed(e) => {
                debug!("Showing failed verification as no quake: {}", e);
                self.render(Rgb::GREEN, TEXT_NO_QUAKE);
                self.set_state(DisplayState::NoQuake);
            }
        }

        self.timer.arm();
    }

    /// Blank the display and return to `Idle`
    pub fn clear(&mut self) {
        self.timer.cancel();
        self.render(Rgb::OFF, "");
        self.set_state(DisplayState::Idle);
        debug!("Display cleared");
    }

    fn set_state(&mut self, state: DisplayState) {
        self.state = state;
        self.state_tx.send_replace(state);
    }

    fn render(&mut self, color: Rgb, text: &str) {
        let line = format!("{:<width$}", text, width = LCD_COLUMNS);
        if let Err(e) = draw(self.device.as_mut(), color, &line) {
            warn!("Display write failed: {:#}", e);
        }
    }
}

fn draw(device: &mut dyn DisplayDevice, color: Rgb, line: &str) -> anyhow::Result<()> {
    device.set_cursor(0, 0)?;
    device.set_color(color.r, color.g, color.b)?;
    device.write_text(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Frame, MemoryDisplay};
    use crate::verification::VerificationError;
    use anyhow::{bail, Result};
    use tokio::time::{sleep, timeout, Instant};

    fn controller() -> (DisplayController, DisplayHandle, MemoryDisplay) {
        let display = MemoryDisplay::new();
        let (controller, handle) = DisplayController::new(Box::new(display.clone()));
        (controller, handle, display)
    }

    fn padded(text: &str) -> String {
        format!("{:<16}", text)
    }

    #[test]
    fn test_starts_idle_and_blank() {
        let (controller, handle, display) = controller();
        assert_eq!(controller.state(), DisplayState::Idle);
        assert_eq!(handle.state(), DisplayState::Idle);
        assert!(display.frames().is_empty());
        assert!(!controller.timer().is_armed());
    }

    #[tokio::test]
    async fn test_checking_then_quake() {
        let (mut controller, handle, display) = controller();

        controller.start_checking();
        assert_eq!(handle.state(), DisplayState::Checking);
        assert_eq!(
            display.last_frame(),
            Some(Frame { color: Rgb::GREEN, text: padded("Checking...") })
        );
        assert!(!controller.timer().is_armed());

        controller.show_result(&VerificationResult::Confirmed { events: 2 });
        assert_eq!(controller.state(), DisplayState::Quake);
        assert_eq!(
            display.last_frame(),
            Some(Frame { color: Rgb::RED, text: padded("Earthquake!") })
        );
        assert!(controller.timer().is_armed());
        assert_eq!(display.cursor(), (0, 0));
    }

    #[tokio::test]
    async fn test_no_event_and_failure_both_show_no_quake() {
        let (mut controller, _handle, display) = controller();

        controller.start_checking();
        controller.show_result(&VerificationResult::NoEvent);
        assert_eq!(controller.state(), DisplayState::NoQuake);
        let no_event = display.last_frame();

        controller.start_checking();
        controller.show_result(&VerificationResult::Failed(VerificationError::Status(503)));
        assert_eq!(controller.state(), DisplayState::NoQuake);
        assert_eq!(display.last_frame(), no_event);
        assert_eq!(
            no_event,
            Some(Frame { color: Rgb::GREEN, text: padded("No quake.") })
        );
        assert!(controller.timer().is_armed());
    }

    #[tokio::test]
    async fn test_start_checking_cancels_pending_clear() {
        let (mut controller, _handle, _display) = controller();
        controller.start_checking();
        controller.show_result(&VerificationResult::NoEvent);
        assert!(controller.timer().is_armed());

        controller.start_checking();
        assert!(!controller.timer().is_armed());
        assert_eq!(controller.state(), DisplayState::Checking);
    }

    #[tokio::test]
    async fn test_clear_blanks_and_idles() {
        let (mut controller, handle, display) = controller();
        controller.start_checking();
        controller.show_result(&VerificationResult::Confirmed { events: 1 });
        controller.clear();

        assert_eq!(handle.state(), DisplayState::Idle);
        assert_eq!(
            display.last_frame(),
            Some(Frame { color: Rgb::OFF, text: " ".repeat(16) })
        );
        assert!(!controller.timer().is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_clear_after_fifteen_seconds() {
        let display = MemoryDisplay::new();
        let (handle, _task) = DisplayController::spawn(Box::new(display.clone()));
        let mut states = handle.subscribe();

        handle.start_checking();
        handle.show_result(VerificationResult::Confirmed { events: 1 });
        states.wait_for(|s| *s == DisplayState::Quake).await.unwrap();
        let shown_at = Instant::now();

        sleep(Duration::from_secs(14)).await;
        assert_eq!(handle.state(), DisplayState::Quake);

        states.wait_for(|s| *s == DisplayState::Idle).await.unwrap();
        let elapsed = shown_at.elapsed();
        assert!(elapsed >= AUTO_CLEAR_AFTER && elapsed < AUTO_CLEAR_AFTER + Duration::from_millis(5));
        assert_eq!(display.frames().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_produces_single_clear_tied_to_second_arm() {
        let display = MemoryDisplay::new();
        let (handle, _task) = DisplayController::spawn(Box::new(display.clone()));
        let mut states = handle.subscribe();
        let start = Instant::now();

        handle.show_result(VerificationResult::Confirmed { events: 1 });
        states.wait_for(|s| *s == DisplayState::Quake).await.unwrap();

        sleep(Duration::from_secs(5)).await;
        handle.show_result(VerificationResult::NoEvent);
        states.wait_for(|s| *s == DisplayState::NoQuake).await.unwrap();

        // first arm's deadline passes without clearing
        sleep(Duration::from_secs(12)).await;
        assert_eq!(handle.state(), DisplayState::NoQuake);

        states.wait_for(|s| *s == DisplayState::Idle).await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(20), "cleared at {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(21));

        sleep(Duration::from_secs(60)).await;
        let clears = display
            .frames()
            .iter()
            .filter(|f| f.color == Rgb::OFF)
            .count();
        assert_eq!(clears, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_cycle_is_not_cleared_by_stale_timer() {
        let display = MemoryDisplay::new();
        let (handle, _task) = DisplayController::spawn(Box::new(display.clone()));
        let mut states = handle.subscribe();

        handle.start_checking();
        handle.show_result(VerificationResult::NoEvent);
        states.wait_for(|s| *s == DisplayState::NoQuake).await.unwrap();

        sleep(Duration::from_secs(10)).await;
        handle.start_checking();
        states.wait_for(|s| *s == DisplayState::Checking).await.unwrap();

        // well past the old deadline, still waiting on the new verdict
        sleep(Duration::from_secs(30)).await;
        assert_eq!(handle.state(), DisplayState::Checking);
    }

    #[tokio::test]
    async fn test_controller_stops_when_handles_dropped() {
        let (handle, task) = DisplayController::spawn(Box::new(MemoryDisplay::new()));
        drop(handle);
        timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
    }

    struct BrokenDisplay;

    impl DisplayDevice for BrokenDisplay {
        fn set_cursor(&mut self, _row: u8, _col: u8) -> Result<()> {
            bail!("bus error")
        }
        fn set_color(&mut self, _r: u8, _g: u8, _b: u8) -> Result<()> {
            bail!("bus error")
        }
        fn write_text(&mut self, _text: &str) -> Result<()> {
            bail!("bus error")
        }
    }

    #[tokio::test]
    async fn test_device_errors_do_not_block_transitions() {
        let (mut controller, _handle) = DisplayController::new(Box::new(BrokenDisplay));
        controller.start_checking();
        controller.show_result(&VerificationResult::Confirmed { events: 1 });
        assert_eq!(controller.state(), DisplayState::Quake);
    }
}
