// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Cancellable one-shot timer

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{sleep_until, Instant, Sleep};

/// One-shot timer with at most one pending deadline. Arming again moves the
/// deadline instead of adding a second one.
#[derive(Debug)]
pub struct AutoClearTimer {
    delay: Duration,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl AutoClearTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, sleep: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm for `delay` from now, superseding any pending deadline
    pub fn arm(&mut self) {
        let deadline = Instant::now() + self.delay;
        match self.sleep.as_mut() {
            Some(sleep) => sleep.as_mut().reset(deadline),
            None => self.sleep = Some(Box::pin(sleep_until(deadline))),
        }
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.sleep.as_ref().map(|s| s.deadline())
    }

    /// Resolves when the pending deadline passes, disarming the timer.
    /// Never resolves while disarmed. Cancel-safe.
    pub async fn expired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    const DELAY: Duration = Duration::from_secs(15);

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let mut timer = AutoClearTimer::new(DELAY);
        let start = Instant::now();
        timer.arm();
        timer.expired().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= DELAY && elapsed < DELAY + Duration::from_millis(5));
        assert!(!timer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_supersedes_first_deadline() {
        let mut timer = AutoClearTimer::new(DELAY);
        let start = Instant::now();
        timer.arm();
        advance(Duration::from_secs(4)).await;
        timer.arm();

        timer.expired().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(19), "fired early at {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(20));

        // nothing left to fire
        assert!(timeout(Duration::from_secs(60), timer.expired()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let mut timer = AutoClearTimer::new(DELAY);
        timer.arm();
        timer.cancel();
        assert_eq!(timer.deadline(), None);
        assert!(timeout(Duration::from_secs(60), timer.expired()).await.is_err());
    }
}
