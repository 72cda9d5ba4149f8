// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Main sampling engine

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use super::EngineStats;
use crate::detection::EdgeDetector;
use crate::sensors::{Reading, SampleSource};
use crate::verification::{VerificationClient, VerificationResult};

/// Time between two sensor reads
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(100);

/// Polls the sample source, runs the edge detector and starts a
/// verification on every trigger. Verifications run on their own tasks;
/// the loop never waits for them.
pub struct Engine {
    source: Box<dyn SampleSource>,
    detector: EdgeDetector,
    verifier: VerificationClient,
    stats: Arc<RwLock<EngineStats>>,
    start_time: Option<Instant>,
}

impl Engine {
    pub fn new(source: Box<dyn SampleSource>, verifier: VerificationClient) -> Self {
        Self {
            source,
            detector: EdgeDetector::new(),
            verifier,
            stats: Arc::new(RwLock::new(EngineStats::default())),
            start_time: None,
        }
    }

    /// Sample until `shutdown` fires or its sender is dropped
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        info!(
            "Sampling {} every {:?}, verifying around ({}, {})",
            self.source.id(),
            SAMPLE_PERIOD,
            self.verifier.location().latitude,
            self.verifier.location().longitude,
        );
        self.start_time = Some(Instant::now());
        self.stats.write().await.running = true;

        let mut ticker = interval(SAMPLE_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick().await;
                }
                _ = shutdown.recv() => {
                    info!("Engine shutting down...");
                    break;
                }
            }
        }

        let mut stats = self.stats.write().await;
        stats.running = false;
        stats.uptime_seconds = self.uptime();
        info!(
            "Engine stopped after {} ticks, {} trigger(s), {} read failure(s)",
            stats.ticks, stats.triggers, stats.read_failures
        );
        Ok(())
    }

    /// Run one sampling step. Returns the spawned verification, if the
    /// reading crossed the threshold.
    pub async fn tick(&mut self) -> Option<JoinHandle<VerificationResult>> {
        let tick = {
            let mut stats = self.stats.write().await;
            stats.ticks += 1;
            stats.ticks
        };

        let magnitude = match self.source.read_magnitude().await {
            Ok(m) if m.is_finite() => m,
            Ok(m) => {
                self.stats.write().await.read_failures += 1;
                debug!("Tick {}: discarding non-finite reading {} from {}", tick, m, self.source.id());
                return None;
            }
            Err(e) => {
                self.stats.write().await.read_failures += 1;
                debug!("Tick {}: read from {} failed: {:#}", tick, self.source.id(), e);
                return None;
            }
        };

        let trigger = self.detector.observe(&Reading::new(magnitude, tick))?;
        info!("Motion detected (trigger #{}, magnitude {:.2}), verifying", trigger.sequence, trigger.magnitude);

        let verification = self.verifier.verify();

        let mut stats = self.stats.write().await;
        stats.triggers += 1;
        stats.verifications_started += 1;
        stats.last_trigger = Some(trigger.detected_at);

        Some(verification)
    }

    pub async fn stats(&self) -> EngineStats {
        let mut stats = self.stats.read().await.clone();
        if stats.running {
            stats.uptime_seconds = self.uptime();
        }
        stats
    }

    /// Shared view of the counters, readable while `run` holds the engine
    pub fn stats_handle(&self) -> Arc<RwLock<EngineStats>> {
        Arc::clone(&self.stats)
    }

    pub fn uptime(&self) -> u64 {
        self.start_time.map(|t| t.elapsed().as_secs()).unwrap_or(0)
    }
}
