// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Simulated accelerometer for demo mode

use async_trait::async_trait;
use anyhow::Result;
use rand::prelude::*;
use rand_distr::StandardNormal;

use super::SampleSource;

/// Standard deviation of the resting noise floor, in g
const NOISE_STD_G: f64 = 0.02;

/// Produces a quiet noise floor with occasional bursts of shaking
pub struct SimulatedAccelerometer {
    id: String,
    rng: StdRng,
    shake_probability: f64,
    shake_ticks_left: u32,
}

impl SimulatedAccelerometer {
    pub fn new(id: &str) -> Self {
        Self::with_rng(id, StdRng::from_entropy())
    }

    /// Deterministic simulator for reproducible runs
    pub fn seeded(id: &str, seed: u64) -> Self {
        Self::with_rng(id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(id: &str, rng: StdRng) -> Self {
        Self {
            id: id.to_string(),
            rng,
            shake_probability: 0.002,
            shake_ticks_left: 0,
        }
    }

    pub fn with_shake_probability(mut self, probability: f64) -> Self {
        self.shake_probability = probability.clamp(0.0, 1.0);
        self
    }

    fn next_sample(&mut self) -> f64 {
        if self.shake_ticks_left == 0 && self.rng.gen::<f64>() < self.shake_probability {
            self.shake_ticks_left = self.rng.gen_range(5..30);
        }

        let mut value = self.rng.sample::<f64, _>(StandardNormal) * NOISE_STD_G;
        if self.shake_ticks_left > 0 {
            self.shake_ticks_left -= 1;
            value += self.rng.gen_range(1.1..1.5);
        }
        value
    }
}

#[async_trait]
impl SampleSource for SimulatedAccelerometer {
    fn id(&self) -> &str {
        &self.id
    }

    async fn read_magnitude(&mut self) -> Result<f64> {
        Ok(self.next_sample())
    }
}
