// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! MMA7660 three-axis accelerometer over I2C

#[cfg(feature = "hardware")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "hardware")]
use async_trait::async_trait;
#[cfg(feature = "hardware")]
use i2cdev::core::I2CDevice;
#[cfg(feature = "hardware")]
use i2cdev::linux::LinuxI2CDevice;
#[cfg(feature = "hardware")]
use tracing::{debug, info};

#[cfg(feature = "hardware")]
use super::{Axis, SampleSource};

/// Default 7-bit bus address
pub const DEFAULT_ADDRESS: u16 = 0x4C;

const REG_XOUT: u8 = 0x00;
const REG_MODE: u8 = 0x07;
const REG_SR: u8 = 0x08;

const MODE_STANDBY: u8 = 0x00;
const MODE_ACTIVE: u8 = 0x01;

/// Auto-sleep sample rate code for 64 samples/s
const SR_AUTOSLEEP_64: u8 = 0x01;

/// Output is being updated while this bit is set
const ALERT_BIT: u8 = 0x40;

/// Counts per g at the fixed ±1.5g range
const COUNTS_PER_G: f64 = 21.33;

const MAX_ALERT_RETRIES: usize = 4;

/// Decode a 6-bit two's-complement output register. `None` while the
/// alert bit says the register is mid-update.
pub fn decode_axis(raw: u8) -> Option<i8> {
    if raw & ALERT_BIT != 0 {
        return None;
    }
    let value = raw & 0x3F;
    if value & 0x20 != 0 {
        Some((value | 0xC0) as i8)
    } else {
        Some(value as i8)
    }
}

/// Convert raw counts to g
pub fn counts_to_g(counts: i8) -> f64 {
    counts as f64 / COUNTS_PER_G
}

/// MMA7660 accelerometer
#[cfg(feature = "hardware")]
pub struct Mma7660Sensor {
    id: String,
    device: LinuxI2CDevice,
    axis: Axis,
}

#[cfg(feature = "hardware")]
impl Mma7660Sensor {
    /// Open the device and bring it up at 64 samples/s.
    pub fn open(bus: u8, address: u16, axis: Axis) -> Result<Self> {
        let path = format!("/dev/i2c-{}", bus);
        let device = LinuxI2CDevice::new(&path, address)
            .with_context(|| format!("opening MMA7660 at {} 0x{:02X}", path, address))?;

        let mut sensor = Self {
            id: format!("mma7660@{}:0x{:02X}", bus, address),
            device,
            axis,
        };

        // Sample rate is only writable in standby
        sensor.write_register(REG_MODE, MODE_STANDBY)?;
        sensor.write_register(REG_SR, SR_AUTOSLEEP_64)?;
        sensor.write_register(REG_MODE, MODE_ACTIVE)?;

        info!("Accelerometer {} active, axis {:?}", sensor.id, axis);
        Ok(sensor)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.device
            .smbus_write_byte_data(register, value)
            .with_context(|| format!("writing MMA7660 register 0x{:02X}", register))
    }

    fn read_axis(&mut self, register: u8) -> Result<i8> {
        for _ in 0..MAX_ALERT_RETRIES {
            let raw = self
                .device
                .smbus_read_byte_data(register)
                .with_context(|| format!("reading MMA7660 register 0x{:02X}", register))?;
            match decode_axis(raw) {
                Some(counts) => return Ok(counts),
                None => debug!("MMA7660 register 0x{:02X} mid-update, re-reading", register),
            }
        }
        bail!("MMA7660 register 0x{:02X} stayed in alert state", register)
    }

    /// Read all three axes in g
    pub fn acceleration(&mut self) -> Result<(f64, f64, f64)> {
        let x = self.read_axis(REG_XOUT)?;
        let y = self.read_axis(REG_XOUT + 1)?;
        let z = self.read_axis(REG_XOUT + 2)?;
        Ok((counts_to_g(x), counts_to_g(y), counts_to_g(z)))
    }
}

#[cfg(feature = "hardware")]
#[async_trait]
impl SampleSource for Mma7660Sensor {
    fn id(&self) -> &str {
        &self.id
    }

    async fn read_magnitude(&mut self) -> Result<f64> {
        let (x, y, z) = self.acceleration()?;
        Ok(self.axis.select(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_positive_and_negative() {
        assert_eq!(decode_axis(0x00), Some(0));
        assert_eq!(decode_axis(0x15), Some(21));
        assert_eq!(decode_axis(0x1F), Some(31));
        assert_eq!(decode_axis(0x3F), Some(-1));
        assert_eq!(decode_axis(0x20), Some(-32));
    }

    #[test]
    fn test_decode_alert_bit_rejected() {
        assert_eq!(decode_axis(0x40 | 0x05), None);
    }

    #[test]
    fn test_counts_to_g() {
        assert!((counts_to_g(21) - 0.9845).abs() < 1e-3);
        assert!(counts_to_g(-32) < -1.4);
    }
}
