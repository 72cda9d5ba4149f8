// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! JHD1313M1 16x2 character LCD with RGB backlight
//!
//! Two I2C targets: an HD44780-compatible character controller and a PCA9633
//! style backlight driver.

#[cfg(feature = "hardware")]
use std::thread::sleep;
#[cfg(feature = "hardware")]
use std::time::Duration;

#[cfg(feature = "hardware")]
use anyhow::{Context, Result};
#[cfg(feature = "hardware")]
use i2cdev::core::I2CDevice;
#[cfg(feature = "hardware")]
use i2cdev::linux::LinuxI2CDevice;
#[cfg(feature = "hardware")]
use tracing::info;

#[cfg(feature = "hardware")]
use super::DisplayDevice;

/// Character controller address
pub const LCD_ADDRESS: u16 = 0x3E;

/// Backlight controller address
pub const RGB_ADDRESS: u16 = 0x62;

/// Visible characters per row
pub const LCD_COLUMNS: usize = 16;

const CONTROL_COMMAND: u8 = 0x80;
const CONTROL_DATA: u8 = 0x40;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_SET: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;

const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINE: u8 = 0x08;

const ROW_OFFSETS: [u8; 2] = [0x80, 0xC0];

const REG_MODE1: u8 = 0x00;
const REG_MODE2: u8 = 0x01;
const REG_BLUE: u8 = 0x02;
const REG_GREEN: u8 = 0x03;
const REG_RED: u8 = 0x04;
const REG_OUTPUT: u8 = 0x08;

/// DDRAM address command for a cursor position
pub fn cursor_command(row: u8, col: u8) -> u8 {
    let offset = ROW_OFFSETS[usize::from(row.min(1))];
    offset | (col & 0x3F)
}

/// JHD1313M1 RGB LCD
#[cfg(feature = "hardware")]
pub struct Jhd1313m1 {
    lcd: LinuxI2CDevice,
    rgb: LinuxI2CDevice,
}

#[cfg(feature = "hardware")]
impl Jhd1313m1 {
    /// Open both controllers and run the power-on initialisation
    pub fn open(bus: u8, lcd_address: u16, rgb_address: u16) -> Result<Self> {
        let path = format!("/dev/i2c-{}", bus);
        let lcd = LinuxI2CDevice::new(&path, lcd_address)
            .with_context(|| format!("opening LCD at {} 0x{:02X}", path, lcd_address))?;
        let rgb = LinuxI2CDevice::new(&path, rgb_address)
            .with_context(|| format!("opening backlight at {} 0x{:02X}", path, rgb_address))?;

        let mut display = Self { lcd, rgb };
        display.init()?;
        info!("LCD ready on {} (0x{:02X}/0x{:02X})", path, lcd_address, rgb_address);
        Ok(display)
    }

    fn init(&mut self) -> Result<()> {
        sleep(Duration::from_millis(50));
        self.command(CMD_FUNCTION_SET | TWO_LINE)?;
        sleep(Duration::from_micros(4500));
        self.command(CMD_FUNCTION_SET | TWO_LINE)?;
        sleep(Duration::from_micros(150));
        self.command(CMD_FUNCTION_SET | TWO_LINE)?;

        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        sleep(Duration::from_millis(2));
        self.command(CMD_ENTRY_MODE_SET | ENTRY_LEFT)?;

        self.backlight_register(REG_MODE1, 0x00)?;
        self.backlight_register(REG_MODE2, 0x00)?;
        // All LED outputs under individual PWM control
        self.backlight_register(REG_OUTPUT, 0xAA)?;
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<()> {
        self.lcd
            .write(&[CONTROL_COMMAND, value])
            .context("LCD command write")
    }

    fn backlight_register(&mut self, register: u8, value: u8) -> Result<()> {
        self.rgb
            .smbus_write_byte_data(register, value)
            .with_context(|| format!("backlight register 0x{:02X}", register))
    }
}

#[cfg(feature = "hardware")]
impl DisplayDevice for Jhd1313m1 {
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<()> {
        self.command(cursor_command(row, col))
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.backlight_register(REG_RED, r)?;
        self.backlight_register(REG_GREEN, g)?;
        self.backlight_register(REG_BLUE, b)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        for byte in text.bytes() {
            self.lcd
                .write(&[CONTROL_DATA, byte])
                .context("LCD data write")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_command() {
        assert_eq!(cursor_command(0, 0), 0x80);
        assert_eq!(cursor_command(0, 5), 0x85);
        assert_eq!(cursor_command(1, 0), 0xC0);
        assert_eq!(cursor_command(1, 15), 0xCF);
    }
}
