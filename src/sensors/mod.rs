//! Sensor module - motion sample sources

mod traits;
mod mma7660;
mod simulator;

pub use traits::{Axis, Reading, SampleSource};
pub use mma7660::{counts_to_g, decode_axis, DEFAULT_ADDRESS as MMA7660_ADDRESS};
#[cfg(feature = "hardware")]
pub use mma7660::Mma7660Sensor;
pub use simulator::SimulatedAccelerometer;
