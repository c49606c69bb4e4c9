//! SHT1x Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the Sensirion SHT1x
//! (SHT10, SHT11, SHT15) temperature and humidity sensors, built on top of
//! the [`embedded-hal`] traits.
//!
//! The SHT1x talks a two-wire protocol that looks like I²C but is not
//! compatible with it, so the driver bit-bangs it on two GPIO pins: a
//! transmission start condition, command bytes with acknowledge, a wait for
//! the sensor to pull DATA low, and data bytes protected by a bit-reversed
//! CRC-8.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Timeouts and checksum failures are reported as flags, not errors
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`OutputPin`] for SCK
//! - [`InputPin`] and [`OutputPin`] for DATA (open-drain with pull-up)
//! - [`DelayNs`] for bit timing and the ready poll
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for all public types and logs
//!   resets, timeouts and checksum mismatches
//!
//! # Example
//!
//! ```ignore
//! let mut sht = Sht1x::new(sck, data, delay);
//! sht.open()?;
//! let measurement = sht.measure_all()?;
//! if measurement.temperature.succeeded {
//!     // measurement.temperature.value is in °C
//! }
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

mod bus;
pub mod clock;
pub mod config;
pub mod conversion;
pub mod crc;
pub mod error;
pub mod measurement;
pub mod sht1x;
pub mod signal;

#[cfg(test)]
mod testing;

pub use clock::{Clock, NoClock};
pub use config::Config;
pub use error::Error;
pub use measurement::{
    Command, HumidityReport, Measurement, Outcome, Quantity, RawReading, Reading, StatusRegister,
    TemperatureReport,
};
pub use sht1x::Sht1x;
