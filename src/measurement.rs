/// Physical quantity the sensor can be asked to measure.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    Temperature,
    Humidity,
}

/// Command bytes understood by the SHT1x.
///
/// Only the low 5 bits are the command, the upper 3 bits are the address
/// which is always `000`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    MeasureTemperature = 0x03,
    MeasureHumidity = 0x05,
    ReadStatusRegister = 0x07,
    SoftReset = 0x1E,
}

impl From<Quantity> for Command {
    fn from(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Temperature => Command::MeasureTemperature,
            Quantity::Humidity => Command::MeasureHumidity,
        }
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command as u8
    }
}

/// How a single command exchange ended.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Data received and the checksum matched.
    Success,
    /// The sensor never pulled DATA low to signal a finished measurement.
    Timeout,
    /// Data received but the checksum did not match.
    ChecksumMismatch,
}

/// Unconverted result of one measurement exchange.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawReading {
    pub outcome: Outcome,
    /// `(high << 8) | low`. Zero on timeout.
    pub value: u16,
    /// Checksum byte as received from the sensor. Zero on timeout.
    pub checksum: u8,
}

impl RawReading {
    pub(crate) const fn timeout() -> Self {
        RawReading {
            outcome: Outcome::Timeout,
            value: 0,
            checksum: 0,
        }
    }

    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    pub const fn timed_out(&self) -> bool {
        matches!(self.outcome, Outcome::Timeout)
    }
}

/// Converted value for one quantity together with how it was obtained.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    /// The latest exchange for this quantity passed the checksum.
    pub succeeded: bool,
    /// The latest exchange for this quantity ran out of ready polls.
    pub timed_out: bool,
    /// Degrees Celsius or %RH. Keeps the last good value when the latest
    /// exchange failed.
    pub value: f32,
}

/// Result of a full temperature and humidity measurement.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Timestamp from the driver's [`Clock`](crate::Clock), in milliseconds.
    pub measured_at: u64,
    pub temperature: Reading,
    pub humidity: Reading,
}

/// Last cached temperature.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemperatureReport {
    pub measured_at: u64,
    /// Degrees Celsius.
    pub temperature: f32,
}

/// Last cached relative humidity.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HumidityReport {
    pub measured_at: u64,
    /// Percent relative humidity.
    pub humidity: f32,
}

/// Contents of the SHT1x status register.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusRegister(u8);

impl StatusRegister {
    const LOW_BATTERY: u8 = 1 << 6;
    const HEATER: u8 = 1 << 2;
    const NO_RELOAD: u8 = 1 << 1;
    const LOW_RESOLUTION: u8 = 1 << 0;

    pub const fn from_bits(bits: u8) -> Self {
        StatusRegister(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Supply voltage dropped below 2.47 V.
    pub const fn low_battery(&self) -> bool {
        self.0 & Self::LOW_BATTERY != 0
    }

    pub const fn heater(&self) -> bool {
        self.0 & Self::HEATER != 0
    }

    /// Calibration is not reloaded from OTP before each measurement.
    pub const fn no_reload(&self) -> bool {
        self.0 & Self::NO_RELOAD != 0
    }

    /// 8-bit humidity / 12-bit temperature instead of 12 / 14 bits.
    pub const fn low_resolution(&self) -> bool {
        self.0 & Self::LOW_RESOLUTION != 0
    }
}
