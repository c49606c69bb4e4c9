use core::fmt;

/// Possible errors from the SHT1x driver.
///
/// Protocol-level failures (the sensor never signalling ready, or a
/// checksum mismatch) are not errors; they are reported as flags on the
/// returned reading. Only misuse of the handle and GPIO failures end up here.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The driver was used before `open` or after `close`.
    NotOpen,
    /// Error from the clock or data pin.
    HardwareFault(E),
}

impl<E> From<E> for Error<E> {
    fn from(value: E) -> Self {
        Self::HardwareFault(value)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotOpen => f.write_str("sensor is not open"),
            Error::HardwareFault(e) => write!(f, "GPIO fault: {e:?}"),
        }
    }
}
