//! Primitive line operations and the fixed sequences built from them.
//!
//! The SHT1x has two framing sequences that are not byte transfers: the
//! transmission start, which toggles DATA while SCK is high, and the
//! connection reset, which clocks the interface out of whatever state it
//! was left in. Both are expressed as const arrays of [`Signal`] so the
//! exact order of edges can be read off the source and asserted in tests.

/// One primitive operation on the clock/data pair.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Drive SCK high.
    ClockHigh,
    /// Drive SCK low.
    ClockLow,
    /// Pull DATA low.
    DataAssertLow,
    /// Let go of DATA; the pull-up takes it high unless the sensor drives it.
    DataRelease,
    /// Setup/hold pause between edges (see [`BIT_DELAY_US`]).
    Delay,
}

/// Pause inserted after every edge, in microseconds.
///
/// The SHT1x interface runs at up to 1 MHz at 5 V, so 1 µs is enough for
/// every setup and hold time on the bus.
pub const BIT_DELAY_US: u32 = 1;

/// Number of clock pulses in the connection reset sequence.
pub const RESET_CLOCK_PULSES: usize = 9;

/// "Transmission Start": DATA falls while SCK is high, then rises again
/// during the next SCK high phase.
///
/// ```text
///        _____         ________
/// DATA:       |_______|
///            ___     ___
/// SCK :  ___|   |___|   |______
/// ```
pub const TRANSMISSION_START: [Signal; 12] = [
    Signal::ClockHigh,
    Signal::Delay,
    Signal::DataAssertLow,
    Signal::Delay,
    Signal::ClockLow,
    Signal::Delay,
    Signal::ClockHigh,
    Signal::Delay,
    Signal::DataRelease,
    Signal::Delay,
    Signal::ClockLow,
    Signal::Delay,
];

/// Connection reset: DATA released, followed by nine or more SCK pulses.
pub const RESET: [Signal; 2 + RESET_CLOCK_PULSES * 4] = reset_sequence();

const fn reset_sequence() -> [Signal; 2 + RESET_CLOCK_PULSES * 4] {
    let mut seq = [Signal::Delay; 2 + RESET_CLOCK_PULSES * 4];
    seq[0] = Signal::DataRelease;

    let mut i = 0;
    while i < RESET_CLOCK_PULSES {
        let base = 2 + i * 4;
        seq[base] = Signal::ClockHigh;
        seq[base + 2] = Signal::ClockLow;
        i += 1;
    }
    seq
}
