use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::signal::{BIT_DELAY_US, Signal};

/// The SCK/DATA pair and the delay that paces it.
///
/// DATA is expected to be an open-drain pin with an external pull-up:
/// `set_low` pulls the line down, `set_high` lets go of it so the sensor
/// can drive it.
pub(crate) struct Bus<SCK, DATA, D> {
    sck: SCK,
    data: DATA,
    delay: D,
}

impl<SCK, DATA, D> Bus<SCK, DATA, D> {
    pub(crate) fn new(sck: SCK, data: DATA, delay: D) -> Self {
        Bus { sck, data, delay }
    }

    pub(crate) fn release(self) -> (SCK, DATA, D) {
        (self.sck, self.data, self.delay)
    }
}

impl<SCK, DATA, D, E> Bus<SCK, DATA, D>
where
    SCK: OutputPin<Error = E>,
    DATA: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
{
    /// Runs a fixed signal sequence, step by step.
    pub(crate) fn apply(&mut self, signals: &[Signal]) -> Result<(), E> {
        for signal in signals {
            self.signal(*signal)?;
        }
        Ok(())
    }

    fn signal(&mut self, signal: Signal) -> Result<(), E> {
        match signal {
            Signal::ClockHigh => self.sck.set_high(),
            Signal::ClockLow => self.sck.set_low(),
            Signal::DataAssertLow => self.data.set_low(),
            Signal::DataRelease => self.data.set_high(),
            Signal::Delay => {
                self.delay.delay_us(BIT_DELAY_US);
                Ok(())
            }
        }
    }

    /// Writes one byte MSB first and clocks in the sensor's acknowledge.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the sensor pulled DATA low on the ninth clock
    /// * `Ok(false)` if DATA stayed high
    pub(crate) fn send_byte(&mut self, value: u8) -> Result<bool, E> {
        for i in 0..8 {
            let bit_mask = 1 << (7 - i);

            self.signal(Signal::ClockLow)?;
            self.signal(Signal::Delay)?;
            if value & bit_mask != 0 {
                self.signal(Signal::DataRelease)?;
            } else {
                self.signal(Signal::DataAssertLow)?;
            }
            self.signal(Signal::Delay)?;
            // Sensor latches DATA on the rising edge
            self.signal(Signal::ClockHigh)?;
            self.signal(Signal::Delay)?;
        }

        self.signal(Signal::ClockLow)?;
        self.signal(Signal::Delay)?;
        self.signal(Signal::DataRelease)?;
        self.signal(Signal::Delay)?;
        self.signal(Signal::ClockHigh)?;
        self.signal(Signal::Delay)?;

        let ack = self.data.is_low()?;

        self.signal(Signal::ClockLow)?;
        self.signal(Signal::Delay)?;

        Ok(ack)
    }

    /// Reads one byte MSB first.
    ///
    /// The ninth clock is always issued. With `ack` set DATA is held low
    /// during it to tell the sensor more bytes are wanted; otherwise DATA
    /// stays released, which ends the transfer.
    pub(crate) fn read_byte(&mut self, ack: bool) -> Result<u8, E> {
        let mut byte: u8 = 0;

        for i in 0..8 {
            let bit_mask = 1 << (7 - i);

            self.signal(Signal::ClockHigh)?;
            self.signal(Signal::Delay)?;
            if self.data.is_high()? {
                byte |= bit_mask;
            }
            self.signal(Signal::ClockLow)?;
            self.signal(Signal::Delay)?;
        }

        if ack {
            self.signal(Signal::DataAssertLow)?;
            self.signal(Signal::Delay)?;
        }

        self.signal(Signal::ClockHigh)?;
        self.signal(Signal::Delay)?;
        self.signal(Signal::ClockLow)?;
        self.signal(Signal::Delay)?;

        if ack {
            self.signal(Signal::DataRelease)?;
            self.signal(Signal::Delay)?;
        }

        Ok(byte)
    }

    /// Polls DATA until the sensor pulls it low to signal a finished
    /// measurement.
    ///
    /// Samples at most `limit` times, sleeping `interval_ms` after each
    /// high sample.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` once DATA reads low
    /// * `Ok(false)` if it never did within `limit` samples
    pub(crate) fn wait_ready(&mut self, interval_ms: u32, limit: u32) -> Result<bool, E> {
        for _ in 0..limit {
            if self.data.is_low()? {
                return Ok(true);
            }
            self.delay.delay_ms(interval_ms);
        }
        Ok(false)
    }

    /// Drives both lines low, the state the sensor expects at power-up.
    pub(crate) fn drive_low(&mut self) -> Result<(), E> {
        self.sck.set_low()?;
        self.data.set_low()
    }

    /// Leaves the bus idle: DATA released, SCK low.
    pub(crate) fn idle(&mut self) -> Result<(), E> {
        self.data.set_high()?;
        self.sck.set_low()
    }

    pub(crate) fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
