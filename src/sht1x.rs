use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
};

use crate::bus::Bus;
use crate::clock::{Clock, NoClock};
use crate::config::Config;
use crate::conversion;
use crate::crc::Crc8;
use crate::error::Error;
use crate::measurement::{
    Command, HumidityReport, Measurement, Outcome, Quantity, RawReading, Reading, StatusRegister,
    TemperatureReport,
};
use crate::signal::{RESET, TRANSMISSION_START};

/// Time the sensor needs after power-up before it accepts commands.
pub const POWER_UP_MS: u32 = 20;

/// Time the sensor needs after a soft reset to restore its status register
/// defaults.
pub const SOFT_RESET_SETTLE_MS: u32 = 11;

/// Driver for the SHT1x temperature and humidity sensor.
pub struct Sht1x<SCK, DATA, D, C = NoClock> {
    bus: Bus<SCK, DATA, D>,
    clock: C,
    config: Config,
    status: StatusRegister,
    open: bool,
    last: Measurement,
}

impl<SCK, DATA, D> Sht1x<SCK, DATA, D, NoClock> {
    /// Creates a new, closed instance of the SHT1x driver.
    ///
    /// # Arguments
    ///
    /// * `sck` - The GPIO pin connected to the SCK line.
    /// * `data` - The GPIO pin connected to the DATA line. Must be open-drain
    ///   with a pull-up and support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(sck: SCK, data: DATA, delay: D) -> Self {
        Self::with_config(sck, data, delay, Config::default())
    }

    /// Like [`Sht1x::new`] with custom timing.
    pub fn with_config(sck: SCK, data: DATA, delay: D, config: Config) -> Self {
        Sht1x {
            bus: Bus::new(sck, data, delay),
            clock: NoClock,
            config,
            status: StatusRegister::default(),
            open: false,
            last: Measurement::default(),
        }
    }
}

impl<SCK, DATA, D, C> Sht1x<SCK, DATA, D, C> {
    /// Replaces the source of measurement timestamps.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Sht1x<SCK, DATA, D, C2> {
        Sht1x {
            bus: self.bus,
            clock,
            config: self.config,
            status: self.status,
            open: self.open,
            last: self.last,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Status register as last known to the driver.
    pub fn status_register(&self) -> StatusRegister {
        self.status
    }

    /// Result of the most recent [`Sht1x::measure_all`].
    pub fn last_measurement(&self) -> Measurement {
        self.last
    }

    /// Last good temperature, without touching the bus.
    pub fn last_temperature(&self) -> TemperatureReport {
        TemperatureReport {
            measured_at: self.last.measured_at,
            temperature: self.last.temperature.value,
        }
    }

    /// Last good relative humidity, without touching the bus.
    pub fn last_humidity(&self) -> HumidityReport {
        HumidityReport {
            measured_at: self.last.measured_at,
            humidity: self.last.humidity.value,
        }
    }

    /// Gives back the pins and the delay.
    pub fn release(self) -> (SCK, DATA, D) {
        self.bus.release()
    }
}

impl<SCK, DATA, D, C, E> Sht1x<SCK, DATA, D, C>
where
    SCK: OutputPin<Error = E>,
    DATA: InputPin<Error = E> + OutputPin<Error = E>,
    D: DelayNs,
    C: Clock,
{
    /// Powers up and resets the sensor.
    ///
    /// Does nothing if the driver is already open. Otherwise both lines are
    /// driven low, the sensor gets [`POWER_UP_MS`] to start and is then
    /// reset, and the cached measurement is cleared.
    pub fn open(&mut self) -> Result<(), Error<E>> {
        if self.open {
            return Ok(());
        }

        self.bus.drive_low()?;
        self.bus.delay_ms(POWER_UP_MS);
        self.soft_reset()?;

        self.last = Measurement::default();
        self.open = true;
        debug!("sht1x: opened");
        Ok(())
    }

    /// Leaves the bus idle. Does nothing if the driver is not open.
    pub fn close(&mut self) -> Result<(), Error<E>> {
        if !self.open {
            return Ok(());
        }

        self.bus.idle()?;
        self.open = false;
        debug!("sht1x: closed");
        Ok(())
    }

    /// Forces the sensor back into its power-up state.
    pub fn reset(&mut self) -> Result<(), Error<E>> {
        self.ensure_open()?;
        self.soft_reset()?;
        Ok(())
    }

    /// Measures temperature, then humidity, and converts both.
    ///
    /// Failed exchanges are reported through the `succeeded` and
    /// `timed_out` flags; the value of a failed quantity stays at the last
    /// good one. Humidity is temperature compensated only when the
    /// temperature exchange succeeded.
    ///
    /// # Errors
    ///
    /// * `Error::NotOpen` if called before [`Sht1x::open`]
    /// * `Error::HardwareFault` if a pin operation fails
    pub fn measure_all(&mut self) -> Result<Measurement, Error<E>> {
        let temperature = self.measure_raw(Quantity::Temperature)?;
        let humidity = self.measure_raw(Quantity::Humidity)?;

        self.last.measured_at = self.clock.now();

        update_reading(&mut self.last.temperature, &temperature, || {
            conversion::temperature_celsius(temperature.value)
        });

        let celsius = self.last.temperature.value;
        update_reading(&mut self.last.humidity, &humidity, || {
            if temperature.succeeded() {
                conversion::humidity_compensated(humidity.value, celsius)
            } else {
                conversion::humidity_linear(humidity.value)
            }
        });

        Ok(self.last)
    }

    /// Runs one measurement exchange and returns the unconverted result.
    ///
    /// Sends the measurement command, waits for the sensor to pull DATA low
    /// and reads two data bytes and the checksum. If the sensor does not
    /// become ready within the configured number of polls the exchange is
    /// abandoned without reading any data.
    pub fn measure_raw(&mut self, quantity: Quantity) -> Result<RawReading, Error<E>> {
        self.ensure_open()?;

        let mut crc = self.start_command(Command::from(quantity))?;

        let ready = self
            .bus
            .wait_ready(self.config.ready_poll_interval_ms, self.config.ready_poll_limit)?;
        if !ready {
            warn!(
                "sht1x: {} not ready after {=u32} ms",
                quantity,
                self.config.ready_timeout_ms()
            );
            return Ok(RawReading::timeout());
        }

        let high = self.bus.read_byte(true)?;
        let low = self.bus.read_byte(true)?;
        let checksum = self.bus.read_byte(false)?;

        crc.update(high);
        crc.update(low);

        let value = u16::from_be_bytes([high, low]);
        let outcome = if crc.verify(checksum) {
            Outcome::Success
        } else {
            warn!(
                "sht1x: checksum mismatch for {}, received {=u8:#x}",
                quantity, checksum
            );
            Outcome::ChecksumMismatch
        };
        trace!("sht1x: {} raw {=u16}", quantity, value);

        Ok(RawReading {
            outcome,
            value,
            checksum,
        })
    }

    /// Reads the status register back from the sensor.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(status))` if the checksum matched; the driver then seeds
    ///   later checksums from it
    /// * `Ok(None)` on a checksum mismatch, keeping the previous value
    pub fn read_status_register(&mut self) -> Result<Option<StatusRegister>, Error<E>> {
        self.ensure_open()?;

        let mut crc = self.start_command(Command::ReadStatusRegister)?;
        let status = self.bus.read_byte(true)?;
        let checksum = self.bus.read_byte(false)?;
        crc.update(status);

        if !crc.verify(checksum) {
            warn!("sht1x: checksum mismatch on status register");
            return Ok(None);
        }

        self.status = StatusRegister::from_bits(status);
        Ok(Some(self.status))
    }

    /// Connection reset followed by the soft reset command.
    fn soft_reset(&mut self) -> Result<(), E> {
        self.bus.apply(&RESET)?;
        self.start_command(Command::SoftReset)?;
        self.bus.delay_ms(SOFT_RESET_SETTLE_MS);

        self.status = StatusRegister::default();
        debug!("sht1x: reset");
        Ok(())
    }

    /// Transmission start and command byte. Returns the checksum for the
    /// exchange, already folded over the command.
    fn start_command(&mut self, command: Command) -> Result<Crc8, E> {
        self.bus.apply(&TRANSMISSION_START)?;

        let mut crc = Crc8::seeded(self.status.bits());
        let byte = u8::from(command);
        if !self.bus.send_byte(byte)? {
            warn!("sht1x: no ack for command {=u8:#x}", byte);
        }
        crc.update(byte);
        Ok(crc)
    }

    fn ensure_open(&self) -> Result<(), Error<E>> {
        if self.open {
            Ok(())
        } else {
            Err(Error::NotOpen)
        }
    }
}

/// Copies the outcome flags of `raw` into `reading` and, if it succeeded,
/// the converted value.
fn update_reading<F>(reading: &mut Reading, raw: &RawReading, convert: F)
where
    F: FnOnce() -> f32,
{
    reading.succeeded = raw.succeeded();
    reading.timed_out = raw.timed_out();
    if raw.succeeded() {
        reading.value = convert();
    }
}
