/// Default interval between device-ready polls, in milliseconds.
pub const DEFAULT_READY_POLL_INTERVAL_MS: u32 = 5;

/// Default number of device-ready polls before giving up.
///
/// With the default interval this allows 800 ms, above the 320 ms a 14-bit
/// temperature conversion takes in the worst case.
pub const DEFAULT_READY_POLL_LIMIT: u32 = 160;

/// Timing knobs for the measurement exchange.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Sleep between two samples of the DATA line while waiting for a
    /// measurement to finish.
    pub ready_poll_interval_ms: u32,
    /// Number of samples after which the exchange is abandoned as timed out.
    pub ready_poll_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ready_poll_interval_ms: DEFAULT_READY_POLL_INTERVAL_MS,
            ready_poll_limit: DEFAULT_READY_POLL_LIMIT,
        }
    }
}

impl Config {
    pub fn with_ready_poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.ready_poll_interval_ms = interval_ms;
        self
    }

    pub fn with_ready_poll_limit(mut self, limit: u32) -> Self {
        self.ready_poll_limit = limit;
        self
    }

    /// Longest time spent waiting for a measurement, ignoring timer jitter.
    pub fn ready_timeout_ms(&self) -> u32 {
        self.ready_poll_interval_ms
            .saturating_mul(self.ready_poll_limit)
    }
}
