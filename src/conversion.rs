//! Conversion of raw sensor output to physical units.
//!
//! Coefficients are the datasheet values for 14-bit temperature at 5 V
//! supply and 12-bit humidity readings.

/// Temperature offset `d1` (°C) for a 5 V supply.
pub const D1: f32 = -40.0;
/// Temperature slope `d2` (°C per count) at 14-bit resolution.
pub const D2: f32 = 0.01;

/// Humidity linearisation, constant term.
pub const C1: f32 = -4.0;
/// Humidity linearisation, linear term.
pub const C2: f32 = 0.0405;
/// Humidity linearisation, quadratic term.
pub const C3: f32 = -2.8e-6;

/// Humidity temperature compensation, constant term.
pub const T1: f32 = 0.01;
/// Humidity temperature compensation, linear term.
pub const T2: f32 = 8e-5;

/// Lowest relative humidity reported after compensation.
pub const HUMIDITY_MIN: f32 = 0.1;
/// Highest relative humidity reported after compensation.
pub const HUMIDITY_MAX: f32 = 100.0;

/// Converts a raw temperature reading to degrees Celsius.
pub fn temperature_celsius(raw: u16) -> f32 {
    raw as f32 * D2 + D1
}

/// Linearised relative humidity, without temperature compensation.
///
/// Not clamped, so it can fall outside 0..100 %RH.
pub fn humidity_linear(raw: u16) -> f32 {
    let rh = raw as f32;
    C3 * rh * rh + C2 * rh + C1
}

/// Temperature compensated relative humidity, clamped to
/// [`HUMIDITY_MIN`]..=[`HUMIDITY_MAX`].
pub fn humidity_compensated(raw: u16, temperature: f32) -> f32 {
    let rh = raw as f32;
    let rh_true = (temperature - 25.0) * (T1 + T2 * rh) + humidity_linear(raw);
    rh_true.clamp(HUMIDITY_MIN, HUMIDITY_MAX)
}
