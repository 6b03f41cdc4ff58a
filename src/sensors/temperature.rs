//! Die temperature conversion
//!
//! Temperature in °C = `TEMP_OUT` / 340 + 36.53. Independent of any range setting.

const TEMP_SENSITIVITY: f32 = 340.0; // LSB/°C
const TEMP_OFFSET: f32 = 36.53; // °C

/// Convert raw temperature to degrees Celsius
#[must_use]
pub fn raw_to_celsius(raw: i16) -> f32 {
    f32::from(raw) / TEMP_SENSITIVITY + TEMP_OFFSET
}
