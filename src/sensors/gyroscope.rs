//! Gyroscope sensor types and unit conversion
//!
//! Provides the full-scale range enum and the °/s sample type for the MPU-6050's
//! 3-axis gyroscope.

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroRange {
    /// ±250°/s range
    Dps250 = 0,
    /// ±500°/s range
    Dps500 = 1,
    /// ±1000°/s range
    Dps1000 = 2,
    /// ±2000°/s range
    Dps2000 = 3,
}

impl GyroRange {
    /// Get the sensitivity in LSB/(°/s)
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps250 => 131.0, // LSB/(°/s)
            Self::Dps500 => 65.5,  // LSB/(°/s)
            Self::Dps1000 => 32.8, // LSB/(°/s)
            Self::Dps2000 => 16.4, // LSB/(°/s)
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    /// Decode the `FS_SEL` register field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Dps250),
            1 => Some(Self::Dps500),
            2 => Some(Self::Dps1000),
            3 => Some(Self::Dps2000),
            _ => None,
        }
    }
}

/// Convert one raw gyroscope count to °/s
///
/// An unconfigured range (`None`) yields 0.0.
#[must_use]
pub fn raw_to_dps(raw: i16, range: Option<GyroRange>) -> f32 {
    range.map_or(0.0, |range| f32::from(raw) / range.sensitivity())
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDps {
    /// Create from raw sensor values
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, range: Option<GyroRange>) -> Self {
        Self {
            x: raw_to_dps(raw_x, range),
            y: raw_to_dps(raw_y, range),
            z: raw_to_dps(raw_z, range),
        }
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
