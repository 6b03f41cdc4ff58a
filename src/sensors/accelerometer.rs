//! Accelerometer sensor types and unit conversion
//!
//! Provides the full-scale range enum and the m/s² sample type for the MPU-6050's
//! 3-axis accelerometer.

/// Standard gravity in m/s²
pub const STANDARD_GRAVITY: f32 = 9.806_65;

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelRange {
    /// ±2g range (most sensitive, least range)
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelRange {
    /// Get the sensitivity in LSB/g (Least Significant Bit per g)
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G2 => 16384.0, // LSB/g
            Self::G4 => 8192.0,  // LSB/g
            Self::G8 => 4096.0,  // LSB/g
            Self::G16 => 2048.0, // LSB/g
        }
    }

    /// Scale factor in (m/s²)/LSB
    #[must_use]
    pub fn scale(self) -> f32 {
        STANDARD_GRAVITY / self.sensitivity()
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Decode the `AFS_SEL` register field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::G2),
            1 => Some(Self::G4),
            2 => Some(Self::G8),
            3 => Some(Self::G16),
            _ => None,
        }
    }
}

/// Convert one raw accelerometer count to m/s²
///
/// An unconfigured range (`None`) yields 0.0 rather than an undefined scale.
#[must_use]
pub fn raw_to_mps2(raw: i16, range: Option<AccelRange>) -> f32 {
    range.map_or(0.0, |range| f32::from(raw) * range.scale())
}

/// Accelerometer data in m/s²
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelMps2 {
    /// X-axis acceleration in m/s²
    pub x: f32,
    /// Y-axis acceleration in m/s²
    pub y: f32,
    /// Z-axis acceleration in m/s²
    pub z: f32,
}

impl AccelMps2 {
    /// Create from raw sensor values
    #[must_use]
    pub fn from_raw(raw_x: i16, raw_y: i16, raw_z: i16, range: Option<AccelRange>) -> Self {
        Self {
            x: raw_to_mps2(raw_x, range),
            y: raw_to_mps2(raw_y, range),
            z: raw_to_mps2(raw_z, range),
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
