//! Sensor modules for the MPU-6050
//!
//! Types, enums, and unit conversion for each sensor in the MPU-6050:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//! - Temperature
//!
//! All sensor operations are performed through methods on `Mpu6050Driver`.

pub mod accelerometer;
pub mod gyroscope;
pub mod temperature;

// Re-export main types
pub use accelerometer::{AccelMps2, AccelRange};
pub use gyroscope::{GyroDps, GyroRange};

/// Digital low pass filter bandwidth (`DLPF_CFG`)
///
/// Bandwidths are listed as accelerometer / gyroscope. Settings other than
/// `Hz260` drop the gyroscope output rate from 8 kHz to 1 kHz. `DLPF_CFG` 7 is
/// reserved and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DlpfBandwidth {
    /// 260 Hz / 256 Hz
    Hz260 = 0,
    /// 184 Hz / 188 Hz
    Hz184 = 1,
    /// 94 Hz / 98 Hz
    Hz94 = 2,
    /// 44 Hz / 42 Hz
    Hz44 = 3,
    /// 21 Hz / 20 Hz
    Hz21 = 4,
    /// 10 Hz / 10 Hz
    Hz10 = 5,
    /// 5 Hz / 5 Hz
    Hz5 = 6,
}

impl DlpfBandwidth {
    /// Accelerometer 3dB bandwidth in Hz
    #[must_use]
    pub const fn accel_bandwidth_hz(self) -> u16 {
        match self {
            Self::Hz260 => 260,
            Self::Hz184 => 184,
            Self::Hz94 => 94,
            Self::Hz44 => 44,
            Self::Hz21 => 21,
            Self::Hz10 => 10,
            Self::Hz5 => 5,
        }
    }

    /// Gyroscope output rate in Hz, before the sample rate divider
    #[must_use]
    pub const fn gyro_output_rate_hz(self) -> u16 {
        match self {
            Self::Hz260 => 8000,
            _ => 1000,
        }
    }

    /// Effective sample rate in Hz for the given divider
    #[must_use]
    pub fn sample_rate_hz(self, divider: u8) -> f32 {
        f32::from(self.gyro_output_rate_hz()) / (1.0 + f32::from(divider))
    }
}
