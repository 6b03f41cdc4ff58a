#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod device;
pub mod interface;
pub mod orientation;
pub mod registers;
pub mod sensors;
pub mod time;

// Re-export main types
pub use calibration::{Bias, MIN_CALIBRATION_SAMPLES};
pub use device::{InitStage, Mpu6050Config, Mpu6050Driver, Reading};
pub use interface::{I2cInterface, describe_bus_fault};
pub use orientation::{ComplementaryFilter, Orientation};
pub use sensors::{AccelMps2, AccelRange, DlpfBandwidth, GyroDps, GyroRange};
pub use time::TimeSource;

/// MPU-6050 I2C address when AD0 pin is low (default: 0x68)
///
/// Use [`I2cInterface::default()`] for this configuration.
pub const I2C_ADDRESS_AD0_LOW: u8 = 0x68;

/// MPU-6050 I2C address when AD0 pin is high (alternative: 0x69)
///
/// Use [`I2cInterface::alternative()`] for this configuration.
pub const I2C_ADDRESS_AD0_HIGH: u8 = 0x69;

/// Expected value of `WHO_AM_I` register
///
/// The register reports the AD0-low address regardless of the actual AD0 level.
pub const WHO_AM_I_VALUE: u8 = 0x68;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
    /// Calibration could not gather enough fault-free samples
    InsufficientSamples,
    /// Data was requested before [`Mpu6050Driver::init`] completed
    NotReady,
}

impl<E> Error<E> {
    /// Human-readable description of the fault, for diagnostics
    ///
    /// For transport faults this is generic; use [`describe_bus_fault`] on the
    /// inner error when it comes from an `embedded-hal` I2C bus.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Bus(_) => "bus transaction failed",
            Self::InvalidDevice(_) => "who-am-i mismatch",
            Self::InsufficientSamples => "calibrate: too few samples",
            Self::NotReady => "not ready: init has not completed",
        }
    }
}

impl<E> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDevice(id) => write!(f, "{} (read {id:#04x})", self.describe()),
            _ => f.write_str(self.describe()),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
