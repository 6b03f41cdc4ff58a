//! Bias calibration
//!
//! While the device is stationary and level, the accelerometer tilt angles and
//! gyroscope rates should all read zero. Calibration averages a series of
//! samples of each and stores the result as a [`Bias`] that later reads
//! subtract.
//!
//! Samples whose bus read failed are rejected from the running sum. The pass
//! fails if fewer than [`MIN_CALIBRATION_SAMPLES`] valid samples remain. The
//! average always divides by the *requested* sample count, so rejected
//! samples pull the bias toward zero.

use crate::sensors::GyroDps;

/// Minimum number of samples a calibration pass needs
pub const MIN_CALIBRATION_SAMPLES: u16 = 10;

/// Steady-state sensor bias
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bias {
    /// Tilt angle X offset in degrees
    pub accel_x: f32,
    /// Tilt angle Y offset in degrees
    pub accel_y: f32,
    /// X-axis rate offset in °/s
    pub gyro_x: f32,
    /// Y-axis rate offset in °/s
    pub gyro_y: f32,
    /// Z-axis rate offset in °/s
    pub gyro_z: f32,
}

impl Bias {
    /// No correction
    pub const ZERO: Self = Self {
        accel_x: 0.0,
        accel_y: 0.0,
        gyro_x: 0.0,
        gyro_y: 0.0,
        gyro_z: 0.0,
    };

    /// Subtract the gyroscope offsets from a rate sample
    #[must_use]
    pub fn correct_gyro(&self, rate: GyroDps) -> GyroDps {
        GyroDps {
            x: rate.x - self.gyro_x,
            y: rate.y - self.gyro_y,
            z: rate.z - self.gyro_z,
        }
    }

    /// Clear the tilt angle offsets
    pub fn reset_accel(&mut self) {
        self.accel_x = 0.0;
        self.accel_y = 0.0;
    }

    /// Clear the gyroscope offsets
    pub fn reset_gyro(&mut self) {
        self.gyro_x = 0.0;
        self.gyro_y = 0.0;
        self.gyro_z = 0.0;
    }
}

/// Running sum over one calibration pass of `N` channels
#[derive(Debug, Clone, Copy)]
pub struct BiasAccumulator<const N: usize> {
    requested: u16,
    accepted: u16,
    sum: [f32; N],
}

impl<const N: usize> BiasAccumulator<N> {
    /// Start a pass that will be averaged over `requested` samples
    #[must_use]
    pub const fn new(requested: u16) -> Self {
        Self {
            requested,
            accepted: 0,
            sum: [0.0; N],
        }
    }

    /// Fold one sample into the sum, or reject it (`None`)
    pub fn add(&mut self, sample: Option<[f32; N]>) {
        if let Some(values) = sample {
            for (sum, value) in self.sum.iter_mut().zip(values) {
                *sum += value;
            }
            self.accepted = self.accepted.saturating_add(1);
        }
    }

    /// Number of samples folded in so far
    #[must_use]
    pub const fn accepted(&self) -> u16 {
        self.accepted
    }

    /// Average over the requested count, or `None` if too few samples were valid
    #[must_use]
    pub fn finish(&self) -> Option<[f32; N]> {
        if self.accepted < MIN_CALIBRATION_SAMPLES {
            return None;
        }
        let divisor = f32::from(self.requested);
        Some(self.sum.map(|sum| sum / divisor))
    }
}
