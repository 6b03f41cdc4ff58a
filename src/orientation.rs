//! Orientation estimation
//!
//! Roll and pitch come from a single-pole complementary filter: the integrated
//! gyroscope angle (smooth, but drifts) is blended with the accelerometer tilt
//! angle (absolute, but noisy) using fixed weights. Yaw has no gravity
//! reference and is the integrated gyroscope Z angle alone, so it drifts
//! without bound over long runs.
//!
//! Tilt angles are only meaningful while gravity dominates the measured
//! acceleration. Free-fall or strong linear acceleration is not detected.

use crate::calibration::Bias;
use crate::sensors::{AccelMps2, GyroDps};

/// Weight of the integrated gyroscope angle in roll and pitch
pub const GYRO_WEIGHT: f32 = 0.96;
/// Weight of the accelerometer tilt angle in roll and pitch
pub const ACCEL_WEIGHT: f32 = 0.04;

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Tilt around the X axis in degrees, from the Y component of gravity
#[must_use]
pub fn tilt_x(accel: &AccelMps2, bias: &Bias) -> f32 {
    let radians = libm::atan2f(accel.y, libm::sqrtf(accel.x * accel.x + accel.z * accel.z));
    radians * RAD_TO_DEG - bias.accel_x
}

/// Tilt around the Y axis in degrees, from the X component of gravity
#[must_use]
pub fn tilt_y(accel: &AccelMps2, bias: &Bias) -> f32 {
    let radians = libm::atan2f(-accel.x, libm::sqrtf(accel.y * accel.y + accel.z * accel.z));
    radians * RAD_TO_DEG - bias.accel_y
}

/// Fused orientation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Rotation around X
    pub roll: f32,
    /// Rotation around Y
    pub pitch: f32,
    /// Rotation around Z (gyroscope only)
    pub yaw: f32,
}

/// Complementary filter state
///
/// Persists across reads. A read that faulted must not reach [`update`](Self::update);
/// the state then stays frozen at its last value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComplementaryFilter {
    last_update_us: u64,
    gyro_angle: [f32; 3],
    orientation: Orientation,
}

impl ComplementaryFilter {
    /// Create a filter whose clock starts at `now_us`
    #[must_use]
    pub const fn new(now_us: u64) -> Self {
        Self {
            last_update_us: now_us,
            gyro_angle: [0.0; 3],
            orientation: Orientation {
                roll: 0.0,
                pitch: 0.0,
                yaw: 0.0,
            },
        }
    }

    /// Restart integration: set the clock to `now_us` and zero the integrated angles
    ///
    /// The last fused orientation is kept until the next update replaces it.
    pub const fn seed(&mut self, now_us: u64) {
        self.last_update_us = now_us;
        self.gyro_angle = [0.0; 3];
    }

    /// Fold in one fault-free accelerometer/gyroscope sample pair taken at `now_us`
    ///
    /// `gyro` must already be bias corrected; `bias` supplies the tilt offsets.
    pub fn update(
        &mut self,
        accel: &AccelMps2,
        gyro: &GyroDps,
        bias: &Bias,
        now_us: u64,
    ) -> Orientation {
        let accel_angle_x = tilt_x(accel, bias);
        let accel_angle_y = tilt_y(accel, bias);

        #[allow(clippy::cast_precision_loss)]
        let dt = now_us.saturating_sub(self.last_update_us) as f32 / 1_000_000.0;
        self.last_update_us = now_us;

        // Unbounded on purpose: no wraparound to ±180
        self.gyro_angle[0] += gyro.x * dt;
        self.gyro_angle[1] += gyro.y * dt;
        self.gyro_angle[2] += gyro.z * dt;

        self.orientation = Orientation {
            roll: GYRO_WEIGHT * self.gyro_angle[0] + ACCEL_WEIGHT * accel_angle_x,
            pitch: GYRO_WEIGHT * self.gyro_angle[1] + ACCEL_WEIGHT * accel_angle_y,
            yaw: self.gyro_angle[2],
        };
        self.orientation
    }

    /// Last fused orientation
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Integrated gyroscope angles (X, Y, Z) in degrees
    #[must_use]
    pub const fn gyro_angle(&self) -> [f32; 3] {
        self.gyro_angle
    }

    /// Timestamp of the last update, in microseconds
    #[must_use]
    pub const fn last_update_us(&self) -> u64 {
        self.last_update_us
    }
}
