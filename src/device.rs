//! High-level driver API for the MPU-6050
//!
//! [`Mpu6050Driver`] owns everything that persists between calls: the
//! configured ranges, the calibration [`Bias`] and the orientation filter.
//! It is not reentrant; callers sharing one device across contexts must
//! serialize access themselves.

use crate::calibration::{Bias, BiasAccumulator, MIN_CALIBRATION_SAMPLES};
use crate::orientation::{ComplementaryFilter, Orientation, tilt_x, tilt_y};
use crate::registers::{ACCEL_XOUT_H, GYRO_XOUT_H, Mpu6050 as RegisterDevice, TEMP_OUT_H};
use crate::sensors::{AccelMps2, AccelRange, DlpfBandwidth, GyroDps, GyroRange, temperature};
use crate::time::TimeSource;
use crate::{Error, WHO_AM_I_VALUE};

use device_driver::RegisterInterface;

/// Position in the initialization sequence
///
/// [`Mpu6050Driver::init`] walks these in order and stops at the first
/// failing step, so `Ready` is only reached when every step succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStage {
    /// Nothing verified yet (also after [`Mpu6050Driver::reset`])
    Uninitialized,
    /// `WHO_AM_I` matched
    Verified,
    /// Sleep bit cleared
    Awake,
    /// Divider, ranges and filter written
    Configured,
    /// Bias computed or explicitly zeroed
    Calibrated,
    /// Orientation clock seeded
    Ready,
}

/// Driver configuration applied by [`Mpu6050Driver::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mpu6050Config {
    /// Samples per calibration pass; 0 skips calibration and zeroes the bias
    pub calibration_samples: u16,
    /// Accelerometer full-scale range
    pub accel_range: AccelRange,
    /// Gyroscope full-scale range
    pub gyro_range: GyroRange,
    /// Digital low pass filter
    pub dlpf: DlpfBandwidth,
    /// Sample rate divider (0-255)
    pub sample_rate_divider: u8,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Self {
            calibration_samples: 100,
            accel_range: AccelRange::G2,
            gyro_range: GyroRange::Dps250,
            dlpf: DlpfBandwidth::Hz44,
            sample_rate_divider: 0,
        }
    }
}

/// One combined snapshot from [`Mpu6050Driver::read_all`]
///
/// Each sensor carries its own result. When either motion read faulted the
/// orientation is the previous, unchanged estimate and `orientation_fault`
/// holds the fault.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading<E> {
    /// Acceleration in m/s²
    pub acceleration: Result<AccelMps2, Error<E>>,
    /// Bias-corrected angular rate in °/s
    pub gyroscope: Result<GyroDps, Error<E>>,
    /// Fused orientation in degrees
    pub orientation: Orientation,
    /// Fault that kept the orientation from updating, if any
    pub orientation_fault: Option<Error<E>>,
    /// Die temperature in °C
    pub temperature: Result<f32, Error<E>>,
}

/// Main driver for the MPU-6050
pub struct Mpu6050Driver<I, T>
where
    I: RegisterInterface<AddressType = u8>,
{
    device: RegisterDevice<I>,
    clock: T,
    stage: InitStage,
    accel_range: Option<AccelRange>,
    gyro_range: Option<GyroRange>,
    bias: Option<Bias>,
    filter: ComplementaryFilter,
    orientation_fault: Option<Error<I::Error>>,
}

impl<I, T> Mpu6050Driver<I, T>
where
    I: RegisterInterface<AddressType = u8>,
    T: TimeSource,
{
    /// Create a new MPU-6050 driver instance
    ///
    /// No bus traffic happens here. Call [`init`](Self::init) before reading.
    pub fn new(interface: I, clock: T) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            clock,
            stage: InitStage::Uninitialized,
            accel_range: None,
            gyro_range: None,
            bias: None,
            filter: ComplementaryFilter::new(0),
            orientation_fault: None,
        }
    }

    /// Bring the device up: verify identity, wake, configure, calibrate, seed the filter
    ///
    /// The device must be stationary and level while calibration runs.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error:
    /// - bus errors from any register access
    /// - [`Error::InvalidDevice`] if `WHO_AM_I` does not match
    /// - [`Error::InsufficientSamples`] if calibration fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut imu = Mpu6050Driver::new(I2cInterface::default(i2c), clock);
    /// imu.init(&Mpu6050Config::default())?;
    /// let reading = imu.read_all()?;
    /// ```
    pub fn init(&mut self, config: &Mpu6050Config) -> Result<(), Error<I::Error>> {
        self.stage = InitStage::Uninitialized;

        self.verify_identity()?;
        self.stage = InitStage::Verified;

        self.wake()?;
        self.stage = InitStage::Awake;

        self.set_sample_rate_divider(config.sample_rate_divider)?;
        self.set_accel_range(config.accel_range)?;
        self.set_gyro_range(config.gyro_range)?;
        self.set_dlpf_bandwidth(config.dlpf)?;
        self.stage = InitStage::Configured;

        if config.calibration_samples == 0 {
            #[cfg(feature = "defmt")]
            defmt::debug!("Calibration skipped, bias zeroed");
            self.bias = Some(Bias::ZERO);
        } else {
            self.calibrate(config.calibration_samples)?;
        }
        self.stage = InitStage::Calibrated;

        self.filter.seed(self.clock.now_us());
        self.orientation_fault = None;
        self.stage = InitStage::Ready;

        #[cfg(feature = "defmt")]
        defmt::info!("MPU-6050 ready");

        Ok(())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x68 for a valid MPU-6050
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    /// Check that the device answers and reports the expected identity
    ///
    /// # Errors
    ///
    /// Returns a bus error, or [`Error::InvalidDevice`] with the value read.
    pub fn verify_identity(&mut self) -> Result<(), Error<I::Error>> {
        let who_am_i = self.read_who_am_i()?;
        if who_am_i != WHO_AM_I_VALUE {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected WHO_AM_I: {=u8:#x}", who_am_i);
            return Err(Error::InvalidDevice(who_am_i));
        }
        Ok(())
    }

    /// Put the device in sleep mode (no measurements)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sleep(&mut self) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgmt_1().write(|w| {
            w.set_sleep(true);
        })?;
        Ok(())
    }

    /// Wake the device from sleep
    ///
    /// Also selects the internal oscillator as clock source.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn wake(&mut self) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgmt_1().write(|w| {
            w.set_sleep(false);
        })?;
        Ok(())
    }

    /// Reset all device registers to their power-on values
    ///
    /// The device comes back asleep. Configuration, bias and the
    /// initialization stage are forgotten; call [`init`](Self::init) again.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.device.pwr_mgmt_1().write(|w| {
            w.set_device_reset(true);
        })?;
        self.stage = InitStage::Uninitialized;
        self.accel_range = None;
        self.gyro_range = None;
        self.bias = None;
        Ok(())
    }

    /// Set the accelerometer full-scale range
    ///
    /// The stored range only changes once the register write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_range(&mut self, range: AccelRange) -> Result<(), Error<I::Error>> {
        self.device.accel_config().modify(|w| {
            w.set_afs_sel(range as u8);
        })?;
        self.accel_range = Some(range);
        Ok(())
    }

    /// Set the gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_range(&mut self, range: GyroRange) -> Result<(), Error<I::Error>> {
        self.device.gyro_config().modify(|w| {
            w.set_fs_sel(range as u8);
        })?;
        self.gyro_range = Some(range);
        Ok(())
    }

    /// Set the digital low pass filter bandwidth
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_dlpf_bandwidth(&mut self, bandwidth: DlpfBandwidth) -> Result<(), Error<I::Error>> {
        self.device.config().modify(|w| {
            w.set_dlpf_cfg(bandwidth as u8);
        })?;
        Ok(())
    }

    /// Set the sample rate divider
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_sample_rate_divider(&mut self, divider: u8) -> Result<(), Error<I::Error>> {
        self.device.smplrt_div().write(|w| {
            w.set_smplrt_div(divider);
        })?;
        Ok(())
    }

    /// Read three consecutive big-endian 16-bit registers
    fn read_triplet(&mut self, address: u8) -> Result<[i16; 3], Error<I::Error>> {
        // Read all 6 bytes in one burst to prevent torn reads
        let mut buffer = [0u8; 6];
        self.device
            .interface
            .read_register(address, 48, &mut buffer)?;

        Ok([
            i16::from_be_bytes([buffer[0], buffer[1]]),
            i16::from_be_bytes([buffer[2], buffer[3]]),
            i16::from_be_bytes([buffer[4], buffer[5]]),
        ])
    }

    /// Read raw accelerometer data (16-bit signed values)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accelerometer_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_triplet(ACCEL_XOUT_H)
    }

    /// Read raw gyroscope data (16-bit signed values)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyroscope_raw(&mut self) -> Result<[i16; 3], Error<I::Error>> {
        self.read_triplet(GYRO_XOUT_H)
    }

    /// Read acceleration in m/s² at the configured range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_acceleration(&mut self) -> Result<AccelMps2, Error<I::Error>> {
        let [x, y, z] = self.read_accelerometer_raw()?;
        Ok(AccelMps2::from_raw(x, y, z, self.accel_range))
    }

    /// Read bias-corrected angular rate in °/s at the configured range
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until [`init`](Self::init) has completed,
    /// or an error if communication with the device fails.
    pub fn read_gyroscope(&mut self) -> Result<GyroDps, Error<I::Error>> {
        let bias = self.ready_bias()?;
        self.read_corrected_gyroscope(&bias)
    }

    fn read_corrected_gyroscope(&mut self, bias: &Bias) -> Result<GyroDps, Error<I::Error>> {
        let [x, y, z] = self.read_gyroscope_raw()?;
        Ok(bias.correct_gyro(GyroDps::from_raw(x, y, z, self.gyro_range)))
    }

    /// Bias in effect, available only once the driver is `Ready`
    fn ready_bias(&self) -> Result<Bias, Error<I::Error>> {
        match (self.stage, self.bias) {
            (InitStage::Ready, Some(bias)) => Ok(bias),
            _ => Err(Error::NotReady),
        }
    }

    /// Read die temperature in °C
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<f32, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.device
            .interface
            .read_register(TEMP_OUT_H, 16, &mut buffer)?;
        Ok(temperature::raw_to_celsius(i16::from_be_bytes(buffer)))
    }

    /// Measure the stationary bias of the tilt angles and gyroscope rates
    ///
    /// The device should rest on a level surface. The accelerometer pass runs
    /// first: its offsets are zeroed, `samples` tilt samples averaged and
    /// stored. Then the same happens for the gyroscope. Samples with a bus
    /// fault are skipped but still count toward the divisor.
    ///
    /// If the accelerometer pass fails the gyroscope pass does not run. A
    /// failed pass leaves its own offsets at zero, not at their previous
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSamples`] if `samples` is below
    /// [`MIN_CALIBRATION_SAMPLES`] (bias untouched) or if a pass had fewer
    /// valid samples than that.
    pub fn calibrate(&mut self, samples: u16) -> Result<Bias, Error<I::Error>> {
        if samples < MIN_CALIBRATION_SAMPLES {
            return Err(Error::InsufficientSamples);
        }

        let mut bias = self.bias.unwrap_or_default();

        // Accelerometer pass: tilt readings must not be corrected while averaging
        bias.reset_accel();
        self.bias = Some(bias);
        let mut accel_sum = BiasAccumulator::<2>::new(samples);
        for _ in 0..samples {
            let sample = self
                .read_acceleration()
                .ok()
                .map(|accel| [tilt_x(&accel, &bias), tilt_y(&accel, &bias)]);
            accel_sum.add(sample);
        }
        let Some([accel_x, accel_y]) = accel_sum.finish() else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Accelerometer calibration failed: {=u16} of {=u16} samples valid",
                accel_sum.accepted(),
                samples
            );
            return Err(Error::InsufficientSamples);
        };
        bias.accel_x = accel_x;
        bias.accel_y = accel_y;

        // Gyroscope pass
        bias.reset_gyro();
        self.bias = Some(bias);
        let mut gyro_sum = BiasAccumulator::<3>::new(samples);
        for _ in 0..samples {
            let sample = self
                .read_corrected_gyroscope(&bias)
                .ok()
                .map(|rate| [rate.x, rate.y, rate.z]);
            gyro_sum.add(sample);
        }
        let Some([gyro_x, gyro_y, gyro_z]) = gyro_sum.finish() else {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Gyroscope calibration failed: {=u16} of {=u16} samples valid",
                gyro_sum.accepted(),
                samples
            );
            return Err(Error::InsufficientSamples);
        };
        bias.gyro_x = gyro_x;
        bias.gyro_y = gyro_y;
        bias.gyro_z = gyro_z;
        self.bias = Some(bias);

        #[cfg(feature = "defmt")]
        defmt::debug!("Calibration done: {}", bias);

        Ok(bias)
    }

    /// Current initialization stage
    #[must_use]
    pub const fn stage(&self) -> InitStage {
        self.stage
    }

    /// Configured accelerometer range, `None` until set
    #[must_use]
    pub const fn accel_range(&self) -> Option<AccelRange> {
        self.accel_range
    }

    /// Configured gyroscope range, `None` until set
    #[must_use]
    pub const fn gyro_range(&self) -> Option<GyroRange> {
        self.gyro_range
    }

    /// Current bias, `None` until calibration ran or was skipped
    #[must_use]
    pub const fn bias(&self) -> Option<Bias> {
        self.bias
    }

    /// Last fused orientation
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.filter.orientation()
    }

    /// Fault from the most recent orientation update, if it was skipped
    #[must_use]
    pub const fn orientation_fault(&self) -> Option<&Error<I::Error>> {
        self.orientation_fault.as_ref()
    }

    /// Orientation filter state (for advanced usage)
    #[must_use]
    pub const fn filter(&self) -> &ComplementaryFilter {
        &self.filter
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }
}

impl<I, T> Mpu6050Driver<I, T>
where
    I: RegisterInterface<AddressType = u8>,
    I::Error: Clone,
    T: TimeSource,
{
    /// Read acceleration and rate, update the orientation, then read temperature
    ///
    /// Per-sensor faults are reported inside the [`Reading`] and not retried.
    /// A fault on either motion read freezes the orientation at its previous
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] until [`init`](Self::init) has completed.
    /// A failed `init` leaves the driver short of `Ready`, even though
    /// calibration may have stored partial offsets.
    pub fn read_all(&mut self) -> Result<Reading<I::Error>, Error<I::Error>> {
        self.ready_bias()?;

        let acceleration = self.read_acceleration();
        let gyroscope = self.read_gyroscope();
        self.update_orientation(&acceleration, &gyroscope);
        let temperature = self.read_temperature();

        Ok(Reading {
            acceleration,
            gyroscope,
            orientation: self.filter.orientation(),
            orientation_fault: self.orientation_fault.clone(),
            temperature,
        })
    }

    /// Fold one sample pair into the orientation filter
    ///
    /// On a fault the filter is left untouched and the fault recorded
    /// (accelerometer first). Does nothing until the driver is `Ready`, since
    /// the filter clock is only seeded by [`init`](Self::init).
    pub fn update_orientation(
        &mut self,
        acceleration: &Result<AccelMps2, Error<I::Error>>,
        gyroscope: &Result<GyroDps, Error<I::Error>>,
    ) {
        let Ok(bias) = self.ready_bias() else {
            return;
        };
        match (acceleration, gyroscope) {
            (Ok(accel), Ok(rate)) => {
                let now = self.clock.now_us();
                self.filter.update(accel, rate, &bias, now);
                self.orientation_fault = None;
            }
            (Err(fault), _) | (Ok(_), Err(fault)) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Orientation frozen: {}", fault.describe());
                self.orientation_fault = Some(fault.clone());
            }
        }
    }
}
