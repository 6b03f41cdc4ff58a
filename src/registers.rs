//! Register definitions for the MPU-6050
//!
//! Only the registers the driver touches are described here. Sensor output
//! blocks (`ACCEL_XOUT_H`, `TEMP_OUT_H`, `GYRO_XOUT_H`) are read as raw
//! big-endian bursts by the driver, see [`ACCEL_XOUT_H`] and friends.

/// First accelerometer output register (6 bytes, X/Y/Z big-endian)
pub const ACCEL_XOUT_H: u8 = 0x3B;
/// Temperature output register (2 bytes, big-endian)
pub const TEMP_OUT_H: u8 = 0x41;
/// First gyroscope output register (6 bytes, X/Y/Z big-endian)
pub const GYRO_XOUT_H: u8 = 0x43;

device_driver::create_device!(
    device_name: Mpu6050,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// SMPLRT_DIV - Sample Rate Divider (0x19)
        /// Sample rate = gyro output rate / (1 + divider)
        register SmplrtDiv {
            const ADDRESS = 0x19;
            const SIZE_BITS = 8;

            smplrt_div: uint = 0..8,
        },

        /// CONFIG - Frame sync and digital low pass filter (0x1A)
        register Config {
            const ADDRESS = 0x1A;
            const SIZE_BITS = 8;

            /// Digital low pass filter setting
            dlpf_cfg: uint = 0..3,
            /// External frame sync input
            ext_sync_set: uint = 3..6,
            reserved_7_6: uint = 6..8,
        },

        /// GYRO_CONFIG - Gyroscope self-test and full-scale range (0x1B)
        register GyroConfig {
            const ADDRESS = 0x1B;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale range select (0=±250, 1=±500, 2=±1000, 3=±2000 °/s)
            fs_sel: uint = 3..5,
            /// Self-test Z
            zg_st: bool = 5,
            /// Self-test Y
            yg_st: bool = 6,
            /// Self-test X
            xg_st: bool = 7,
        },

        /// ACCEL_CONFIG - Accelerometer self-test and full-scale range (0x1C)
        register AccelConfig {
            const ADDRESS = 0x1C;
            const SIZE_BITS = 8;

            reserved_2_0: uint = 0..3,
            /// Full-scale range select (0=±2g, 1=±4g, 2=±8g, 3=±16g)
            afs_sel: uint = 3..5,
            /// Self-test Z
            za_st: bool = 5,
            /// Self-test Y
            ya_st: bool = 6,
            /// Self-test X
            xa_st: bool = 7,
        },

        /// PWR_MGMT_1 - Power Management 1 (0x6B)
        register PwrMgmt1 {
            const ADDRESS = 0x6B;
            const SIZE_BITS = 8;

            /// Clock source select (0=internal 8MHz, 1-3=PLL with gyro reference)
            clksel: uint = 0..3,
            /// Temperature sensor disable
            temp_dis: bool = 3,
            reserved_4: uint = 4..5,
            /// Cycle between sleep and single samples
            cycle: bool = 5,
            /// Sleep mode enable
            sleep: bool = 6,
            /// Device reset
            device_reset: bool = 7,
        },

        /// WHO_AM_I - Device identity (0x75)
        /// Expected value: 0x68
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID (should read 0x68)
            who_am_i: uint = 0..8,
        },
    }
);
