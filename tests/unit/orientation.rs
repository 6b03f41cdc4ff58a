//! Unit tests for the orientation filter driven through `read_all`

use crate::common::test_utils::expected_tilt;
use crate::common::{MockError, assert_float_eq, create_ready_driver};
use mpu6050::Error;

#[test]
fn test_level_at_rest() {
    let (mut driver, interface, _time) = create_ready_driver();

    interface.set_accel_data(0, 0, 16384);
    interface.set_gyro_data(0, 0, 0);

    let reading = driver.read_all().unwrap();

    let accel = reading.acceleration.unwrap();
    assert_float_eq(accel.x, 0.0, 1e-5);
    assert_float_eq(accel.y, 0.0, 1e-5);
    assert_float_eq(accel.z, 9.806_65, 1e-4);
    assert_float_eq(reading.orientation.roll, 0.0, 1e-4);
    assert_float_eq(reading.orientation.pitch, 0.0, 1e-4);
    assert_float_eq(reading.orientation.yaw, 0.0, 1e-4);
    assert!(reading.orientation_fault.is_none());
}

#[test]
fn test_one_degree_per_second() {
    let (mut driver, interface, _time) = create_ready_driver();

    interface.set_gyro_data(131, 0, 0);

    let rate = driver.read_all().unwrap().gyroscope.unwrap();
    assert_float_eq(rate.x, 1.0, 1e-6);
}

#[test]
fn test_first_update_uses_init_timestamp() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_accel_data(0, 0, 16384);
    interface.set_gyro_data(262, 0, 0); // 2 °/s
    time.advance(500_000);

    let reading = driver.read_all().unwrap();
    assert_float_eq(driver.filter().gyro_angle()[0], 1.0, 1e-5);
    assert_float_eq(reading.orientation.roll, 0.96, 1e-5);
}

#[test]
fn test_zero_elapsed_time_is_idempotent() {
    let (mut driver, interface, _time) = create_ready_driver();

    interface.set_accel_data(2000, -1500, 15000);
    interface.set_gyro_data(500, -700, 300);

    let first = driver.read_all().unwrap().orientation;
    let second = driver.read_all().unwrap().orientation;
    assert_eq!(first, second);
}

#[test]
fn test_roll_and_pitch_blend() {
    let (mut driver, interface, time) = create_ready_driver();

    // Tilted 45° about X, rotating at 10 °/s about X
    interface.set_accel_data(0, 8192, 8192);
    interface.set_gyro_data(1310, 0, 0);
    time.advance(250_000);

    let o = driver.read_all().unwrap().orientation;
    assert_float_eq(o.roll, 0.96 * 2.5 + 0.04 * 45.0, 1e-3);
    assert_float_eq(o.pitch, 0.0, 1e-4);

    // Pitch follows -X
    interface.set_accel_data(4000, 0, 12000);
    interface.set_gyro_data(0, 0, 0);
    let o = driver.read_all().unwrap().orientation;
    assert_float_eq(o.pitch, 0.04 * expected_tilt(-4000.0, 0.0, 12000.0), 1e-3);
}

#[test]
fn test_yaw_is_gyro_only() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_gyro_data(0, 0, 131);
    let accels = [[0, 0, 16384], [5000, -3000, 10000], [-16000, 12000, -2000]];

    let mut previous = driver.orientation().yaw;
    for accel in accels {
        interface.set_accel_data(accel[0], accel[1], accel[2]);
        time.advance(2_000_000);
        let yaw = driver.read_all().unwrap().orientation.yaw;
        assert_float_eq(yaw, previous + 2.0, 1e-4);
        previous = yaw;
    }
}

#[test]
fn test_integrated_angle_does_not_wrap() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_accel_data(0, 0, 16384);
    interface.set_gyro_data(0, 0, 26200); // 200 °/s
    time.advance(3_000_000);

    let yaw = driver.read_all().unwrap().orientation.yaw;
    assert_float_eq(yaw, 600.0, 1e-2);
}

#[test]
fn test_accel_fault_freezes_orientation() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_accel_data(0, 0, 16384);
    interface.set_gyro_data(0, 0, 131);
    time.advance(1_000_000);
    let before = driver.read_all().unwrap().orientation;
    assert_float_eq(before.yaw, 1.0, 1e-4);

    interface.fail_next_accel_read();
    time.advance(1_000_000);
    let reading = driver.read_all().unwrap();

    assert_eq!(reading.orientation, before);
    assert_eq!(
        reading.orientation_fault,
        Some(Error::Bus(MockError::Communication))
    );
    assert!(reading.acceleration.is_err());
    assert!(reading.gyroscope.is_ok());
    assert!(reading.temperature.is_ok());
    assert_eq!(
        driver.orientation_fault(),
        Some(&Error::Bus(MockError::Communication))
    );

    // Recovery integrates over the whole gap since the last good update
    time.advance(1_000_000);
    let reading = driver.read_all().unwrap();
    assert!(reading.orientation_fault.is_none());
    assert_float_eq(reading.orientation.yaw, 3.0, 1e-4);
}

#[test]
fn test_gyro_fault_freezes_orientation() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_accel_data(0, 8192, 8192);
    interface.set_gyro_data(0, 0, 0);
    let before = driver.read_all().unwrap().orientation;

    interface.set_accel_data(0, 0, 16384);
    interface.fail_next_gyro_read();
    time.advance(1_000_000);
    let reading = driver.read_all().unwrap();

    assert_eq!(reading.orientation, before);
    assert!(reading.acceleration.is_ok());
    assert_eq!(
        reading.gyroscope,
        Err(Error::Bus(MockError::Communication))
    );
    assert!(reading.orientation_fault.is_some());
}

#[test]
fn test_temperature_fault_does_not_freeze_orientation() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_accel_data(0, 0, 16384);
    interface.set_gyro_data(0, 0, 131);
    interface.set_read_faults(0x41, vec![true]);
    time.advance(1_000_000);

    let reading = driver.read_all().unwrap();
    assert!(reading.temperature.is_err());
    assert!(reading.orientation_fault.is_none());
    assert_float_eq(reading.orientation.yaw, 1.0, 1e-4);
}

#[test]
fn test_gyro_bias_applied_before_integration() {
    let (mut driver, interface, time) = create_ready_driver();

    interface.set_gyro_sequence(vec![[0, 0, 131]]);
    driver.calibrate(10).unwrap();

    // Same drift as during calibration: no rotation accumulates
    interface.set_accel_data(0, 0, 16384);
    time.advance(5_000_000);
    let o = driver.read_all().unwrap().orientation;
    assert_float_eq(o.yaw, 0.0, 1e-4);
}
