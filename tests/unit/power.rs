//! Unit tests for sleep, wake and reset

use crate::common::{assert_float_eq, create_ready_driver, default_config};
use mpu6050::{Error, InitStage};

const PWR_MGMT_1: u8 = 0x6B;

#[test]
fn test_sleep_and_wake() {
    let (mut driver, interface, _time) = create_ready_driver();

    driver.sleep().unwrap();
    assert_eq!(interface.get_register(PWR_MGMT_1), 0x40);

    driver.wake().unwrap();
    assert_eq!(interface.get_register(PWR_MGMT_1), 0x00);

    assert_eq!(interface.writes(), vec![(PWR_MGMT_1, 0x40), (PWR_MGMT_1, 0x00)]);
}

#[test]
fn test_sleep_keeps_driver_state() {
    let (mut driver, _interface, _time) = create_ready_driver();

    driver.sleep().unwrap();
    assert_eq!(driver.stage(), InitStage::Ready);
    assert!(driver.bias().is_some());
}

#[test]
fn test_reset_forgets_configuration() {
    let (mut driver, interface, _time) = create_ready_driver();

    driver.reset().unwrap();
    assert_eq!(interface.writes(), vec![(PWR_MGMT_1, 0x80)]);
    assert_eq!(driver.stage(), InitStage::Uninitialized);
    assert_eq!(driver.accel_range(), None);
    assert_eq!(driver.gyro_range(), None);
    assert_eq!(driver.read_all(), Err(Error::NotReady));

    interface.set_accel_data(16384, 16384, 16384);
    let accel = driver.read_acceleration().unwrap();
    assert_float_eq(accel.x, 0.0, f32::EPSILON);
}

#[test]
fn test_reinit_after_reset() {
    let (mut driver, interface, _time) = create_ready_driver();

    driver.reset().unwrap();
    driver.init(&default_config()).unwrap();

    assert_eq!(driver.stage(), InitStage::Ready);
    interface.set_accel_data(0, 0, 16384);
    interface.set_gyro_data(0, 0, 0);
    assert!(driver.read_all().unwrap().acceleration.is_ok());
}

#[test]
fn test_reset_failure_keeps_state() {
    let (mut driver, interface, _time) = create_ready_driver();

    interface.fail_next_write();
    assert!(driver.reset().is_err());
    assert_eq!(driver.stage(), InitStage::Ready);
}
