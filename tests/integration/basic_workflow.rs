//! Integration tests for basic workflow scenarios

use crate::common::test_utils::MockTime;
use crate::common::{assert_float_eq, create_mock_driver};
use crate::common::mock_interface::MockInterface;
use mpu6050::{AccelRange, DlpfBandwidth, GyroRange, InitStage, Mpu6050Config, Mpu6050Driver};

#[test]
fn test_complete_workflow() {
    let (mut driver, interface, time) = create_mock_driver();

    // Stationary with a slight mounting tilt and gyro drift
    interface.set_accel_sequence(vec![[100, -200, 16384], [120, -180, 16384]]);
    interface.set_gyro_sequence(vec![[13, -26, 39]]);
    interface.set_temperature_data(-3400);

    let config = Mpu6050Config {
        calibration_samples: 100,
        accel_range: AccelRange::G2,
        gyro_range: GyroRange::Dps250,
        dlpf: DlpfBandwidth::Hz44,
        sample_rate_divider: 9,
    };
    driver.init(&config).unwrap();
    assert_eq!(driver.stage(), InitStage::Ready);

    // Same stationary input after calibration reads as level and still
    for _ in 0..10 {
        time.advance(10_000);
        let reading = driver.read_all().unwrap();

        let rate = reading.gyroscope.unwrap();
        assert_float_eq(rate.x, 0.0, 1e-4);
        assert_float_eq(rate.y, 0.0, 1e-4);
        assert_float_eq(rate.z, 0.0, 1e-4);
        assert_float_eq(reading.temperature.unwrap(), 26.53, 1e-3);
        assert!(reading.orientation.roll.abs() < 0.05);
        assert!(reading.orientation.pitch.abs() < 0.05);
        assert_float_eq(reading.orientation.yaw, 0.0, 1e-4);
    }

    // Rotate about Z at 10 °/s (on top of the calibrated drift) for one second
    interface.set_gyro_sequence(vec![[13, -26, 39 + 1310]]);
    let last = (0..100)
        .map(|_| {
            time.advance(10_000);
            driver.read_all().unwrap().orientation
        })
        .last()
        .unwrap();
    assert_float_eq(last.yaw, 10.0, 1e-2);
}

#[test]
fn test_independent_instances() {
    let (mut first, first_bus, _) = create_mock_driver();
    let second_bus = MockInterface::new();
    let mut second = Mpu6050Driver::new(second_bus.clone(), MockTime::with_initial(0));

    let config = Mpu6050Config {
        calibration_samples: 0,
        ..Mpu6050Config::default()
    };
    first.init(&config).unwrap();
    second
        .init(&Mpu6050Config {
            accel_range: AccelRange::G16,
            ..config
        })
        .unwrap();

    first_bus.set_accel_data(2048, 0, 0);
    second_bus.set_accel_data(2048, 0, 0);
    let a = first.read_acceleration().unwrap();
    let b = second.read_acceleration().unwrap();
    assert_float_eq(b.x, 8.0 * a.x, 1e-4);
}

#[test]
fn test_release_returns_interface() {
    let (mut driver, interface, _time) = create_mock_driver();
    driver.init(&Mpu6050Config {
        calibration_samples: 0,
        ..Mpu6050Config::default()
    })
    .unwrap();

    let released = driver.release();
    released.set_who_am_i(0x00);
    assert_eq!(interface.get_register(0x75), 0x00);
}
