//! Bus interface implementation for the MPU-6050
//!
//! The driver talks to the device through the `device-driver`
//! [`RegisterInterface`] trait. [`I2cInterface`] provides it on top of any
//! `embedded-hal` I2C bus; tests substitute their own implementation.

use crate::{I2C_ADDRESS_AD0_HIGH, I2C_ADDRESS_AD0_LOW};

use device_driver::RegisterInterface;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Largest register block [`I2cInterface`] writes in one transaction
///
/// Every writable MPU-6050 configuration register is a single byte.
pub const MAX_WRITE_LEN: usize = 8;

/// I2C interface for the MPU-6050
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the default address (0x68, AD0 pin LOW)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut imu = Mpu6050Driver::new(interface, clock);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_LOW,
        }
    }

    /// Create a new I2C interface with the alternative address (0x69, AD0 pin HIGH)
    pub const fn alternative(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS_AD0_HIGH,
        }
    }

    /// Create a new I2C interface with a custom device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address used for every transaction
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        // Register pointer write followed by a repeated-start read; the device
        // auto-increments through multi-byte blocks.
        self.i2c.write_read(self.address, &[address], read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        debug_assert!(
            write_data.len() <= MAX_WRITE_LEN,
            "register write longer than MAX_WRITE_LEN"
        );
        let mut buffer = [0u8; MAX_WRITE_LEN + 1];
        buffer[0] = address;
        let len = write_data.len().min(MAX_WRITE_LEN);
        buffer[1..=len].copy_from_slice(&write_data[..len]);

        self.i2c.write(self.address, &buffer[..=len])
    }
}

/// Describe an `embedded-hal` I2C fault for diagnostics
///
/// Pairs with [`Error::describe`](crate::Error::describe) for
/// `Error::Bus(e)` values produced through [`I2cInterface`].
#[must_use]
pub fn describe_bus_fault<E: embedded_hal::i2c::Error>(error: &E) -> &'static str {
    match error.kind() {
        ErrorKind::Bus => "bus error",
        ErrorKind::ArbitrationLoss => "arbitration lost",
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => "NACK on address",
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => "NACK on data",
        ErrorKind::NoAcknowledge(_) => "NACK",
        ErrorKind::Overrun => "overrun",
        _ => "other",
    }
}
