//! HAL error conversion
//!
//! `IoFault` and the HAL error types live in different crates, so the
//! conversions are plain functions rather than `From` impls.

use tributton_core::IoFault;
use tributton_hal::{GpioError, I2cError};

pub fn from_gpio(err: GpioError) -> IoFault {
    match err {
        GpioError::Bus => IoFault::Gpio,
        GpioError::Unavailable => IoFault::Unavailable,
    }
}

pub fn from_i2c(err: I2cError) -> IoFault {
    match err {
        I2cError::Nack => IoFault::Nack,
        I2cError::ArbitrationLost | I2cError::Bus | I2cError::Overrun | I2cError::Other => {
            IoFault::Bus
        }
    }
}
