//! Adapters from `embedded-hal` 1.0 to the Tributton traits
//!
//! Most chip HALs (embassy-rp included) already implement `embedded-hal`,
//! so wrapping a pin or a blocking I2C peripheral in one of these adapters
//! is all that is needed to hand it to a Tributton driver.

use embedded_hal::digital;
use embedded_hal::i2c;

use crate::gpio::{GpioError, InputPin, OutputPin};
use crate::i2c::{I2cBus, I2cError};

/// Output pin backed by an `embedded_hal::digital::OutputPin`
///
/// The last driven level is cached so `is_set_high` does not need
/// `StatefulOutputPin` support from the underlying HAL.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P> {
    /// Wrap a pin whose current output level is `initially_high`
    pub fn new(pin: P, initially_high: bool) -> Self {
        Self {
            pin,
            high: initially_high,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) -> Result<(), GpioError> {
        self.pin.set_high().map_err(|_| GpioError::Bus)?;
        self.high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), GpioError> {
        self.pin.set_low().map_err(|_| GpioError::Bus)?;
        self.high = false;
        Ok(())
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Input pin backed by an `embedded_hal::digital::InputPin`
pub struct EhInput<P> {
    pin: P,
}

impl<P> EhInput<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        self.pin.is_high().map_err(|_| GpioError::Bus)
    }
}

/// I2C bus backed by a blocking `embedded_hal::i2c::I2c`
pub struct EhI2c<I> {
    i2c: I,
}

impl<I> EhI2c<I> {
    /// Wrap a blocking I2C peripheral
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> I {
        self.i2c
    }
}

fn map_i2c_error<E: i2c::Error>(e: E) -> I2cError {
    match e.kind() {
        i2c::ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        i2c::ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        i2c::ErrorKind::Bus => I2cError::Bus,
        i2c::ErrorKind::Overrun => I2cError::Overrun,
        _ => I2cError::Other,
    }
}

impl<I: i2c::I2c> I2cBus for EhI2c<I> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        self.i2c.write(address, data).map_err(map_i2c_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// embedded-hal pin that counts writes and can be told to fail
    struct FakePin {
        level: bool,
        fail: bool,
        writes: u8,
    }

    #[derive(Debug)]
    struct FakeError;

    impl digital::Error for FakeError {
        fn kind(&self) -> digital::ErrorKind {
            digital::ErrorKind::Other
        }
    }

    impl digital::ErrorType for FakePin {
        type Error = FakeError;
    }

    impl digital::OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), FakeError> {
            if self.fail {
                return Err(FakeError);
            }
            self.writes += 1;
            self.level = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), FakeError> {
            if self.fail {
                return Err(FakeError);
            }
            self.writes += 1;
            self.level = true;
            Ok(())
        }
    }

    impl digital::InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, FakeError> {
            if self.fail {
                return Err(FakeError);
            }
            Ok(self.level)
        }

        fn is_low(&mut self) -> Result<bool, FakeError> {
            self.is_high().map(|h| !h)
        }
    }

    #[derive(Debug)]
    struct NackError;

    impl i2c::Error for NackError {
        fn kind(&self) -> i2c::ErrorKind {
            i2c::ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address)
        }
    }

    struct AbsentDevice;

    impl i2c::ErrorType for AbsentDevice {
        type Error = NackError;
    }

    impl i2c::I2c for AbsentDevice {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [i2c::Operation<'_>],
        ) -> Result<(), NackError> {
            Err(NackError)
        }
    }

    #[test]
    fn test_output_tracks_level() {
        let mut out = EhOutput::new(
            FakePin {
                level: false,
                fail: false,
                writes: 0,
            },
            false,
        );
        assert!(out.is_set_low());
        out.set_high().unwrap();
        assert!(out.is_set_high());
        assert_eq!(out.into_inner().writes, 1);
    }

    #[test]
    fn test_output_fault_keeps_cached_level() {
        let mut out = EhOutput::new(
            FakePin {
                level: false,
                fail: true,
                writes: 0,
            },
            false,
        );
        assert_eq!(out.set_high(), Err(GpioError::Bus));
        assert!(out.is_set_low());
    }

    #[test]
    fn test_input_reads_level() {
        let mut input = EhInput::new(FakePin {
            level: true,
            fail: false,
            writes: 0,
        });
        assert_eq!(input.is_high(), Ok(true));
        assert_eq!(input.is_low(), Ok(false));
    }

    #[test]
    fn test_i2c_nack_maps() {
        let mut bus = EhI2c::new(AbsentDevice);
        assert_eq!(bus.write(0x70, &[0x21]), Err(I2cError::Nack));
    }
}
