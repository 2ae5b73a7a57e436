//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs.

/// Errors from a GPIO line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// The line could not be driven or read (bus/expander fault)
    Bus,
    /// The line has been released or was never configured
    Unavailable,
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), GpioError>;

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), GpioError>;

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) -> Result<(), GpioError> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> Result<bool, GpioError>;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> Result<bool, GpioError> {
        self.is_high().map(|high| !high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch {
        high: bool,
        broken: bool,
    }

    impl OutputPin for Latch {
        fn set_high(&mut self) -> Result<(), GpioError> {
            if self.broken {
                return Err(GpioError::Bus);
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), GpioError> {
            if self.broken {
                return Err(GpioError::Bus);
            }
            self.high = false;
            Ok(())
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl InputPin for Latch {
        fn is_high(&mut self) -> Result<bool, GpioError> {
            Ok(self.high)
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = Latch {
            high: false,
            broken: false,
        };
        pin.set_state(true).unwrap();
        assert!(pin.is_set_high());
        pin.set_state(false).unwrap();
        assert!(pin.is_set_low());
        assert_eq!(pin.is_low(), Ok(true));
    }

    #[test]
    fn test_set_state_propagates_fault() {
        let mut pin = Latch {
            high: false,
            broken: true,
        };
        assert_eq!(pin.set_state(true), Err(GpioError::Bus));
        assert!(pin.is_set_low());
    }
}
