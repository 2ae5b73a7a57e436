//! GPIO LED output
//!
//! An LED on a GPIO line, driven directly or through a transistor.

use tributton_core::traits::LedOutput;
use tributton_core::IoFault;
use tributton_hal::OutputPin;

use crate::fault::from_gpio;

/// LED on a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioLed<P> {
    pin: P,
    /// If true, LED on = pin LOW
    inverted: bool,
    /// Current logical state (true = lit)
    on: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// Create a new LED output, driven off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, IoFault> {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.drive(false)?;
        Ok(led)
    }

    /// Create an LED with active-high output
    pub fn new_active_high(pin: P) -> Result<Self, IoFault> {
        Self::new(pin, false)
    }

    /// Create an LED with active-low output
    pub fn new_active_low(pin: P) -> Result<Self, IoFault> {
        Self::new(pin, true)
    }

    /// Turn off and hand back the pin
    pub fn release(mut self) -> Result<P, IoFault> {
        self.drive(false)?;
        Ok(self.pin)
    }

    fn drive(&mut self, on: bool) -> Result<(), IoFault> {
        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        self.pin.set_state(on != self.inverted).map_err(from_gpio)
    }
}

impl<P: OutputPin> LedOutput for GpioLed<P> {
    fn set(&mut self, on: bool) -> Result<(), IoFault> {
        self.drive(on)?;
        self.on = on;
        Ok(())
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn close(self) -> Result<(), IoFault> {
        self.release().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tributton_hal::GpioError;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        broken: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                broken: false,
            }
        }
    }

    impl OutputPin for MockPin {
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

    #[test]
    fn test_active_high_led() {
        let mut led = GpioLed::new_active_high(MockPin::new()).unwrap();

        assert!(!led.is_on());
        assert!(!led.pin.is_set_high());

        led.set(true).unwrap();
        assert!(led.is_on());
        assert!(led.pin.is_set_high());

        led.set(false).unwrap();
        assert!(!led.is_on());
        assert!(!led.pin.is_set_high());
    }

    #[test]
    fn test_active_low_led() {
        let mut led = GpioLed::new_active_low(MockPin::new()).unwrap();

        // Off means pin high for active-low
        assert!(!led.is_on());
        assert!(led.pin.is_set_high());

        led.set(true).unwrap();
        assert!(led.is_on());
        assert!(!led.pin.is_set_high());
    }

    #[test]
    fn test_fault_keeps_state() {
        let mut led = GpioLed::new_active_high(MockPin::new()).unwrap();
        led.pin.broken = true;

        assert_eq!(led.set(true), Err(IoFault::Gpio));
        assert!(!led.is_on());
        assert_eq!(led.close(), Err(IoFault::Gpio));
    }

    #[test]
    fn test_release_turns_off() {
        let mut led = GpioLed::new_active_high(MockPin::new()).unwrap();
        led.set(true).unwrap();
        let pin = led.release().unwrap();
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test_broken_pin_fails_open() {
        let mut pin = MockPin::new();
        pin.broken = true;
        assert!(GpioLed::new_active_high(pin).is_err());
    }
}
