//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so button and LED
//! pins can come from `board.toml` instead of being hardcoded.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use embassy_rp::Peripherals;
use tributton_hal::{EhInput, EhOutput};

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins held back for the display bus (I2C0 SDA, SCL)
pub const RESERVED_PINS: [u8; 2] = [4, 5];

/// Output pin as seen by the drivers
pub type RpOutput = EhOutput<Output<'static>>;

/// Input pin as seen by the drivers
pub type RpInput = EhInput<Input<'static>>;

/// Macro to take a pin by number from peripherals
///
/// Usage:
/// ```ignore
/// let led = take_pin!(p, 16); // Takes p.PIN_16 as Peri<AnyPin>
/// ```
#[macro_export]
macro_rules! take_pin {
    ($p:expr, 0) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_0) };
    ($p:expr, 1) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_1) };
    ($p:expr, 2) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_2) };
    ($p:expr, 3) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_3) };
    ($p:expr, 4) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_4) };
    ($p:expr, 5) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_5) };
    ($p:expr, 6) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_6) };
    ($p:expr, 7) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_7) };
    ($p:expr, 8) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_8) };
    ($p:expr, 9) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_9) };
    ($p:expr, 10) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_10) };
    ($p:expr, 11) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_11) };
    ($p:expr, 12) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_12) };
    ($p:expr, 13) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_13) };
    ($p:expr, 14) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_14) };
    ($p:expr, 15) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_15) };
    ($p:expr, 16) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_16) };
    ($p:expr, 17) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_17) };
    ($p:expr, 18) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_18) };
    ($p:expr, 19) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_19) };
    ($p:expr, 20) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_20) };
    ($p:expr, 21) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_21) };
    ($p:expr, 22) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_22) };
    ($p:expr, 23) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_23) };
    ($p:expr, 24) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_24) };
    ($p:expr, 25) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_25) };
    ($p:expr, 26) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_26) };
    ($p:expr, 27) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_27) };
    ($p:expr, 28) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_28) };
    ($p:expr, 29) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_29) };
}

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for special function
    Reserved,
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Split the peripherals into the pin bank and everything else
    ///
    /// After this call, GPIOs must be obtained through `take()`, except the
    /// reserved display bus pins which come back in [`RemainingPeripherals`].
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let bank = Self {
            pins: [
                Some(take_pin!(p, 0)),
                Some(take_pin!(p, 1)),
                Some(take_pin!(p, 2)),
                Some(take_pin!(p, 3)),
                None, // GPIO4: I2C0
                None, // GPIO5: I2C0
                Some(take_pin!(p, 6)),
                Some(take_pin!(p, 7)),
                Some(take_pin!(p, 8)),
                Some(take_pin!(p, 9)),
                Some(take_pin!(p, 10)),
                Some(take_pin!(p, 11)),
                Some(take_pin!(p, 12)),
                Some(take_pin!(p, 13)),
                Some(take_pin!(p, 14)),
                Some(take_pin!(p, 15)),
                Some(take_pin!(p, 16)),
                Some(take_pin!(p, 17)),
                Some(take_pin!(p, 18)),
                Some(take_pin!(p, 19)),
                Some(take_pin!(p, 20)),
                Some(take_pin!(p, 21)),
                Some(take_pin!(p, 22)),
                Some(take_pin!(p, 23)),
                Some(take_pin!(p, 24)),
                Some(take_pin!(p, 25)),
                Some(take_pin!(p, 26)),
                Some(take_pin!(p, 27)),
                Some(take_pin!(p, 28)),
                Some(take_pin!(p, 29)),
            ],
        };
        let remaining = RemainingPeripherals {
            i2c0: p.I2C0,
            i2c0_sda: p.PIN_4,
            i2c0_scl: p.PIN_5,
        };
        (bank, remaining)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if RESERVED_PINS.contains(&pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Take a pin and configure it as an output at the given level
    pub fn output(&mut self, pin_num: u8, initially_high: bool) -> Result<RpOutput, PinError> {
        let pin = self.take(pin_num)?;
        let level = if initially_high { Level::High } else { Level::Low };
        Ok(EhOutput::new(Output::new(pin, level), initially_high))
    }

    /// Take a pin and configure it as an input
    pub fn input(&mut self, pin_num: u8, pull_up: bool) -> Result<RpInput, PinError> {
        let pin = self.take(pin_num)?;
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Ok(EhInput::new(Input::new(pin, pull)))
    }
}

/// Non-GPIO peripherals (and reserved pins) left after creating the PinBank
pub struct RemainingPeripherals {
    pub i2c0: Peri<'static, embassy_rp::peripherals::I2C0>,
    pub i2c0_sda: Peri<'static, embassy_rp::peripherals::PIN_4>,
    pub i2c0_scl: Peri<'static, embassy_rp::peripherals::PIN_5>,
}
