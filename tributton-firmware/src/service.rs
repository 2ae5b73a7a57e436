//! RP2040 peripheral service
//!
//! Hands out LED lines, button drivers and the display from the pin bank
//! and the reserved I2C0 peripheral.

use defmt::*;
use embassy_rp::peripherals::{I2C0, PIN_4, PIN_5};
use embassy_rp::Peri;

use tributton_core::config::{ButtonConfig, DisplayConfig, PinConfig};
use tributton_core::traits::PeripheralService;
use tributton_core::{ButtonBank, IoFault, Mapper};
use tributton_drivers::{ButtonInputDriver, GpioLed, Ht16k33};
use tributton_hal::I2cConfig;
use tributton_hal_rp2040::{open_i2c0, I2cBusId, PinBank, PinError, RemainingPeripherals};
use tributton_hal_rp2040::{RpI2c, RpInput, RpOutput};

pub type Led = GpioLed<RpOutput>;
pub type Button = ButtonInputDriver<RpInput>;
pub type Display = Ht16k33<RpI2c>;

pub type Buttons = ButtonBank<Button>;
pub type BoardMapper = Mapper<Led, Display>;

/// I2C0 and its pins, until the display claims them
struct DisplayBus {
    i2c0: Peri<'static, I2C0>,
    sda: Peri<'static, PIN_4>,
    scl: Peri<'static, PIN_5>,
}

pub struct RpPeripherals {
    bank: PinBank,
    display_bus: Option<DisplayBus>,
}

impl RpPeripherals {
    pub fn new(bank: PinBank, remaining: RemainingPeripherals) -> Self {
        Self {
            bank,
            display_bus: Some(DisplayBus {
                i2c0: remaining.i2c0,
                sda: remaining.i2c0_sda,
                scl: remaining.i2c0_scl,
            }),
        }
    }
}

fn pin_fault(pin: u8, e: PinError) -> IoFault {
    warn!("GPIO{} unavailable: {:?}", pin, e);
    IoFault::Unavailable
}

impl PeripheralService for RpPeripherals {
    type Led = Led;
    type Button = Button;
    type Display = Display;

    fn open_led(&mut self, pin: &PinConfig) -> Result<Led, IoFault> {
        // Start at the "off" level: high for active-low LEDs
        let output = self
            .bank
            .output(pin.pin, pin.inverted)
            .map_err(|e| pin_fault(pin.pin, e))?;
        GpioLed::new(output, pin.inverted)
    }

    fn register_button(&mut self, config: &ButtonConfig) -> Result<Button, IoFault> {
        let pin = config.pin;
        let input = self
            .bank
            .input(pin.pin, pin.pull_up)
            .map_err(|e| pin_fault(pin.pin, e))?;
        ButtonInputDriver::register(input, config)
    }

    fn open_display(&mut self, config: &DisplayConfig) -> Result<Display, IoFault> {
        match I2cBusId::parse(&config.bus) {
            Some(I2cBusId::I2c0) => {}
            other => {
                warn!("Display bus {:?} not wired on this board", other);
                return Err(IoFault::Unavailable);
            }
        }

        let bus = self.display_bus.take().ok_or(IoFault::Unavailable)?;
        let i2c = open_i2c0(bus.i2c0, bus.scl, bus.sda, I2cConfig::STANDARD);
        info!("Display on I2C0 at {:#x}", config.address);
        Ht16k33::new(i2c, config.address)
    }
}
