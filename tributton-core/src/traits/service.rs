//! Peripheral service trait
//!
//! The one place board code hands hardware to the application: open an LED
//! line by pin, register a button driver, open the display on its bus.

use crate::config::{ButtonConfig, DisplayConfig, PinConfig};
use crate::error::IoFault;
use crate::traits::{ButtonSource, LedOutput, TextDisplay};

/// Factory for the board's hardware handles
pub trait PeripheralService {
    type Led: LedOutput;
    type Button: ButtonSource;
    type Display: TextDisplay;

    /// Open an LED output line, initially off
    fn open_led(&mut self, pin: &PinConfig) -> Result<Self::Led, IoFault>;

    /// Register a button driver on an input line
    fn register_button(&mut self, config: &ButtonConfig) -> Result<Self::Button, IoFault>;

    /// Open the display on its bus
    fn open_display(&mut self, config: &DisplayConfig) -> Result<Self::Display, IoFault>;
}
