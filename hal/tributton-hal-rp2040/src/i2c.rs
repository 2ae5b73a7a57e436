//! I2C bus selection
//!
//! The display bus is named in `board.toml` ("I2C0"). Only I2C0 on its
//! reserved pins (GPIO4 SDA, GPIO5 SCL) is wired up; I2C1 parses but has
//! no pins held back for it.

use embassy_rp::i2c::{Blocking, Config, I2c};
use embassy_rp::peripherals::{I2C0, PIN_4, PIN_5};
use embassy_rp::Peri;
use tributton_hal::{EhI2c, I2cConfig};

/// Blocking I2C0 as seen by the drivers
pub type RpI2c = EhI2c<I2c<'static, I2C0, Blocking>>;

/// RP2040 I2C controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusId {
    I2c0,
    I2c1,
}

impl I2cBusId {
    /// Parse a bus name ("I2C0", "i2c1")
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("i2c0") {
            Some(I2cBusId::I2c0)
        } else if name.eq_ignore_ascii_case("i2c1") {
            Some(I2cBusId::I2c1)
        } else {
            None
        }
    }
}

/// Bring up I2C0 in blocking mode
pub fn open_i2c0(
    i2c0: Peri<'static, I2C0>,
    scl: Peri<'static, PIN_5>,
    sda: Peri<'static, PIN_4>,
    bus: I2cConfig,
) -> RpI2c {
    let mut config = Config::default();
    config.frequency = bus.frequency;
    EhI2c::new(I2c::new_blocking(i2c0, scl, sda, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bus() {
        assert_eq!(I2cBusId::parse("I2C0"), Some(I2cBusId::I2c0));
        assert_eq!(I2cBusId::parse("i2c1"), Some(I2cBusId::I2c1));
        assert_eq!(I2cBusId::parse("SPI0"), None);
    }
}
