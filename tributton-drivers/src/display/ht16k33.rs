//! HT16K33 alphanumeric display driver
//!
//! Four 14-segment digits behind an HT16K33 LED controller (the common
//! "quad alphanumeric" I2C backpack). Text goes through a small frame
//! buffer that is written to display RAM in one transfer.

use tributton_core::traits::{TextDisplay, DISPLAY_CHARS};
use tributton_core::IoFault;
use tributton_hal::I2cBus;

use super::font::{get_glyph, DP};
use crate::fault::from_i2c;

/// HT16K33 commands
mod cmd {
    pub const DISPLAY_RAM: u8 = 0x00;
    pub const OSCILLATOR_ON: u8 = 0x21;
    pub const OSCILLATOR_OFF: u8 = 0x20;
    /// OR with 1 to turn the display on (blink bits left at 0)
    pub const DISPLAY_SETUP: u8 = 0x80;
    /// OR with the dimming level 0-15
    pub const DIMMING: u8 = 0xE0;
}

/// Maximum brightness level
pub const MAX_BRIGHTNESS: u8 = 15;

/// HT16K33 driver
pub struct Ht16k33<I> {
    i2c: I,
    address: u8,
    /// One segment pattern per digit
    buffer: [u16; DISPLAY_CHARS],
}

impl<I: I2cBus> Ht16k33<I> {
    /// Create a driver for the device at `address`
    ///
    /// Starts the oscillator; the display itself stays off until
    /// `set_enabled(true)`.
    pub fn new(i2c: I, address: u8) -> Result<Self, IoFault> {
        let mut display = Self {
            i2c,
            address,
            buffer: [0; DISPLAY_CHARS],
        };
        display.command(cmd::OSCILLATOR_ON)?;
        Ok(display)
    }

    /// Current frame buffer
    pub fn buffer(&self) -> &[u16; DISPLAY_CHARS] {
        &self.buffer
    }

    /// Turn the display and oscillator off and hand back the bus
    ///
    /// Both commands are sent even if the first fails; the first error
    /// is returned.
    pub fn release(mut self) -> Result<I, IoFault> {
        let display_off = self.command(cmd::DISPLAY_SETUP);
        let oscillator_off = self.command(cmd::OSCILLATOR_OFF);
        display_off.and(oscillator_off).map(|()| self.i2c)
    }

    fn command(&mut self, cmd: u8) -> Result<(), IoFault> {
        self.i2c.write(self.address, &[cmd]).map_err(from_i2c)
    }

    /// Write the frame buffer to display RAM
    fn flush(&mut self) -> Result<(), IoFault> {
        let mut frame = [0u8; 1 + 2 * DISPLAY_CHARS];
        frame[0] = cmd::DISPLAY_RAM;
        for (i, digit) in self.buffer.iter().enumerate() {
            let [lo, hi] = digit.to_le_bytes();
            frame[1 + 2 * i] = lo;
            frame[2 + 2 * i] = hi;
        }
        self.i2c.write(self.address, &frame).map_err(from_i2c)
    }
}

/// Lay out `text` over the digits
///
/// A '.' lights the decimal point of the digit before it when that digit
/// has none yet; otherwise it takes a digit of its own. Characters past
/// the last digit are dropped and unused digits are blank.
pub fn render(text: &str) -> [u16; DISPLAY_CHARS] {
    let mut digits = [0u16; DISPLAY_CHARS];
    let mut used = 0;
    let mut prev_can_take_dot = false;

    for ch in text.chars() {
        if ch == '.' && prev_can_take_dot {
            digits[used - 1] |= DP;
            prev_can_take_dot = false;
            continue;
        }
        if used == DISPLAY_CHARS {
            break;
        }
        digits[used] = get_glyph(ch);
        used += 1;
        prev_can_take_dot = ch != '.';
    }
    digits
}

impl<I: I2cBus> TextDisplay for Ht16k33<I> {
    fn display(&mut self, text: &str) -> Result<(), IoFault> {
        self.buffer = render(text);
        self.flush()
    }

    fn clear(&mut self) -> Result<(), IoFault> {
        self.buffer = [0; DISPLAY_CHARS];
        self.flush()
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), IoFault> {
        self.command(cmd::DISPLAY_SETUP | u8::from(enabled))
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), IoFault> {
        self.command(cmd::DIMMING | level.min(MAX_BRIGHTNESS))
    }

    fn close(self) -> Result<(), IoFault> {
        self.release().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use tributton_hal::I2cError;

    /// Records writes; fails all of them when `nack` is set, and fails
    /// (after recording) those whose first byte is `reject`
    struct MockBus {
        writes: Vec<(u8, Vec<u8, 9>), 16>,
        nack: bool,
        reject: Option<u8>,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                nack: false,
                reject: None,
            }
        }
    }

    impl I2cBus for MockBus {
        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
            if self.nack {
                return Err(I2cError::Nack);
            }
            let bytes = Vec::from_slice(data).map_err(|_| I2cError::Other)?;
            self.writes
                .push((address, bytes))
                .map_err(|_| I2cError::Other)?;
            if self.reject.is_some() && data.first().copied() == self.reject {
                return Err(I2cError::Bus);
            }
            Ok(())
        }
    }

    impl I2cBus for &mut MockBus {
        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
            (**self).write(address, data)
        }
    }

    fn last_write(display: &Ht16k33<MockBus>) -> &[u8] {
        &display.i2c.writes.last().unwrap().1
    }

    #[test]
    fn test_init_sequence() {
        let mut display = Ht16k33::new(MockBus::new(), 0x70).unwrap();
        display.set_enabled(true).unwrap();
        display.set_brightness(15).unwrap();
        display.clear().unwrap();

        let writes = &display.i2c.writes;
        assert!(writes.iter().all(|(addr, _)| *addr == 0x70));
        assert_eq!(&writes[0].1[..], &[0x21]);
        assert_eq!(&writes[1].1[..], &[0x81]);
        assert_eq!(&writes[2].1[..], &[0xEF]);
        assert_eq!(&writes[3].1[..], &[0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut display = Ht16k33::new(MockBus::new(), 0x71).unwrap();
        display.set_brightness(200).unwrap();
        assert_eq!(last_write(&display), &[0xEF]);
        display.set_brightness(3).unwrap();
        assert_eq!(last_write(&display), &[0xE3]);
    }

    #[test]
    fn test_status_message() {
        let mut display = Ht16k33::new(MockBus::new(), 0x70).unwrap();
        display.display("K->A").unwrap();
        assert_eq!(display.buffer(), &[0x2470, 0x00C0, 0x0900, 0x00F7]);
        assert_eq!(
            last_write(&display),
            &[0x00, 0x70, 0x24, 0xC0, 0x00, 0x00, 0x09, 0xF7, 0x00]
        );

        display.display("").unwrap();
        assert_eq!(display.buffer(), &[0; 4]);
    }

    #[test]
    fn test_render_decimal_points() {
        assert_eq!(render("1.5"), [0x0006 | DP, 0x2069, 0, 0]);
        assert_eq!(render("1.2.3.4."), [0x0006 | DP, 0x00DB | DP, 0x008F | DP, 0x00E6 | DP]);
        // Leading and doubled dots take their own digit
        assert_eq!(render(".1"), [DP, 0x0006, 0, 0]);
        assert_eq!(render("1.."), [0x0006 | DP, DP, 0, 0]);
    }

    #[test]
    fn test_render_truncates() {
        assert_eq!(render("ABCDE"), render("ABCD"));
        assert_eq!(render("AB"), [0x00F7, 0x128F, 0, 0]);
    }

    #[test]
    fn test_nack_maps_to_fault() {
        let mut bus = MockBus::new();
        bus.nack = true;
        assert_eq!(Ht16k33::new(bus, 0x70).err(), Some(IoFault::Nack));

        let mut display = Ht16k33::new(MockBus::new(), 0x70).unwrap();
        display.i2c.nack = true;
        assert_eq!(display.display("K->B"), Err(IoFault::Nack));
        assert_eq!(display.close(), Err(IoFault::Nack));
    }

    #[test]
    fn test_close_turns_off() {
        let display = Ht16k33::new(MockBus::new(), 0x70).unwrap();
        let bus = display.release().unwrap();
        let n = bus.writes.len();
        assert_eq!(&bus.writes[n - 2].1[..], &[0x80]);
        assert_eq!(&bus.writes[n - 1].1[..], &[0x20]);
    }

    #[test]
    fn test_close_sends_oscillator_off_after_fault() {
        let mut bus = MockBus::new();
        bus.reject = Some(0x80);
        let display = Ht16k33::new(&mut bus, 0x70).unwrap();
        assert_eq!(display.close(), Err(IoFault::Bus));

        let n = bus.writes.len();
        assert_eq!(&bus.writes[n - 2].1[..], &[0x80]);
        assert_eq!(&bus.writes[n - 1].1[..], &[0x20]);
    }
}
