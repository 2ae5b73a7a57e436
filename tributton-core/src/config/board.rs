//! Board configuration types
//!
//! One [`ChannelConfig`] per button: the button's input pin and key code,
//! the LED it drives and the status message it shows. Plus the display.

use heapless::{FnvIndexSet, String};

use crate::button::{ButtonId, KeyCode, BUTTON_COUNT};
use crate::traits::DISPLAY_CHARS;

/// Maximum stored message length in bytes (decimal points ride along)
pub const MAX_MESSAGE_LEN: usize = 8;

/// Maximum bus name length
pub const MAX_BUS_NAME_LEN: usize = 8;

/// Default I2C address of an HT16K33 backpack
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x70;

/// The only `version` this firmware understands
pub const BOARD_CONFIG_VERSION: u8 = 1;

/// Default button debounce window
pub const DEFAULT_DEBOUNCE_MS: u32 = 100;

/// Status message type
pub type Message = String<MAX_MESSAGE_LEN>;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create an active-low pin with pull-up, the usual push-button wiring
    pub const fn active_low_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Which input level means "pressed"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicState {
    PressedWhenLow,
    PressedWhenHigh,
}

impl LogicState {
    /// Whether a raw input level reads as pressed
    pub const fn is_pressed(self, high: bool) -> bool {
        match self {
            LogicState::PressedWhenLow => !high,
            LogicState::PressedWhenHigh => high,
        }
    }
}

/// Button driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Input pin; `inverted` selects pressed-when-low
    pub pin: PinConfig,
    /// Key code emitted on press/release
    pub key: KeyCode,
    /// Time a new level must hold before it is reported
    pub debounce_ms: u32,
}

impl ButtonConfig {
    pub const fn logic_state(&self) -> LogicState {
        if self.pin.inverted {
            LogicState::PressedWhenLow
        } else {
            LogicState::PressedWhenHigh
        }
    }
}

/// Everything attached to one button
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    pub button: ButtonConfig,
    pub led: PinConfig,
    /// Shown while the button is held
    pub message: Message,
}

impl ChannelConfig {
    /// Default wiring for a button: buttons on GPIO 13-15 (active-low with
    /// pull-up), LEDs on GPIO 16-18, messages "K->A" .. "K->C"
    pub fn default_for(button: ButtonId) -> Self {
        let i = button.index() as u8;
        let mut message = Message::new();
        let _ = message.push_str("K->");
        if let Some(letter) = button.default_key().letter() {
            let _ = message.push(letter);
        }
        Self {
            button: ButtonConfig {
                pin: PinConfig::active_low_pullup(13 + i),
                key: button.default_key(),
                debounce_ms: DEFAULT_DEBOUNCE_MS,
            },
            led: PinConfig::new(16 + i),
            message,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Set false to run without a display
    pub enabled: bool,
    /// Bus name, e.g. "I2C0"
    pub bus: String<MAX_BUS_NAME_LEN>,
    /// 7-bit I2C address
    pub address: u8,
    /// Brightness 0-15
    pub brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut bus = String::new();
        let _ = bus.push_str("I2C0");
        Self {
            enabled: true,
            bus,
            address: DEFAULT_DISPLAY_ADDRESS,
            brightness: 15,
        }
    }
}

/// Configuration errors found by [`BoardConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `version` is not [`BOARD_CONFIG_VERSION`]
    UnsupportedVersion(u8),
    /// Same GPIO used twice
    DuplicatePin(u8),
    /// GPIO number beyond the chip's range
    PinOutOfRange(u8),
    /// GPIO held back for another peripheral (the display bus)
    ReservedPin(u8),
    /// Two buttons emit the same key code
    DuplicateKey,
    /// Message does not fit on the display
    MessageTooLong,
    /// Brightness above 15
    InvalidBrightness,
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Per-button channels, indexed by `ButtonId::index()`
    pub channels: [ChannelConfig; BUTTON_COUNT],
    pub display: DisplayConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: BOARD_CONFIG_VERSION,
            channels: ButtonId::ALL.map(ChannelConfig::default_for),
            display: DisplayConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self, button: ButtonId) -> &ChannelConfig {
        &self.channels[button.index()]
    }

    pub fn channel_mut(&mut self, button: ButtonId) -> &mut ChannelConfig {
        &mut self.channels[button.index()]
    }

    /// Check version, pins, keys and messages
    ///
    /// `gpio_count` is the number of GPIOs on the target chip; `reserved`
    /// lists pins no channel may claim.
    pub fn validate(&self, gpio_count: u8, reserved: &[u8]) -> Result<(), ConfigError> {
        if self.version != BOARD_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        let mut used: FnvIndexSet<u8, 8> = FnvIndexSet::new();
        for channel in &self.channels {
            for pin in [channel.button.pin.pin, channel.led.pin] {
                if pin >= gpio_count {
                    return Err(ConfigError::PinOutOfRange(pin));
                }
                if reserved.contains(&pin) {
                    return Err(ConfigError::ReservedPin(pin));
                }
                if !used.insert(pin).map_err(|_| ConfigError::DuplicatePin(pin))? {
                    return Err(ConfigError::DuplicatePin(pin));
                }
            }
            if display_width(&channel.message) > DISPLAY_CHARS {
                return Err(ConfigError::MessageTooLong);
            }
        }

        for (i, a) in self.channels.iter().enumerate() {
            if self.channels[i + 1..]
                .iter()
                .any(|b| b.button.key == a.button.key)
            {
                return Err(ConfigError::DuplicateKey);
            }
        }

        if self.display.brightness > 15 {
            return Err(ConfigError::InvalidBrightness);
        }

        Ok(())
    }
}

/// Number of display digits `text` occupies
///
/// A '.' following a character without its own decimal point shares
/// that character's digit. A leading '.' takes a digit of its own.
pub fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut prev_can_take_dot = false;
    for ch in text.chars() {
        if ch == '.' && prev_can_take_dot {
            prev_can_take_dot = false;
            continue;
        }
        width += 1;
        prev_can_take_dot = ch != '.';
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_config() {
        let pin = PinConfig::new(10);
        assert_eq!(pin.pin, 10);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let inverted = PinConfig::inverted(12);
        assert!(inverted.inverted);

        let button = PinConfig::active_low_pullup(4);
        assert!(button.pull_up && button.inverted);
    }

    #[test]
    fn test_default_config() {
        let config = BoardConfig::new();
        assert_eq!(config.channel(ButtonId::A).message.as_str(), "K->A");
        assert_eq!(config.channel(ButtonId::C).message.as_str(), "K->C");
        assert_eq!(config.channel(ButtonId::B).led.pin, 17);
        assert_eq!(config.channel(ButtonId::B).button.pin.pin, 14);
        assert_eq!(
            config.channel(ButtonId::A).button.logic_state(),
            LogicState::PressedWhenLow
        );
        assert_eq!(config.display.address, 0x70);
        assert_eq!(config.validate(30, &[]), Ok(()));
    }

    #[test]
    fn test_validate_version() {
        let mut config = BoardConfig::new();
        config.version = 2;
        assert_eq!(config.validate(30, &[]), Err(ConfigError::UnsupportedVersion(2)));
        config.version = 0;
        assert_eq!(config.validate(30, &[]), Err(ConfigError::UnsupportedVersion(0)));
    }

    #[test]
    fn test_validate_reserved_pin() {
        let mut config = BoardConfig::new();
        assert_eq!(config.validate(30, &[4, 5]), Ok(()));

        config.channel_mut(ButtonId::A).led = PinConfig::new(4);
        assert_eq!(config.validate(30, &[4, 5]), Err(ConfigError::ReservedPin(4)));
        assert_eq!(config.validate(30, &[]), Ok(()));

        config.channel_mut(ButtonId::A).led = PinConfig::new(16);
        config.channel_mut(ButtonId::C).button.pin = PinConfig::active_low_pullup(5);
        assert_eq!(config.validate(30, &[4, 5]), Err(ConfigError::ReservedPin(5)));
    }

    #[test]
    fn test_validate_duplicate_pin() {
        let mut config = BoardConfig::new();
        config.channel_mut(ButtonId::C).led = PinConfig::new(16);
        assert_eq!(config.validate(30, &[]), Err(ConfigError::DuplicatePin(16)));
    }

    #[test]
    fn test_validate_pin_range() {
        let mut config = BoardConfig::new();
        config.channel_mut(ButtonId::A).led = PinConfig::new(30);
        assert_eq!(config.validate(30, &[]), Err(ConfigError::PinOutOfRange(30)));
    }

    #[test]
    fn test_validate_duplicate_key() {
        let mut config = BoardConfig::new();
        config.channel_mut(ButtonId::B).button.key = KeyCode::A;
        assert_eq!(config.validate(30, &[]), Err(ConfigError::DuplicateKey));
    }

    #[test]
    fn test_validate_message_width() {
        let mut config = BoardConfig::new();
        config.channel_mut(ButtonId::A).message = Message::try_from("1.2.3.4.").unwrap();
        assert_eq!(config.validate(30, &[]), Ok(()));

        config.channel_mut(ButtonId::A).message = Message::try_from("ABCDE").unwrap();
        assert_eq!(config.validate(30, &[]), Err(ConfigError::MessageTooLong));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("K->A"), 4);
        assert_eq!(display_width("1.5"), 2);
        assert_eq!(display_width("1.."), 2);
        assert_eq!(display_width(".."), 2);
    }
}
