//! Simple TOML parser for board configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `board.toml`. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer incl. `0x` hex, boolean)
//! - `[channel.a]` / `[channel a]` and `[display]` section headers
//! - Comments (# ...)
//!
//! Keys that are not set keep their [`BoardConfig::default`] value, so a
//! board file only needs to list what differs from the default wiring.

use heapless::String;

use super::board::{BoardConfig, Message, PinConfig, MAX_BUS_NAME_LEN};
use crate::button::{ButtonId, KeyCode};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Channel section names a button that does not exist
    UnknownChannel,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// String value exceeds its capacity
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Channel(ButtonId),
    Display,
}

/// Parse TOML configuration into BoardConfig
pub fn parse_board_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_prefix('[')
                .and_then(|l| l.split('#').next())
                .map(str::trim)
                .and_then(|l| l.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Parse section header like "channel.a", "channel a" or "display"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    let (kind, name) = match header.split_once('.') {
        Some((kind, name)) => (kind.trim(), Some(name.trim())),
        None => {
            let mut parts = header.split_whitespace();
            (parts.next().unwrap_or(""), parts.next())
        }
    };

    match (kind, name) {
        ("channel", Some(name)) => ButtonId::from_name(name)
            .map(Section::Channel)
            .ok_or(ParseError::UnknownChannel),
        ("display", None) => Ok(Section::Display),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => match key {
            "version" => config.version = parse_int(value)?,
            _ => log_warn!("board.toml: ignoring unknown key '{}'", key),
        },
        Section::Channel(button) => {
            let channel = config.channel_mut(button);
            match key {
                "button" => channel.button.pin = parse_pin(value)?,
                "led" => channel.led = parse_pin(value)?,
                "key" => channel.button.key = parse_key(value)?,
                "message" => {
                    channel.message =
                        Message::try_from(parse_string(value)?).map_err(|_| ParseError::TooLong)?
                }
                "debounce_ms" => channel.button.debounce_ms = parse_int(value)?,
                _ => log_warn!("board.toml: ignoring unknown channel key '{}'", key),
            }
        }
        Section::Display => match key {
            "enabled" => config.display.enabled = parse_bool(value)?,
            "bus" => {
                config.display.bus = String::<MAX_BUS_NAME_LEN>::try_from(parse_string(value)?)
                    .map_err(|_| ParseError::TooLong)?
            }
            "address" => config.display.address = parse_int(value)?,
            "brightness" => config.display.brightness = parse_int(value)?,
            _ => log_warn!("board.toml: ignoring unknown display key '{}'", key),
        },
    }
    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Remove inline comments: the first '#' outside a string
    let mut in_string = false;
    let comment = value.char_indices().find(|&(_, c)| {
        if c == '"' {
            in_string = !in_string;
        }
        c == '#' && !in_string
    });
    let value = match comment {
        Some((hash_pos, _)) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    match value.strip_prefix('"') {
        Some(rest) => rest.strip_suffix('"').ok_or(ParseError::InvalidValue),
        // Allow unquoted strings for simple values
        None => Ok(value),
    }
}

/// Parse an integer value, decimal or `0x` hex, with optional `_` separators
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };
    if digits.is_empty() {
        return Err(ParseError::InvalidValue);
    }

    let mut acc: u32 = 0;
    for ch in digits.chars().filter(|c| *c != '_') {
        let digit = ch.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        acc = acc
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
    }
    T::try_from(acc).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a key value: a single letter ("A") or a raw code (29)
fn parse_key(value: &str) -> Result<KeyCode, ParseError> {
    if value.starts_with('"') {
        let s = parse_string(value)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => KeyCode::from_letter(letter).ok_or(ParseError::InvalidValue),
            _ => Err(ParseError::InvalidValue),
        }
    } else {
        parse_int(value).map(KeyCode)
    }
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4", "^!gpio13"
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let value = parse_string(value)?;
    let mut inverted = false;
    let mut pull_up = false;
    let mut s = value;

    // Check for modifiers
    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    // Parse "gpioNN"
    let num = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}
