//! Build script for tributton-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const CHANNELS: [&str; 3] = ["a", "b", "c"];
const GPIO_COUNT: u64 = 30;
const RESERVED_PINS: [u64; 2] = [4, 5];
const DISPLAY_CHARS: usize = 4;
const CONFIG_VERSION: i64 = 1;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml at build time.                   ║\n\
            ║  Please create one in the tributton-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_version(&config, &mut errors);
    validate_channels(&config, &mut errors);
    validate_display(&config, &mut errors);
    report("Invalid board configuration", &errors);

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with every collected error in one box
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Parse "^!gpioN" into a pin number
fn pin_number(value: &str) -> Option<u64> {
    value
        .trim_start_matches(['^', '!'])
        .strip_prefix("gpio")?
        .parse()
        .ok()
}

/// Digits a message occupies, with '.' sharing the previous digit
fn display_width(text: &str) -> usize {
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

/// Check the top-level `version` key, if present
fn validate_version(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(version) = config.get("version") {
        if version.as_integer() != Some(CONFIG_VERSION) {
            errors.push(format!("version must be {}", CONFIG_VERSION));
        }
    }
}

/// Validate the three [channel.*] sections
fn validate_channels(config: &toml::Value, errors: &mut Vec<String>) {
    let channels = match config.get("channel") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[channel] must be a table of [channel.a|b|c]".to_string());
            return;
        }
        None => return,
    };

    for name in channels.keys() {
        if !CHANNELS.contains(&name.as_str()) {
            errors.push(format!("[channel.{}] unknown channel (use a, b or c)", name));
        }
    }

    let mut pins = HashSet::new();
    let mut keys = HashSet::new();

    for name in CHANNELS {
        let Some(channel) = channels.get(name).and_then(|c| c.as_table()) else {
            continue;
        };

        for field in ["button", "led"] {
            match channel.get(field) {
                Some(toml::Value::String(s)) => match pin_number(s) {
                    Some(pin) if pin >= GPIO_COUNT => {
                        errors.push(format!("[channel.{}] {} gpio{} out of range", name, field, pin));
                    }
                    Some(pin) if RESERVED_PINS.contains(&pin) => {
                        errors.push(format!("[channel.{}] {} gpio{} is the display bus", name, field, pin));
                    }
                    Some(pin) => {
                        if !pins.insert(pin) {
                            errors.push(format!("[channel.{}] gpio{} used twice", name, pin));
                        }
                    }
                    None => {
                        errors.push(format!("[channel.{}] {} must look like \"^!gpioN\"", name, field));
                    }
                },
                Some(_) => errors.push(format!("[channel.{}] {} must be a string", name, field)),
                None => {}
            }
        }

        match channel.get("key") {
            Some(toml::Value::String(k)) => {
                let mut chars = k.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        if !keys.insert(c.to_ascii_uppercase() as i64 - 'A' as i64 + 29) {
                            errors.push(format!("[channel.{}] key '{}' used twice", name, k));
                        }
                    }
                    _ => errors.push(format!("[channel.{}] key must be a single letter", name)),
                }
            }
            Some(toml::Value::Integer(code)) => {
                if !(0..=i64::from(u16::MAX)).contains(code) {
                    errors.push(format!("[channel.{}] key code out of range", name));
                } else if !keys.insert(*code) {
                    errors.push(format!("[channel.{}] key code {} used twice", name, code));
                }
            }
            Some(_) => errors.push(format!("[channel.{}] key must be a letter or code", name)),
            None => {}
        }

        if let Some(message) = channel.get("message") {
            match message.as_str() {
                Some(m) if display_width(m) > DISPLAY_CHARS => {
                    errors.push(format!("[channel.{}] message longer than {} digits", name, DISPLAY_CHARS));
                }
                Some(_) => {}
                None => errors.push(format!("[channel.{}] message must be a string", name)),
            }
        }

        if let Some(debounce) = channel.get("debounce_ms") {
            if !debounce.as_integer().is_some_and(|d| d >= 0) {
                errors.push(format!("[channel.{}] debounce_ms must be a non-negative integer", name));
            }
        }
    }
}

/// Validate the [display] section
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[display] must be a table".to_string());
            return;
        }
        None => return,
    };

    if let Some(bus) = display.get("bus") {
        if !bus.as_str().is_some_and(|b| b.eq_ignore_ascii_case("i2c0")) {
            errors.push("[display] bus must be \"I2C0\" (GPIO4/GPIO5)".to_string());
        }
    }

    if let Some(address) = display.get("address") {
        if !address.as_integer().is_some_and(|a| (0x08..=0x77).contains(&a)) {
            errors.push("[display] address must be a 7-bit I2C address".to_string());
        }
    }

    if let Some(brightness) = display.get("brightness") {
        if !brightness.as_integer().is_some_and(|b| (0..=15).contains(&b)) {
            errors.push("[display] brightness must be 0-15".to_string());
        }
    }

    if let Some(enabled) = display.get("enabled") {
        if enabled.as_bool().is_none() {
            errors.push("[display] enabled must be true or false".to_string());
        }
    }
}
