//! Board configuration loading

use defmt::*;
use tributton_core::config::{parse_board_config, BoardConfig};
use tributton_hal_rp2040::pins::{GPIO_COUNT, RESERVED_PINS};

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to rewire
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Parse and validate the embedded board.toml
///
/// build.rs has already checked it, so failure here means the runtime
/// parser and the build-time check disagree. Fall back to the default
/// wiring rather than refuse to boot.
pub fn load_board_config() -> BoardConfig {
    let config = match parse_board_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse board.toml: {:?}", e);
            warn!("Using default board configuration");
            return BoardConfig::default();
        }
    };

    match config.validate(GPIO_COUNT, &RESERVED_PINS) {
        Ok(()) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Invalid board.toml: {:?}", e);
            warn!("Using default board configuration");
            BoardConfig::default()
        }
    }
}
