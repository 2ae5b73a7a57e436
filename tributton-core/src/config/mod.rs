//! Configuration types
//!
//! Board configuration and the `board.toml` parser.

pub mod board;
pub mod toml;

pub use board::*;
pub use toml::{parse_board_config, ParseError};
