//! Board-agnostic core logic for Tributton
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Button, key and event types
//! - Hardware abstraction traits (LED, button source, display, service)
//! - The input-to-output mapper (button → LED + status message)
//! - The button bank that polls registered button drivers
//! - Startup and shutdown of every hardware handle
//! - Board configuration types and the `board.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod logging;

pub mod button;
pub mod config;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod mapper;
pub mod traits;

pub use button::{ButtonAction, ButtonEvent, ButtonId, KeyCode, KeyEvent, BUTTON_COUNT};
pub use error::IoFault;
pub use input::ButtonBank;
pub use lifecycle::{startup, ReleaseReport};
pub use mapper::{Dispatch, Mapper, Outcome};
