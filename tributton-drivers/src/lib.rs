//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tributton-core on top of the tributton-hal pin and bus traits:
//!
//! - LEDs on GPIO outputs
//! - Debounced push buttons on GPIO inputs
//! - HT16K33 14-segment alphanumeric display on I2C

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod logging;

pub mod button;
pub mod display;
pub mod fault;
pub mod led;

pub use button::ButtonInputDriver;
pub use display::Ht16k33;
pub use led::GpioLed;
