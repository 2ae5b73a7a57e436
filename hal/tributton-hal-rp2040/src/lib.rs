//! RP2040-specific HAL for the Tributton firmware
//!
//! This crate provides RP2040-specific glue on top of embassy-rp:
//!
//! - GPIO allocation by number for config-driven setup
//! - I2C bus selection and blocking bus construction
//! - Concrete pin/bus types wrapped in the `tributton-hal` adapters

#![no_std]

pub mod i2c;
pub mod pins;

pub use i2c::{open_i2c0, I2cBusId, RpI2c};
pub use pins::{PinBank, PinError, RemainingPeripherals, RpInput, RpOutput};
