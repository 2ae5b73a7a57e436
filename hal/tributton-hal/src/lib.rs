//! Tributton Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the button, LED and
//! display drivers are written against. Chip support comes either from a
//! chip-specific crate or, more commonly, from wrapping any `embedded-hal`
//! 1.0 implementation with the adapters in [`embedded`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tributton-drivers / tributton-firmware │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tributton-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │ tributton-hal-│
//! │   adapters    │       │    rp2040     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C bus operations
//!
//! Unlike a bare register HAL every operation here is fallible: the pins
//! and the bus may sit behind an expander or a kernel driver where writes
//! can fail, and callers are expected to log and carry on.

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use embedded::{EhI2c, EhInput, EhOutput};
pub use gpio::{GpioError, InputPin, OutputPin};
pub use i2c::{I2cBus, I2cConfig, I2cError};
