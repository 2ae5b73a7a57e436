//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod button;
pub mod display;
pub mod led;
pub mod service;

pub use button::ButtonSource;
pub use display::{TextDisplay, DISPLAY_CHARS};
pub use led::LedOutput;
pub use service::PeripheralService;
