//! Button source trait

use crate::button::ButtonAction;
use crate::error::IoFault;

/// A registered button driver
///
/// Drivers own debouncing: `poll` only reports settled transitions.
pub trait ButtonSource {
    /// Sample the input and report a press/release transition, if any
    ///
    /// `now_ms` is a monotonic timestamp in milliseconds.
    fn poll(&mut self, now_ms: u64) -> Option<ButtonAction>;

    /// Stop emitting events
    fn unregister(&mut self);

    /// Whether the driver still emits events
    fn is_registered(&self) -> bool;

    /// Release the underlying input line
    fn close(self) -> Result<(), IoFault>
    where
        Self: Sized;
}
