//! LED output trait

use crate::error::IoFault;

/// A single on/off LED line
pub trait LedOutput {
    /// Turn the LED on or off
    fn set(&mut self, on: bool) -> Result<(), IoFault>;

    /// Last logical state successfully written
    fn is_on(&self) -> bool;

    /// Release the underlying line
    fn close(self) -> Result<(), IoFault>
    where
        Self: Sized;
}
