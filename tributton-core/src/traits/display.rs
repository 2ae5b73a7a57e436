//! Text display trait

use crate::error::IoFault;

/// Number of characters the alphanumeric display shows
pub const DISPLAY_CHARS: usize = 4;

/// Write-only text display
///
/// Text longer than [`DISPLAY_CHARS`] is truncated by the implementation.
/// Writing the empty string blanks the display.
pub trait TextDisplay {
    /// Show `text`, replacing whatever was displayed
    fn display(&mut self, text: &str) -> Result<(), IoFault>;

    /// Blank the display
    fn clear(&mut self) -> Result<(), IoFault>;

    /// Switch the display on or off
    fn set_enabled(&mut self, enabled: bool) -> Result<(), IoFault>;

    /// Set brightness (0-15)
    fn set_brightness(&mut self, level: u8) -> Result<(), IoFault>;

    /// Release the display
    fn close(self) -> Result<(), IoFault>
    where
        Self: Sized;
}
