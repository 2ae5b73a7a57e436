//! Input-to-output mapper
//!
//! Owns the three LED lines and the (optional) display. A press lights the
//! button's LED and shows its status message; a release turns the LED off
//! and blanks the display.
//!
//! Every hardware write is attempted independently: a fault is logged and
//! reported in the returned [`Dispatch`], never propagated, and never stops
//! the remaining writes.

use crate::button::{ButtonAction, ButtonEvent, ButtonId, KeyCode, KeyEvent, BUTTON_COUNT};
use crate::config::{BoardConfig, Message};
use crate::error::IoFault;
use crate::lifecycle::ReleaseReport;
use crate::traits::{LedOutput, TextDisplay};

/// Result of one hardware write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Write succeeded
    Written,
    /// Handle unavailable; nothing was attempted
    Skipped,
    /// Write attempted and failed (already logged)
    Failed(IoFault),
}

impl Outcome {
    fn from_result(result: Result<(), IoFault>) -> Self {
        match result {
            Ok(()) => Outcome::Written,
            Err(e) => Outcome::Failed(e),
        }
    }
}

/// What happened while handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    pub led: Outcome,
    pub display: Outcome,
}

/// Per-button row of the output table
struct Channel<L> {
    key: KeyCode,
    led: Option<L>,
    message: Message,
}

/// Maps button events to LED and display writes
pub struct Mapper<L, D> {
    channels: [Channel<L>; BUTTON_COUNT],
    display: Option<D>,
}

impl<L: LedOutput, D: TextDisplay> Mapper<L, D> {
    /// Build a mapper from already-opened handles
    ///
    /// `leds` is indexed by `ButtonId::index()`; `None` marks a line that
    /// failed to open. Keys and messages come from `config`.
    pub fn new(config: &BoardConfig, leds: [Option<L>; BUTTON_COUNT], display: Option<D>) -> Self {
        let mut leds = leds.into_iter();
        let channels = ButtonId::ALL.map(|id| {
            let channel = config.channel(id);
            Channel {
                key: channel.button.key,
                led: leds.next().flatten(),
                message: channel.message.clone(),
            }
        });
        Self { channels, display }
    }

    /// Handle a key event from a button driver
    ///
    /// Returns `false` if no button is bound to the key code, leaving the
    /// event for whoever else listens.
    pub fn on_key(&mut self, event: KeyEvent) -> bool {
        match self.button_for_key(event.code) {
            Some(button) => {
                self.handle(ButtonEvent {
                    button,
                    action: event.action,
                });
                true
            }
            None => false,
        }
    }

    /// Handle a resolved button event
    pub fn handle(&mut self, event: ButtonEvent) -> Dispatch {
        let on = event.action.led_on();
        let led = self.set_led(event.button, on);

        let display = match event.action {
            ButtonAction::Pressed => {
                let channel = &self.channels[event.button.index()];
                match self.display.as_mut() {
                    Some(display) => Outcome::from_result(display.display(&channel.message)),
                    None => Outcome::Skipped,
                }
            }
            ButtonAction::Released => self.update_message(""),
        };
        if let Outcome::Failed(e) = display {
            log_error!("Error setting display: {:?}", e);
        }

        Dispatch { led, display }
    }

    /// Find the button bound to a key code
    pub fn button_for_key(&self, key: KeyCode) -> Option<ButtonId> {
        self.channels
            .iter()
            .position(|c| c.key == key)
            .and_then(ButtonId::from_index)
    }

    /// Current LED state, or `None` if the line is unavailable
    pub fn led_state(&self, button: ButtonId) -> Option<bool> {
        self.channels[button.index()].led.as_ref().map(|l| l.is_on())
    }

    /// Whether a display is attached
    pub fn has_display(&self) -> bool {
        self.display.is_some()
    }

    /// Release every LED line and the display
    ///
    /// A failure on one handle is logged and does not stop the others.
    /// Handles are gone afterwards, so a second call does nothing.
    pub fn shutdown(&mut self) -> ReleaseReport {
        let mut report = ReleaseReport::default();

        for (id, channel) in ButtonId::ALL.iter().zip(self.channels.iter_mut()) {
            if let Some(led) = channel.led.take() {
                match led.close() {
                    Ok(()) => report.released += 1,
                    Err(e) => {
                        log_error!("Error closing LED {:?}: {:?}", id, e);
                        report.failed += 1;
                    }
                }
            }
        }

        if let Some(display) = self.display.take() {
            match display.close() {
                Ok(()) => report.released += 1,
                Err(e) => {
                    log_error!("Error closing display: {:?}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    fn set_led(&mut self, button: ButtonId, on: bool) -> Outcome {
        match self.channels[button.index()].led.as_mut() {
            Some(led) => {
                let outcome = Outcome::from_result(led.set(on));
                if let Outcome::Failed(e) = outcome {
                    log_error!("Error updating LED {:?}: {:?}", button, e);
                }
                outcome
            }
            None => Outcome::Skipped,
        }
    }

    fn update_message(&mut self, text: &str) -> Outcome {
        match self.display.as_mut() {
            Some(display) => Outcome::from_result(display.display(text)),
            None => Outcome::Skipped,
        }
    }
}
