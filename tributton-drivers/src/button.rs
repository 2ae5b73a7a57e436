//! Debounced push-button input
//!
//! Samples a GPIO input on every poll. A level change is reported only after
//! it has held for the configured debounce window; shorter glitches are
//! ignored.

use tributton_core::config::{ButtonConfig, LogicState};
use tributton_core::traits::ButtonSource;
use tributton_core::{ButtonAction, IoFault};
use tributton_hal::InputPin;

use crate::fault::from_gpio;

/// Button driver on a GPIO input
pub struct ButtonInputDriver<P> {
    pin: P,
    logic: LogicState,
    debounce_ms: u64,
    /// Last reported state (true = pressed)
    pressed: bool,
    /// Level that differs from `pressed` and since when
    pending: Option<(bool, u64)>,
    registered: bool,
    /// Read faults since registration
    faults: u32,
    /// Last read failed
    faulted: bool,
}

impl<P: InputPin> ButtonInputDriver<P> {
    /// Register a button on `pin`
    ///
    /// The level read now becomes the settled state, so a button held at
    /// boot produces no event until it is released.
    pub fn register(mut pin: P, config: &ButtonConfig) -> Result<Self, IoFault> {
        let logic = config.logic_state();
        let high = pin.is_high().map_err(from_gpio)?;
        Ok(Self {
            pin,
            logic,
            debounce_ms: u64::from(config.debounce_ms),
            pressed: logic.is_pressed(high),
            pending: None,
            registered: true,
            faults: 0,
            faulted: false,
        })
    }

    /// Settled state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Number of failed pin reads
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Whether the most recent read failed
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Hand back the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ButtonSource for ButtonInputDriver<P> {
    fn poll(&mut self, now_ms: u64) -> Option<ButtonAction> {
        if !self.registered {
            return None;
        }

        let pressed = match self.pin.is_high() {
            Ok(high) => {
                if self.faulted {
                    log_info!("Button input readable again after {} faults", self.faults);
                    self.faulted = false;
                }
                self.logic.is_pressed(high)
            }
            Err(e) => {
                // Warn once per outage, not on every poll
                if !self.faulted {
                    log_warn!("Button input read failed: {:?}", e);
                    self.faulted = true;
                }
                self.faults = self.faults.saturating_add(1);
                return None;
            }
        };

        if pressed == self.pressed {
            self.pending = None;
            return None;
        }

        match self.pending {
            Some((level, since)) if level == pressed => {
                if now_ms.saturating_sub(since) < self.debounce_ms {
                    return None;
                }
            }
            _ => {
                self.pending = Some((pressed, now_ms));
                if self.debounce_ms > 0 {
                    return None;
                }
            }
        }

        self.pending = None;
        self.pressed = pressed;
        Some(if pressed {
            ButtonAction::Pressed
        } else {
            ButtonAction::Released
        })
    }

    fn unregister(&mut self) {
        self.registered = false;
        self.pending = None;
    }

    fn is_registered(&self) -> bool {
        self.registered
    }

    fn close(self) -> Result<(), IoFault> {
        // Dropping the pin returns it to the HAL
        self.release();
        Ok(())
    }
}
