//! Startup and shutdown
//!
//! [`startup`] opens every handle the board configuration names. Each one is
//! opened independently: a line that fails is logged and left out, and
//! everything else keeps working. Shutdown lives on [`Mapper::shutdown`] and
//! [`ButtonBank::shutdown`], which release what startup opened.

use crate::button::ButtonId;
use crate::config::BoardConfig;
use crate::error::IoFault;
use crate::input::ButtonBank;
use crate::mapper::Mapper;
use crate::traits::{PeripheralService, TextDisplay};

/// Tally of handles released during shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReleaseReport {
    pub released: u8,
    pub failed: u8,
}

impl ReleaseReport {
    /// Combine two reports
    pub fn merge(self, other: ReleaseReport) -> Self {
        Self {
            released: self.released + other.released,
            failed: self.failed + other.failed,
        }
    }
}

/// Open LEDs, register buttons and bring up the display
///
/// Order is LEDs, then buttons, then the display (enabled, brightness set,
/// cleared). A display that fails any init step is closed and dropped.
pub fn startup<S: PeripheralService>(
    service: &mut S,
    config: &BoardConfig,
) -> (ButtonBank<S::Button>, Mapper<S::Led, S::Display>) {
    let leds = ButtonId::ALL.map(|id| {
        let pin = &config.channel(id).led;
        match service.open_led(pin) {
            Ok(led) => Some(led),
            Err(e) => {
                log_error!("Error opening LED {:?} on GPIO{}: {:?}", id, pin.pin, e);
                None
            }
        }
    });

    let buttons = ButtonId::ALL.map(|id| {
        let button = &config.channel(id).button;
        match service.register_button(button) {
            Ok(driver) => Some(driver),
            Err(e) => {
                log_error!(
                    "Error registering button {:?} on GPIO{}: {:?}",
                    id,
                    button.pin.pin,
                    e
                );
                None
            }
        }
    });

    let display = if config.display.enabled {
        open_display(service, config)
    } else {
        log_info!("Display disabled");
        None
    };

    let bank = ButtonBank::new(config, buttons);
    let mapper = Mapper::new(config, leds, display);
    log_info!(
        "Startup: {} buttons, display {}",
        bank.registered(),
        mapper.has_display()
    );
    (bank, mapper)
}

fn open_display<S: PeripheralService>(service: &mut S, config: &BoardConfig) -> Option<S::Display> {
    let mut display = match service.open_display(&config.display) {
        Ok(display) => display,
        Err(e) => {
            log_error!("Error opening display: {:?}", e);
            return None;
        }
    };

    match init_display(&mut display, config.display.brightness) {
        Ok(()) => Some(display),
        Err(e) => {
            log_error!("Error initializing display: {:?}", e);
            if let Err(e) = display.close() {
                log_warn!("Error closing display: {:?}", e);
            }
            None
        }
    }
}

fn init_display<D: TextDisplay>(display: &mut D, brightness: u8) -> Result<(), IoFault> {
    display.set_enabled(true)?;
    display.set_brightness(brightness)?;
    display.clear()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{ButtonAction, KeyCode, KeyEvent};
    use crate::config::{ButtonConfig, DisplayConfig, PinConfig};
    use crate::input::tests::ScriptedButton;
    use crate::mapper::tests::{led, MockDisplay, MockLed, Shared};
    use std::string::String;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockService {
        bench: Shared,
        bad_led_pins: Vec<u8>,
        bad_button_pins: Vec<u8>,
        no_display: bool,
        presses: Vec<u8>,
    }

    impl PeripheralService for MockService {
        type Led = MockLed;
        type Button = ScriptedButton;
        type Display = MockDisplay;

        fn open_led(&mut self, pin: &PinConfig) -> Result<MockLed, IoFault> {
            self.bench.borrow_mut().calls.push(format!("open_led({})", pin.pin));
            if self.bad_led_pins.contains(&pin.pin) {
                return Err(IoFault::Unavailable);
            }
            let name = match pin.pin {
                16 => "led_a",
                17 => "led_b",
                _ => "led_c",
            };
            Ok(led(name, &self.bench))
        }

        fn register_button(&mut self, config: &ButtonConfig) -> Result<ScriptedButton, IoFault> {
            let pin = config.pin.pin;
            self.bench.borrow_mut().calls.push(format!("register({})", pin));
            if self.bad_button_pins.contains(&pin) {
                return Err(IoFault::Gpio);
            }
            let script: &[Option<ButtonAction>] = if self.presses.contains(&pin) {
                &[Some(ButtonAction::Pressed)]
            } else {
                &[]
            };
            Ok(ScriptedButton::new(script))
        }

        fn open_display(&mut self, config: &DisplayConfig) -> Result<MockDisplay, IoFault> {
            self.bench
                .borrow_mut()
                .calls
                .push(format!("open_display({:#x})", config.address));
            if self.no_display {
                return Err(IoFault::Nack);
            }
            Ok(MockDisplay {
                text: String::new(),
                bench: self.bench.clone(),
            })
        }
    }

    #[test]
    fn test_startup_order() {
        let mut service = MockService::default();
        let (bank, mapper) = startup(&mut service, &BoardConfig::default());

        assert_eq!(bank.registered(), 3);
        assert!(mapper.has_display());
        assert_eq!(
            service.bench.borrow().calls,
            vec![
                "open_led(16)",
                "open_led(17)",
                "open_led(18)",
                "register(13)",
                "register(14)",
                "register(15)",
                "open_display(0x70)",
                "enabled(true)",
                "brightness(15)",
                "clear",
            ]
        );
    }

    #[test]
    fn test_startup_continues_past_faults() {
        let mut service = MockService {
            bad_led_pins: vec![17],
            bad_button_pins: vec![13],
            no_display: true,
            presses: vec![14],
            ..Default::default()
        };
        let (mut bank, mut mapper) = startup(&mut service, &BoardConfig::default());

        assert_eq!(bank.registered(), 2);
        assert!(!mapper.has_display());
        assert_eq!(mapper.led_state(ButtonId::A), Some(false));
        assert_eq!(mapper.led_state(ButtonId::B), None);
        assert_eq!(mapper.led_state(ButtonId::C), Some(false));

        // Button B still reaches the mapper; its LED is simply skipped
        let events = bank.poll(0);
        assert_eq!(events.as_slice(), &[KeyEvent::down(KeyCode::B)]);
        for event in events {
            assert!(mapper.on_key(event));
        }
    }

    #[test]
    fn test_display_init_failure_closes_display() {
        let mut service = MockService::default();
        service.bench.borrow_mut().failing.push("display".into());
        let (_bank, mapper) = startup(&mut service, &BoardConfig::default());

        assert!(!mapper.has_display());
        let calls = service.bench.borrow().calls.clone();
        assert_eq!(calls[calls.len() - 2..], ["enabled(true)", "display.close"]);
    }

    #[test]
    fn test_disabled_display_not_opened() {
        let mut config = BoardConfig::default();
        config.display.enabled = false;
        let mut service = MockService::default();
        let (_bank, mapper) = startup(&mut service, &config);

        assert!(!mapper.has_display());
        assert!(!service
            .bench
            .borrow()
            .calls
            .iter()
            .any(|c| c.starts_with("open_display")));
    }

    #[test]
    fn test_full_shutdown() {
        let mut service = MockService::default();
        let (mut bank, mut mapper) = startup(&mut service, &BoardConfig::default());

        let report = bank.shutdown().merge(mapper.shutdown());
        assert_eq!(report, ReleaseReport { released: 7, failed: 0 });
        assert_eq!(bank.registered(), 0);
        assert!(!mapper.has_display());

        let again = bank.shutdown().merge(mapper.shutdown());
        assert_eq!(again, ReleaseReport::default());
    }
}
