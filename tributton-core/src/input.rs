//! Button bank
//!
//! Holds the registered button drivers and turns their settled transitions
//! into [`KeyEvent`]s.

use heapless::Vec;

use crate::button::{ButtonId, KeyCode, KeyEvent, BUTTON_COUNT};
use crate::config::BoardConfig;
use crate::lifecycle::ReleaseReport;
use crate::traits::ButtonSource;

struct Slot<B> {
    key: KeyCode,
    source: Option<B>,
}

/// The board's button drivers, one slot per button
pub struct ButtonBank<B> {
    slots: [Slot<B>; BUTTON_COUNT],
}

impl<B: ButtonSource> ButtonBank<B> {
    /// Build a bank from registered drivers
    ///
    /// `sources` is indexed by `ButtonId::index()`; `None` marks a button
    /// whose driver failed to register.
    pub fn new(config: &BoardConfig, sources: [Option<B>; BUTTON_COUNT]) -> Self {
        let mut sources = sources.into_iter();
        let slots = ButtonId::ALL.map(|id| Slot {
            key: config.channel(id).button.key,
            source: sources.next().flatten(),
        });
        Self { slots }
    }

    /// Poll every driver once
    ///
    /// Events come out in button order. Unregistered drivers are skipped.
    pub fn poll(&mut self, now_ms: u64) -> Vec<KeyEvent, BUTTON_COUNT> {
        let mut events = Vec::new();
        for slot in self.slots.iter_mut() {
            let Some(source) = slot.source.as_mut() else {
                continue;
            };
            if !source.is_registered() {
                continue;
            }
            if let Some(action) = source.poll(now_ms) {
                log_debug!("Key {} {:?}", slot.key.0, action);
                // Capacity equals the slot count
                let _ = events.push(KeyEvent {
                    code: slot.key,
                    action,
                });
            }
        }
        events
    }

    /// Number of drivers currently registered
    pub fn registered(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.source.as_ref().is_some_and(|b| b.is_registered()))
            .count()
    }

    /// Unregister and release every driver
    ///
    /// Each driver stops emitting events before its line is released. A
    /// second call does nothing.
    pub fn shutdown(&mut self) -> ReleaseReport {
        let mut report = ReleaseReport::default();
        for (id, slot) in ButtonId::ALL.iter().zip(self.slots.iter_mut()) {
            if let Some(mut source) = slot.source.take() {
                source.unregister();
                match source.close() {
                    Ok(()) => report.released += 1,
                    Err(e) => {
                        log_error!("Error closing button {:?}: {:?}", id, e);
                        report.failed += 1;
                    }
                }
            }
        }
        report
    }
}
