//! Controller task
//!
//! Owns the mapper, and with it every LED and the display. Applies key
//! events in arrival order.

use defmt::*;

use crate::channels::KEY_EVENTS;
use crate::service::BoardMapper;

#[embassy_executor::task]
pub async fn controller_task(mut mapper: BoardMapper) {
    info!("Controller task started, display: {}", mapper.has_display());

    loop {
        let event = KEY_EVENTS.receive().await;
        if mapper.on_key(event) {
            debug!("Key {} {:?} handled", event.code.0, event.action);
        } else {
            warn!("Unhandled key code {}", event.code.0);
        }
    }
}
