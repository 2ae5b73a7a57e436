//! Button polling task
//!
//! Polls every registered button driver on a fixed tick and forwards
//! settled transitions to the controller.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::KEY_EVENTS;
use crate::service::Buttons;

/// Polling period; well under the debounce window
const POLL_INTERVAL_MS: u64 = 10;

#[embassy_executor::task]
pub async fn input_task(mut buttons: Buttons) {
    info!("Input task started, {} buttons", buttons.registered());
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        let now_ms = Instant::now().as_millis();
        for event in buttons.poll(now_ms) {
            KEY_EVENTS.send(event).await;
        }
        ticker.next().await;
    }
}
