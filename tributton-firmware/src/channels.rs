//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use tributton_core::KeyEvent;

/// Channel capacity for key events
const KEY_CHANNEL_SIZE: usize = 8;

/// Key events from the button drivers, in the order they were detected
pub static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyEvent, KEY_CHANNEL_SIZE> =
    Channel::new();
