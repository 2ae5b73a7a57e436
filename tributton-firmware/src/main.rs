//! Tributton - three buttons, three LEDs, one alphanumeric display
//!
//! Main firmware binary for RP2040 boards. Pressing a button lights its LED
//! and shows a short status message on an HT16K33 14-segment display;
//! releasing it turns the LED off and blanks the display.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use tributton_hal_rp2040::PinBank;

use crate::service::RpPeripherals;

mod channels;
mod config;
mod service;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tributton firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board = config::load_board_config();

    let (bank, remaining) = PinBank::from_peripherals(p);
    let mut peripherals = RpPeripherals::new(bank, remaining);

    // Every handle lives until power-off; there is no shutdown path on
    // bare metal.
    let (buttons, mapper) = tributton_core::startup(&mut peripherals, &board);

    spawner.spawn(tasks::input_task(buttons).unwrap());
    spawner.spawn(tasks::controller_task(mapper).unwrap());

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
