//! Relay box status display firmware
//!
//! RP2040 firmware that watches the four relay drive lines of the box
//! and mirrors their on/off state on a 128x64 SSD1306 OLED. The relays
//! themselves are driven by the mains controller; this board only
//! observes.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use relaybox_core::StatusRenderer;
use relaybox_drivers::display::Ssd1306;

mod channels;
mod tasks;

/// I2C clock for the OLED (fast mode)
const I2C_FREQ_HZ: u32 = 400_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Relaybox firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup I2C for OLED (GPIO4=SDA, GPIO5=SCL)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQ_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let renderer = StatusRenderer::new(Ssd1306::new(i2c));

    // Relay drive line sense inputs (GPIO6-9), active low from the opto stage
    let drive_lines = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
    ];

    // Spawn tasks
    spawner.spawn(tasks::relay_sense_task(drive_lines)).unwrap();
    spawner.spawn(tasks::display_task(renderer)).unwrap();

    info!("All tasks spawned");
}
