//! Relay drive line sampling task

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use relaybox_core::RELAY_COUNT;
use relaybox_drivers::relay::{RelaySense, RelaySenseConfig};

use crate::channels::RELAY_STATE;

/// Sampling period for the drive lines
const SAMPLE_MS: u64 = 10;

/// Samples the relay drive lines and publishes debounced state changes
///
/// The first published state is the power-on snapshot; the display task
/// uses it to bring the panel up showing something true.
#[embassy_executor::task]
pub async fn relay_sense_task(lines: [Input<'static>; RELAY_COUNT]) {
    info!("Relay sense task started");

    let mut sense = RelaySense::new(RelaySenseConfig::active_low());
    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_MS));

    loop {
        ticker.next().await;

        let mut levels = [false; RELAY_COUNT];
        for (level, line) in levels.iter_mut().zip(lines.iter()) {
            *level = line.is_high();
        }

        if let Some(mask) = sense.update_with_delta(levels, SAMPLE_MS as u32) {
            debug!("Relay state changed: {}", mask);
            RELAY_STATE.signal(mask);
        }
    }
}
