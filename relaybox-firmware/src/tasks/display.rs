//! Status display task

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};

use relaybox_core::StatusRenderer;
use relaybox_drivers::display::Ssd1306;

use crate::channels::RELAY_STATE;

/// The concrete surface the firmware renders to
type Oled = Ssd1306<I2c<'static, Blocking>>;

/// Drives the OLED from accepted relay state changes
///
/// The panel is brought up exactly once, with the power-on state from
/// the sense task. If it does not respond, the task keeps draining
/// state updates so nothing backs up; the renderer drops them.
#[embassy_executor::task]
pub async fn display_task(mut renderer: StatusRenderer<Oled>) {
    info!("Display task started");

    // The sense task's first report is the power-on state
    let initial = RELAY_STATE.wait().await;
    renderer.init(initial);

    if renderer.is_ready() {
        info!("OLED initialized");
    } else {
        // The box keeps switching relays whether or not anyone can watch
        error!("Failed to initialize OLED, status display disabled");
    }

    loop {
        let mask = RELAY_STATE.wait().await;
        renderer.render(mask);
    }
}
