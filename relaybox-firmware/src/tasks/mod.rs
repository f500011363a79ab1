//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod display;
pub mod relays;

pub use display::display_task;
pub use relays::relay_sense_task;
