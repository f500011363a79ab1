//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use relaybox_core::RelayMask;

/// Latest accepted relay state (sense task -> display task)
///
/// A signal rather than a queue: only the newest state is worth
/// drawing, stale frames can be overwritten freely.
pub static RELAY_STATE: Signal<CriticalSectionRawMutex, RelayMask> = Signal::new();
