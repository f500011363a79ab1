//! Relay state sensing
//!
//! Debounces the four relay drive lines into accepted state snapshots.

pub mod sense;

pub use sense::{RelaySense, RelaySenseConfig};
