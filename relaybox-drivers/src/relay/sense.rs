//! Relay drive line debouncing
//!
//! The firmware samples the four drive lines on a fixed tick and feeds
//! the raw levels through [`RelaySense`], which absorbs contact bounce
//! and coupling glitches before a state change is accepted. Pure state
//! machine; the caller owns the pins and the clock.

use relaybox_core::mask::{RelayMask, RELAY_COUNT};

/// Relay sensing configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelaySenseConfig {
    /// How long a changed level must hold before it is accepted (ms)
    pub settle_ms: u16,
    /// Per-channel polarity; true means a low level reads as energized
    pub inverted: [bool; RELAY_COUNT],
}

impl Default for RelaySenseConfig {
    fn default() -> Self {
        Self {
            settle_ms: 20,
            inverted: [false; RELAY_COUNT],
        }
    }
}

impl RelaySenseConfig {
    /// Config for active-low drive lines (opto-isolated relay boards)
    pub fn active_low() -> Self {
        Self {
            inverted: [true; RELAY_COUNT],
            ..Self::default()
        }
    }
}

/// Debouncer for the four relay drive lines
///
/// The first update reports the power-on state immediately; after that
/// a changed level must hold for `settle_ms` before it replaces the
/// accepted state. Each channel settles independently.
pub struct RelaySense {
    config: RelaySenseConfig,
    /// Last accepted state
    accepted: RelayMask,
    /// Candidate level being timed, per channel
    pending: [bool; RELAY_COUNT],
    /// How long the candidate has held, per channel (ms)
    held_ms: [u32; RELAY_COUNT],
    /// Whether the power-on state has been reported yet
    reported: bool,
}

impl RelaySense {
    /// Create a debouncer with all channels accepted as off
    pub fn new(config: RelaySenseConfig) -> Self {
        Self {
            config,
            accepted: RelayMask::ALL_OFF,
            pending: [false; RELAY_COUNT],
            held_ms: [0; RELAY_COUNT],
            reported: false,
        }
    }

    /// Last accepted state
    pub fn mask(&self) -> RelayMask {
        self.accepted
    }

    /// Feed one sample of raw pin levels, `delta_ms` after the previous
    ///
    /// Returns the new mask when the accepted state changed, `None`
    /// otherwise. The very first sample is accepted as-is so the
    /// display shows the power-on state without waiting a settle time.
    pub fn update_with_delta(
        &mut self,
        levels: [bool; RELAY_COUNT],
        delta_ms: u32,
    ) -> Option<RelayMask> {
        let mut sampled = RelayMask::ALL_OFF;
        for (i, &raw) in levels.iter().enumerate() {
            sampled = sampled.with_relay(i, raw != self.config.inverted[i]);
        }

        if !self.reported {
            self.reported = true;
            self.accepted = sampled;
            for i in 0..RELAY_COUNT {
                self.pending[i] = sampled.is_on(i);
            }
            return Some(self.accepted);
        }

        let before = self.accepted;
        for i in 0..RELAY_COUNT {
            let level = sampled.is_on(i);
            if level == self.accepted.is_on(i) {
                // Level agrees with the accepted state; drop any candidate
                self.pending[i] = level;
                self.held_ms[i] = 0;
                continue;
            }

            if self.pending[i] == level {
                self.held_ms[i] = self.held_ms[i].saturating_add(delta_ms);
            } else {
                self.pending[i] = level;
                self.held_ms[i] = delta_ms;
            }

            if self.held_ms[i] >= u32::from(self.config.settle_ms) {
                self.accepted = self.accepted.with_relay(i, level);
                self.held_ms[i] = 0;
            }
        }

        if self.accepted != before {
            Some(self.accepted)
        } else {
            None
        }
    }
}
