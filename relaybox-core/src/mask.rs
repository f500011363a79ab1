//! Packed relay state snapshot
//!
//! The relay box has four channels, reported as one byte with bit `i`
//! holding channel `i`. The upper four bits are reserved; they travel
//! with the byte but nothing reads them.

/// Number of relay channels on the box
pub const RELAY_COUNT: usize = 4;

/// Snapshot of all relay channel states packed into one byte
///
/// Bit `i` is channel `i`, 1 = energized. The accessors only look at
/// the lower [`RELAY_COUNT`] bits; reserved bits are carried through
/// [`bits`](Self::bits) untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayMask(u8);

impl RelayMask {
    /// All channels de-energized
    pub const ALL_OFF: Self = Self(0);

    /// Build a mask from a raw state byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw state byte, reserved bits included
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check a single channel
    ///
    /// Indices past the last channel read as off.
    pub const fn is_on(self, index: usize) -> bool {
        index < RELAY_COUNT && (self.0 >> index) & 1 == 1
    }

    /// Copy of this mask with one channel changed
    ///
    /// Out-of-range indices leave the mask as-is.
    pub const fn with_relay(self, index: usize, on: bool) -> Self {
        if index >= RELAY_COUNT {
            return self;
        }
        let bit = 1 << index;
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    /// Number of energized channels
    pub const fn count_on(self) -> usize {
        (self.0 & 0x0F).count_ones() as usize
    }

    /// Channel states in ascending index order
    pub fn relays(self) -> impl Iterator<Item = bool> {
        (0..RELAY_COUNT).map(move |i| self.is_on(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_off() {
        let mask = RelayMask::default();
        assert_eq!(mask, RelayMask::ALL_OFF);
        assert_eq!(mask.count_on(), 0);
        for i in 0..RELAY_COUNT {
            assert!(!mask.is_on(i));
        }
    }

    #[test]
    fn test_bit_positions() {
        let mask = RelayMask::from_bits(0b0101);
        assert!(mask.is_on(0));
        assert!(!mask.is_on(1));
        assert!(mask.is_on(2));
        assert!(!mask.is_on(3));
        assert_eq!(mask.count_on(), 2);
    }

    #[test]
    fn test_reserved_bits_read_as_off() {
        let mask = RelayMask::from_bits(0xF0);
        for i in 0..RELAY_COUNT {
            assert!(!mask.is_on(i));
        }
        assert!(!mask.is_on(4));
        assert!(!mask.is_on(7));
        assert_eq!(mask.count_on(), 0);
        // The raw byte keeps them
        assert_eq!(mask.bits(), 0xF0);
    }

    #[test]
    fn test_with_relay_sets_and_clears() {
        let mask = RelayMask::ALL_OFF.with_relay(1, true).with_relay(3, true);
        assert_eq!(mask.bits(), 0b1010);

        let mask = mask.with_relay(1, false);
        assert_eq!(mask.bits(), 0b1000);
    }

    #[test]
    fn test_with_relay_out_of_range_is_noop() {
        let mask = RelayMask::from_bits(0b0011);
        assert_eq!(mask.with_relay(4, true), mask);
        assert_eq!(mask.with_relay(255, false), mask);
    }

    #[test]
    fn test_relays_iterates_in_channel_order() {
        let mask = RelayMask::from_bits(0b1001);
        let states: heapless::Vec<bool, 4> = mask.relays().collect();
        assert_eq!(states.as_slice(), &[true, false, false, true]);
    }
}
