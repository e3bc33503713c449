//! Common settings in Hanseg.
use bincode::config::{self, Fixint, LittleEndian};

/// Default number of characters held by the sliding buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Number of characters before the buffer edge in which a cycle may be ended early
/// to refill the buffer.
pub const BUFFER_EXHAUST_CRITICAL: usize = 100;

/// Magic header of a compiled dictionary.
pub const MODEL_MAGIC: &[u8] = b"HansegDictionary 0.1\n";

pub(crate) fn bincode_config() -> config::Configuration<LittleEndian, Fixint> {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
}

/// Computes the lookahead margin used with a buffer of `capacity` characters.
#[inline(always)]
pub(crate) fn exhaust_critical(capacity: usize) -> usize {
    BUFFER_EXHAUST_CRITICAL.min(capacity / 2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaust_critical() {
        assert_eq!(exhaust_critical(DEFAULT_BUFFER_CAPACITY), 100);
        assert_eq!(exhaust_critical(16), 8);
        assert_eq!(exhaust_critical(2), 1);
    }
}
