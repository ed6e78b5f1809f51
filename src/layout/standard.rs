use super::{has_version_bits, Layout, TIMESTAMP_MASK, VERSION_BITS};

/// The RFC 4122 version 1 layout: `time_low`, `time_mid`, and `time_hi_and_version`.
///
/// The low 32 bits of the timestamp lead the UUID, so identifiers generated in sequence are
/// scattered across the key space at fine granularity and wrap around every 429.5 seconds.
///
/// # Examples
///
/// ```rust
/// use serial_uuid::{Layout, StandardLayout};
///
/// assert_eq!(
///     StandardLayout.encode_timestamp(0x01e7_4ba2_2061_6934),
///     0x2061_6934_4ba2_11e7
/// );
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct StandardLayout;

impl Layout for StandardLayout {
    fn encode_timestamp(&self, timestamp: u64) -> u64 {
        let time_low = timestamp & 0xffff_ffff;
        let time_mid = (timestamp >> 32) & 0xffff;
        let time_hi = (timestamp >> 48) & 0x0fff;

        let high = (time_low << 32) | (time_mid << 16) | VERSION_BITS | time_hi;
        debug_assert!(has_version_bits(high));
        high
    }

    fn decode_timestamp(&self, high: u64) -> u64 {
        let time_low = high >> 32;
        let time_mid = (high >> 16) & 0xffff;
        let time_hi = high & 0x0fff;
        ((time_hi << 48) | (time_mid << 32) | time_low) & TIMESTAMP_MASK
    }
}
