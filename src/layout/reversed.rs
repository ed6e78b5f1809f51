use super::{has_version_bits, Layout, TIMESTAMP_MASK, VERSION_BITS};

/// A layout that reverses the byte order of the timestamp so that consecutive ticks land far apart
/// in the key space.
///
/// The fastest changing byte of the timestamp leads the UUID, which spreads inserts evenly over all
/// partitions of a range-partitioned store instead of hot-spotting the newest one. A 60-bit
/// timestamp always has a zero top nibble, which after the reversal sits at bits 4-7; the version
/// nibble takes its place, so no timestamp bit is lost.
///
/// # Examples
///
/// ```rust
/// use serial_uuid::{Layout, ReversedLayout};
///
/// assert_eq!(
///     ReversedLayout.encode_timestamp(0x01e7_4ba2_2061_6934),
///     0x3469_6120_a24b_1e71
/// );
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ReversedLayout;

impl Layout for ReversedLayout {
    fn encode_timestamp(&self, timestamp: u64) -> u64 {
        // always ends with "0x" as the top nibble of a 60-bit value is empty
        let reversed = (timestamp & TIMESTAMP_MASK).swap_bytes();

        // use the hole at bits 4-7 to insert the version
        let high = (reversed >> 16 << 16)
            | (((reversed & 0xffff) | (VERSION_BITS << 4)) >> 4)
            | (reversed & 0xf);
        debug_assert!(has_version_bits(high));
        high
    }

    fn decode_timestamp(&self, high: u64) -> u64 {
        let reversed = (high >> 16 << 16) | ((high & 0x0ff0) << 4) | (high & 0xf);
        reversed.swap_bytes()
    }
}
