use super::{has_version_bits, Layout, TIMESTAMP_MASK, VERSION_BITS};

/// A layout that keeps the timestamp in big-endian order so that identifiers sort by generation
/// time, optionally rotated by whole bytes to control which part of the timestamp leads.
///
/// With `shift == 0` the generated UUIDs are strictly increasing with the timestamp, which keeps
/// newly inserted keys at the tail of a sorted store. With `shift == n` the timestamp is rotated
/// right by `n` bytes within its 60 bits: byte `n - 1` of the timestamp becomes the leading byte of
/// the UUID, so larger shifts put coarser time granularity in front. UUIDs whose timestamps share
/// the lowest `8 * n` bits remain ordered by time.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    rotr(timestamp, 8 * shift)                 |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |        rotr(timestamp)        |  ver  |   rotr(timestamp)     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// # Examples
///
/// ```rust
/// use serial_uuid::{Layout, SerialLayout};
///
/// let layout = SerialLayout::new(0)?;
/// assert!(layout.encode_timestamp(41) < layout.encode_timestamp(42));
///
/// assert!(SerialLayout::new(8).is_err());
/// # Ok::<(), serial_uuid::ConfigurationError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SerialLayout {
    shift: u8,
}

impl SerialLayout {
    /// The largest accepted `shift`.
    pub const MAX_SHIFT: i32 = 7;

    /// Creates a layout that rotates the timestamp right by `shift` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidShift`] if `shift` is not within `0` and `7`.
    pub fn new(shift: i32) -> Result<Self, ConfigurationError> {
        if !(0..=Self::MAX_SHIFT).contains(&shift) {
            tracing::warn!(shift, "rejected serial layout shift");
            return Err(ConfigurationError::InvalidShift(shift));
        }

        tracing::debug!(shift, "configured serial layout");
        Ok(Self { shift: shift as u8 })
    }

    /// Returns the number of bytes the timestamp is rotated by.
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    /// Returns the amounts of the right and left shifts that make up the rotation.
    ///
    /// The left amount leaves four bits of headroom: the bits it pushes past bit 59 are copies of
    /// bits kept by the right shift and are discarded when the version nibble is inserted.
    const fn rotation(&self) -> (u32, u32) {
        let bits_r = self.shift as u32 * 8;
        (bits_r, 64 - bits_r - 4)
    }
}

impl Layout for SerialLayout {
    fn encode_timestamp(&self, timestamp: u64) -> u64 {
        let mut timestamp = timestamp & TIMESTAMP_MASK;
        if self.shift != 0 {
            let (bits_r, bits_l) = self.rotation();
            timestamp = (timestamp >> bits_r) | (timestamp << bits_l);
        }

        let high = (timestamp >> 12 << 16) | (timestamp & 0xfff) | VERSION_BITS;
        debug_assert!(has_version_bits(high));
        high
    }

    fn decode_timestamp(&self, high: u64) -> u64 {
        let rotated = ((high >> 16) << 12) | (high & 0xfff);
        let (bits_r, bits_l) = self.rotation();
        ((rotated << bits_r) | (rotated >> bits_l)) & TIMESTAMP_MASK
    }
}

/// Error returned when a layout is configured with an unsupported parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The serial layout `shift` is outside of `0..=7`.
    #[error("invalid value for parameter shift: '{0}' (must be within 0 and 7)")]
    InvalidShift(i32),
}

#[cfg(test)]
mod tests {
    use super::{ConfigurationError, SerialLayout};
    use crate::{Layout, StandardLayout, Uuid, TIMESTAMP_MASK};
    use rand::Rng;

    /// Accepts shifts within 0 and 7 only
    #[test]
    fn accepts_shifts_within_0_and_7_only() {
        for shift in [i32::MIN, -8, -1, 8, 9, 64, i32::MAX] {
            assert_eq!(
                SerialLayout::new(shift),
                Err(ConfigurationError::InvalidShift(shift))
            );
        }
        for shift in 0..=7 {
            assert_eq!(SerialLayout::new(shift).unwrap().shift() as i32, shift);
        }
        assert_eq!(SerialLayout::new(0), Ok(SerialLayout::default()));
    }

    /// Formats configuration error message
    #[cfg(feature = "std")]
    #[test]
    fn formats_configuration_error_message() {
        assert_eq!(
            SerialLayout::new(-1).unwrap_err().to_string(),
            "invalid value for parameter shift: '-1' (must be within 0 and 7)"
        );
    }

    /// Matches non-rotated path when applying rotation formula with zero shift
    #[test]
    fn matches_non_rotated_path_when_applying_rotation_formula_with_zero_shift() {
        let layout = SerialLayout::new(0).unwrap();
        let (bits_r, bits_l) = layout.rotation();
        assert_eq!((bits_r, bits_l), (0, 60));

        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let ts = rng.gen::<u64>() & TIMESTAMP_MASK;
            let rotated = (ts >> bits_r) | (ts << bits_l);
            let expected = (rotated >> 12 << 16) | (rotated & 0xfff) | 0x1000;
            assert_eq!(layout.encode_timestamp(ts), expected);
        }
    }

    /// Encodes the same timestamp and version as standard layout with zero shift
    #[test]
    fn encodes_the_same_timestamp_and_version_as_standard_layout_with_zero_shift() {
        let serial = SerialLayout::new(0).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let ts = rng.gen::<u64>() & TIMESTAMP_MASK;
            let a = serial.encode_timestamp(ts);
            let b = StandardLayout.encode_timestamp(ts);
            assert_eq!(a & 0xf000, b & 0xf000);
            assert_eq!(serial.decode_timestamp(a), StandardLayout.decode_timestamp(b));
        }

        let e = Uuid::from_u64_pair(serial.encode_timestamp(0x1234_5678), 0x9000 << 48);
        assert_eq!(&e.encode() as &str, "00000001-2345-1678-9000-000000000000");
    }

    /// Generates strictly increasing values with zero shift
    #[test]
    fn generates_strictly_increasing_values_with_zero_shift() {
        let layout = SerialLayout::new(0).unwrap();
        let mut rng = rand::thread_rng();
        let mut ts = rng.gen::<u64>() & (TIMESTAMP_MASK >> 1);
        let mut prev = layout.encode_timestamp(ts);
        for _ in 0..100_000 {
            ts += rng.gen_range(1..=0x1_0000);
            let curr = layout.encode_timestamp(ts);
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Keeps time order among timestamps sharing the rotated bits
    #[test]
    fn keeps_time_order_among_timestamps_sharing_the_rotated_bits() {
        let mut rng = rand::thread_rng();
        for shift in 1..=7 {
            let layout = SerialLayout::new(shift).unwrap();
            let bits_r = shift * 8;
            let cycle = 1u64 << bits_r;
            let count = (1u64 << (60 - bits_r)).min(1_000) - 1;

            let mut ts = rng.gen::<u64>() & (cycle - 1);
            let mut prev = layout.encode_timestamp(ts);
            for _ in 0..count {
                ts += cycle;
                let curr = layout.encode_timestamp(ts);
                assert!(prev < curr, "shift {}", shift);
                if shift < 7 {
                    let prefix_bits = 64 - bits_r;
                    assert_eq!(prev >> prefix_bits, curr >> prefix_bits, "shift {}", shift);
                }
                prev = curr;
            }
        }
    }

    /// Leads with coarser timestamp bytes as shift grows
    #[test]
    fn leads_with_coarser_timestamp_bytes_as_shift_grows() {
        let ts = 0x0123_4567_89ab_cdefu64 & TIMESTAMP_MASK;
        for shift in 1..=7 {
            let layout = SerialLayout::new(shift).unwrap();
            let leading_byte = (ts >> (shift * 8 - 8)) & 0xff;
            assert_eq!(
                layout.encode_timestamp(ts) >> 56,
                leading_byte,
                "shift {}",
                shift
            );
        }

        for shift in 1..=6 {
            let layout = SerialLayout::new(shift).unwrap();
            let low_bytes = ts & ((1 << (shift * 8)) - 1);
            assert_eq!(
                layout.encode_timestamp(ts) >> (64 - shift * 8),
                low_bytes,
                "shift {}",
                shift
            );
        }
    }
}
