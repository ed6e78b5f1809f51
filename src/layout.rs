//! Bit layouts that turn a 60-bit RFC 4122 timestamp into the most significant half of a UUID.
//!
//! Every layout inserts the version `1` nibble at bits 12-15 of the result and loses no
//! timestamp bit, so [`Layout::decode_timestamp`] recovers the original tick count.

mod reversed;
mod serial;
mod standard;

pub use reversed::ReversedLayout;
pub use serial::{ConfigurationError, SerialLayout};
pub use standard::StandardLayout;

/// Mask of the meaningful bits of a timestamp supplied by a [`ClockSource`].
///
/// [`ClockSource`]: crate::ClockSource
pub const TIMESTAMP_MASK: u64 = (1 << 60) - 1;

/// Version nibble of time-based UUIDs placed at its position in the most significant half.
const VERSION_BITS: u64 = 0x1000;

/// Position of the version nibble in the most significant half.
const VERSION_MASK: u64 = 0xf000;

/// A bit arrangement strategy applied to the timestamp before forming a UUID.
///
/// Implementations are pure configuration: they carry no timestamp state, so a single instance
/// may be shared across threads and generators.
pub trait Layout {
    /// Transforms a timestamp into the most significant 64 bits of a UUID, including the version
    /// nibble. Bits of `timestamp` above the 60-bit range are ignored.
    fn encode_timestamp(&self, timestamp: u64) -> u64;

    /// Restores the 60-bit timestamp from the most significant 64 bits produced by
    /// [`encode_timestamp`](Layout::encode_timestamp).
    fn decode_timestamp(&self, high: u64) -> u64;
}

impl<L: Layout + ?Sized> Layout for &L {
    fn encode_timestamp(&self, timestamp: u64) -> u64 {
        (**self).encode_timestamp(timestamp)
    }

    fn decode_timestamp(&self, high: u64) -> u64 {
        (**self).decode_timestamp(high)
    }
}

/// Returns true if `high` carries the version `1` nibble.
const fn has_version_bits(high: u64) -> bool {
    high & VERSION_MASK == VERSION_BITS
}

/// Returns true if the two most significant bits of `low` are the RFC 4122 variant `10`.
pub(crate) const fn has_variant_bits(low: u64) -> bool {
    low >> 62 == 0b10
}
