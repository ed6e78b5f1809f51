//! Time-based UUID generator that combines a [`Layout`] with a [`ClockSource`].

use crate::layout::{
    has_variant_bits, ConfigurationError, Layout, ReversedLayout, SerialLayout, StandardLayout,
};
use crate::{ClockSource, Uuid};

/// Represents a UUIDv1 generator that pulls timestamps from a clock and arranges them with a
/// layout.
///
/// The generator holds no state of its own: all timestamp state lives in the clock, so
/// generation takes `&self` and a generator can be shared between threads whenever the clock can.
/// The clock may be owned, borrowed, or shared through [`std::sync::Arc`].
///
/// # Examples
///
/// ```rust
/// use serial_uuid::{node_and_sequence, IntervalClock, TimeBasedGenerator};
///
/// let clock = IntervalClock::new(1_496_854_535_812, 100, node_and_sequence(0, &[1, 2, 3, 4, 5, 6]));
/// let g = TimeBasedGenerator::serial(&clock, 0)?;
/// let a = g.generate();
/// let b = g.generate();
/// assert!(a < b);
/// assert_eq!(a.version(), Some(1));
/// # Ok::<(), serial_uuid::ConfigurationError>(())
/// ```
///
/// # Generator functions
///
/// | Flavor             | Timestamp | Clock sequence and node |
/// | ------------------ | --------- | ----------------------- |
/// | [`generate`]       | Clock     | Clock                   |
/// | [`generate_with`]  | Clock     | Argument                |
/// | [`generate_core`]  | Argument  | Argument                |
///
/// [`generate`]: TimeBasedGenerator::generate
/// [`generate_with`]: TimeBasedGenerator::generate_with
/// [`generate_core`]: TimeBasedGenerator::generate_core
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TimeBasedGenerator<L, C> {
    layout: L,

    /// The clock the generator pulls timestamps from.
    clock: C,
}

impl<C: ClockSource> TimeBasedGenerator<StandardLayout, C> {
    /// Creates a generator of standard RFC 4122 version 1 UUIDs.
    pub const fn standard(clock: C) -> Self {
        Self::new(StandardLayout, clock)
    }
}

impl<C: ClockSource> TimeBasedGenerator<SerialLayout, C> {
    /// Creates a generator of time-ordered UUIDs rotated by `shift` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidShift`] if `shift` is not within `0` and `7`.
    pub fn serial(clock: C, shift: i32) -> Result<Self, ConfigurationError> {
        SerialLayout::new(shift).map(|layout| Self::new(layout, clock))
    }
}

impl<C: ClockSource> TimeBasedGenerator<ReversedLayout, C> {
    /// Creates a generator of UUIDs with byte-reversed timestamps.
    pub const fn reversed(clock: C) -> Self {
        Self::new(ReversedLayout, clock)
    }
}

impl<L: Layout, C: ClockSource> TimeBasedGenerator<L, C> {
    /// Creates a generator instance.
    pub const fn new(layout: L, clock: C) -> Self {
        Self { layout, clock }
    }

    /// Generates a new UUID from the next timestamp and the node identifier of the clock.
    pub fn generate(&self) -> Uuid {
        self.generate_with(self.clock.node_and_sequence())
    }

    /// Generates a new UUID from the next timestamp of the clock and the `node_and_sequence`
    /// passed.
    ///
    /// The argument becomes the least significant half of the UUID unchanged, so its two most
    /// significant bits should be the RFC 4122 variant `10`.
    pub fn generate_with(&self, node_and_sequence: u64) -> Uuid {
        debug_assert!(
            has_variant_bits(node_and_sequence),
            "`node_and_sequence` must carry the RFC 4122 variant bits"
        );
        self.generate_core(self.clock.next_timestamp(), node_and_sequence)
    }

    /// Generates a new UUID from the `timestamp` and `node_and_sequence` passed.
    ///
    /// This is a pure function of its arguments. Bits of `timestamp` above the 60-bit range are
    /// ignored.
    pub fn generate_core(&self, timestamp: u64, node_and_sequence: u64) -> Uuid {
        Uuid::from_u64_pair(self.layout.encode_timestamp(timestamp), node_and_sequence)
    }

    /// Restores the 60-bit timestamp of a UUID produced with the same layout.
    pub fn timestamp_of(&self, uuid: &Uuid) -> u64 {
        self.layout.decode_timestamp(uuid.as_u64_pair().0)
    }

    /// Returns a reference to the layout.
    pub const fn layout(&self) -> &L {
        &self.layout
    }

    /// Returns a reference to the clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

/// Supports operations as an infinite iterator that produces a new UUID for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use serial_uuid::{IntervalClock, TimeBasedGenerator};
///
/// let clock = IntervalClock::from_ticks(0x01e7_4ba2_2061_6934, 1, 0x8000_0102_0304_0506);
/// TimeBasedGenerator::reversed(clock)
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<L: Layout, C: ClockSource> Iterator for TimeBasedGenerator<L, C> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<L: Layout, C: ClockSource> core::iter::FusedIterator for TimeBasedGenerator<L, C> {}

#[cfg(test)]
mod tests {
    use super::TimeBasedGenerator;
    use crate::{
        node_and_sequence, unix_ms_from_ticks, ClockSource, ConfigurationError, IntervalClock,
        Layout, ReversedLayout, SerialLayout, StandardLayout, Uuid, Variant,
    };

    const N_SAMPLES: usize = 100_000;
    const LOW: u64 = 0x9000_0000_0000_0000;

    /// Returns a deterministic clock starting at 2017-06-07T16:55:35.812Z
    pub(super) fn prepare_clock() -> IntervalClock {
        IntervalClock::new(1_496_854_535_812, 100, node_and_sequence(0x1234, &[8, 6, 7, 5, 3, 9]))
    }

    /// Generates expected identifiers from prepared timestamp
    #[test]
    fn generates_expected_identifiers_from_prepared_timestamp() {
        let clock = IntervalClock::from_ticks(0x1234_5677, 1, LOW);
        let standard = TimeBasedGenerator::standard(&clock);
        assert_eq!(
            standard.generate(),
            "12345678-0000-1000-9000-000000000000".parse::<Uuid>().unwrap()
        );

        let cases: [(&dyn Layout, &str); 3] = [
            (&StandardLayout, "12345678-0000-1000-9000-000000000000"),
            (&SerialLayout::default(), "00000001-2345-1678-9000-000000000000"),
            (&ReversedLayout, "78563412-0000-1000-9000-000000000000"),
        ];
        for (layout, text) in cases {
            let g = TimeBasedGenerator::new(layout, &clock);
            let e = g.generate_core(0x1234_5678, LOW);
            assert_eq!(&e.encode() as &str, text);
            assert_eq!(e.as_u64_pair().1, LOW);
        }
    }

    /// Returns the same identifier for the same arguments
    #[test]
    fn returns_the_same_identifier_for_the_same_arguments() {
        let clock = prepare_clock();
        let standard = TimeBasedGenerator::standard(&clock);
        let serial = TimeBasedGenerator::serial(&clock, 3).unwrap();
        let reversed = TimeBasedGenerator::reversed(&clock);
        for ts in [0, 1, 0x01e7_4ba2_2061_6934, 0x0fff_ffff_ffff_ffff] {
            assert_eq!(standard.generate_core(ts, LOW), standard.generate_core(ts, LOW));
            assert_eq!(serial.generate_core(ts, LOW), serial.generate_core(ts, LOW));
            assert_eq!(reversed.generate_core(ts, LOW), reversed.generate_core(ts, LOW));
        }

        // the clock is not consulted
        assert_eq!(clock.next_timestamp(), prepare_clock().next_timestamp());
    }

    /// Rejects out-of-range shift at construction
    #[test]
    fn rejects_out_of_range_shift_at_construction() {
        let clock = prepare_clock();
        assert_eq!(
            TimeBasedGenerator::serial(&clock, -1).unwrap_err(),
            ConfigurationError::InvalidShift(-1)
        );
        assert_eq!(
            TimeBasedGenerator::serial(&clock, 8).unwrap_err(),
            ConfigurationError::InvalidShift(8)
        );
        assert!(TimeBasedGenerator::serial(&clock, 0).is_ok());
        assert!(TimeBasedGenerator::serial(&clock, 7).is_ok());
    }

    /// Generates sortable identifiers by creation time with serial layout
    #[test]
    fn generates_sortable_identifiers_by_creation_time_with_serial_layout() {
        let g = TimeBasedGenerator::serial(prepare_clock(), 0).unwrap();
        let mut prev = g.generate();
        for curr in g.take(N_SAMPLES - 1) {
            assert!(prev < curr);
            assert!((&prev.encode() as &str) < (&curr.encode() as &str));
            prev = curr;
        }
    }

    /// Encodes timestamp recoverable for every layout
    #[test]
    fn encodes_timestamp_recoverable_for_every_layout() {
        let clock = prepare_clock();
        let standard = TimeBasedGenerator::standard(&clock);
        let serial = TimeBasedGenerator::serial(&clock, 5).unwrap();
        let reversed = TimeBasedGenerator::reversed(&clock);

        let e = standard.generate();
        assert_eq!(unix_ms_from_ticks(standard.timestamp_of(&e)), 1_496_854_535_812);
        let e = serial.generate();
        assert_eq!(unix_ms_from_ticks(serial.timestamp_of(&e)), 1_496_854_535_812);
        let e = reversed.generate();
        assert_eq!(unix_ms_from_ticks(reversed.timestamp_of(&e)), 1_496_854_535_812);
        assert_eq!(reversed.timestamp_of(&e), clock.next_timestamp() - 1);
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        let clock = prepare_clock();
        let g = TimeBasedGenerator::reversed(&clock);
        for _ in 0..1_000 {
            let e = g.generate();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
            assert_eq!(e.clock_sequence(), 0x1234);
            assert_eq!(e.node(), [8, 6, 7, 5, 3, 9]);
        }

        let e = g.generate_with(0xbfff_ffff_ffff_ffff);
        assert_eq!(e.variant(), Variant::Var10);
        assert_eq!(e.as_u64_pair().1, 0xbfff_ffff_ffff_ffff);
    }
}
