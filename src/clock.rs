//! Timestamp sources that feed the UUID generators.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::layout::TIMESTAMP_MASK;

/// Number of 100-nanosecond intervals between the Gregorian epoch (1582-10-15) and the Unix epoch.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// Converts a Unix timestamp in milliseconds into a 100-nanosecond tick count since the Gregorian
/// epoch.
///
/// The result saturates at [`TIMESTAMP_MASK`], which is reached in the year 5236.
pub const fn ticks_from_unix_ms(unix_ts_ms: u64) -> u64 {
    let ticks = unix_ts_ms.saturating_mul(10_000).saturating_add(GREGORIAN_OFFSET);
    if ticks > TIMESTAMP_MASK {
        TIMESTAMP_MASK
    } else {
        ticks
    }
}

/// Converts a 100-nanosecond tick count since the Gregorian epoch into a Unix timestamp in
/// milliseconds. Ticks before the Unix epoch saturate to zero.
pub const fn unix_ms_from_ticks(ticks: u64) -> u64 {
    ticks.saturating_sub(GREGORIAN_OFFSET) / 10_000
}

/// Builds the least significant half of a UUID from a clock sequence and a node identifier.
///
/// The two most significant bits of `clock_seq` are replaced by the RFC 4122 variant `10`.
///
/// # Examples
///
/// ```rust
/// use serial_uuid::node_and_sequence;
///
/// let low = node_and_sequence(0x1234, &[1, 2, 3, 4, 5, 6]);
/// assert_eq!(low, 0x9234_0102_0304_0506);
/// ```
pub const fn node_and_sequence(clock_seq: u16, node: &[u8; 6]) -> u64 {
    (0x8000 | (clock_seq as u64 & 0x3fff)) << 48
        | (node[0] as u64) << 40
        | (node[1] as u64) << 32
        | (node[2] as u64) << 24
        | (node[3] as u64) << 16
        | (node[4] as u64) << 8
        | (node[5] as u64)
}

/// The interface a generator pulls timestamps and the node identifier from.
///
/// Implementations are responsible for the monotonicity of the timestamps they return and for
/// being safe to call concurrently when shared between threads; the generators neither validate
/// nor correct the values.
pub trait ClockSource {
    /// Returns the next timestamp as 100-nanosecond ticks since 1582-10-15. Only the low 60 bits
    /// are used.
    fn next_timestamp(&self) -> u64;

    /// Returns the least significant half of the UUIDs: clock sequence and node identifier, with
    /// the variant bits `10` already set. It must not change over the lifetime of the source.
    fn node_and_sequence(&self) -> u64;
}

impl<C: ClockSource + ?Sized> ClockSource for &C {
    fn next_timestamp(&self) -> u64 {
        (**self).next_timestamp()
    }

    fn node_and_sequence(&self) -> u64 {
        (**self).node_and_sequence()
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<C: ClockSource + ?Sized> ClockSource for std::boxed::Box<C> {
    fn next_timestamp(&self) -> u64 {
        (**self).next_timestamp()
    }

    fn node_and_sequence(&self) -> u64 {
        (**self).node_and_sequence()
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl<C: ClockSource + ?Sized> ClockSource for std::sync::Arc<C> {
    fn next_timestamp(&self) -> u64 {
        (**self).next_timestamp()
    }

    fn node_and_sequence(&self) -> u64 {
        (**self).node_and_sequence()
    }
}

/// A simulated clock that starts at a fixed instant and advances by a fixed interval on every
/// call.
///
/// This is useful for generating historic data sets and for deterministic tests. The counter is
/// atomic, so the clock can be shared between threads and never returns the same timestamp twice
/// as long as the interval is positive.
///
/// # Examples
///
/// ```rust
/// use serial_uuid::{ClockSource, IntervalClock};
///
/// let clock = IntervalClock::from_ticks(1_000, 10, 0x8000_0000_0000_0000);
/// assert_eq!(clock.next_timestamp(), 1_010);
/// assert_eq!(clock.next_timestamp(), 1_020);
/// ```
#[derive(Debug)]
pub struct IntervalClock {
    current: AtomicU64,
    interval: u64,
    node_and_sequence: u64,
}

impl IntervalClock {
    /// Creates a clock starting at `start_unix_ms` that advances `interval_nanos` per call.
    ///
    /// The interval is truncated to 100-nanosecond precision.
    pub const fn new(start_unix_ms: u64, interval_nanos: u64, node_and_sequence: u64) -> Self {
        Self::from_ticks(
            ticks_from_unix_ms(start_unix_ms),
            interval_nanos / 100,
            node_and_sequence,
        )
    }

    /// Creates a clock from a raw tick count and a step in ticks. The first timestamp returned is
    /// `start + step`.
    pub const fn from_ticks(start: u64, step: u64, node_and_sequence: u64) -> Self {
        Self {
            current: AtomicU64::new(start),
            interval: step,
            node_and_sequence,
        }
    }
}

impl ClockSource for IntervalClock {
    fn next_timestamp(&self) -> u64 {
        let prev = self.current.fetch_add(self.interval, Ordering::Relaxed);
        prev.wrapping_add(self.interval) & TIMESTAMP_MASK
    }

    fn node_and_sequence(&self) -> u64 {
        self.node_and_sequence
    }
}

#[cfg(feature = "std")]
pub use system::SystemClock;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod system {
    use super::{node_and_sequence, AtomicU64, ClockSource, Ordering, GREGORIAN_OFFSET};
    use std::{sync::atomic::AtomicBool, time};

    /// Amount of wall clock rollback, in ticks, that is worth a warning (ten seconds).
    const ROLLBACK_WARNING: u64 = 100_000_000;

    /// A clock that reads the system time and guarantees strictly increasing timestamps within the
    /// process.
    ///
    /// When the system time does not advance beyond the last timestamp issued (for example, two
    /// calls within the same 100-nanosecond tick, or a clock rollback), the clock goes on with the
    /// last timestamp plus one. No drift correction or cross-process coordination takes place. A
    /// rollback of more than ten seconds is logged once, when the clock starts lagging.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serial_uuid::{ClockSource, SystemClock};
    ///
    /// let clock = SystemClock::with_rng(&mut rand::thread_rng());
    /// let a = clock.next_timestamp();
    /// let b = clock.next_timestamp();
    /// assert!(a < b);
    /// ```
    #[derive(Debug)]
    pub struct SystemClock {
        last: AtomicU64,
        lagging: AtomicBool,
        node_and_sequence: u64,
    }

    impl SystemClock {
        /// Creates a clock with the specified clock sequence and node identifier word.
        pub fn new(node_and_sequence: u64) -> Self {
            tracing::debug!(node_and_sequence, "configured system clock");
            Self {
                last: AtomicU64::new(0),
                lagging: AtomicBool::new(false),
                node_and_sequence,
            }
        }

        /// Creates a clock with a random clock sequence and a random node identifier.
        ///
        /// The multicast bit of the node identifier is set so that it cannot collide with the
        /// address of a real network interface.
        pub fn with_rng<R: rand::RngCore + ?Sized>(rng: &mut R) -> Self {
            let mut node = [0u8; 6];
            rng.fill_bytes(&mut node);
            node[0] |= 0x01;
            Self::new(node_and_sequence(rng.next_u32() as u16, &node))
        }

        fn now() -> u64 {
            let elapsed = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards");
            (elapsed.as_nanos() / 100) as u64 + GREGORIAN_OFFSET
        }
    }

    impl Default for SystemClock {
        /// Creates a clock with a random node identifier drawn from [`rand::thread_rng`].
        fn default() -> Self {
            Self::with_rng(&mut rand::thread_rng())
        }
    }

    impl ClockSource for SystemClock {
        fn next_timestamp(&self) -> u64 {
            let now = Self::now();
            let next = |prev: u64| if now > prev { now } else { prev + 1 };

            let prev = match self
                .last
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| Some(next(prev)))
            {
                Ok(prev) | Err(prev) => prev,
            };

            let lagging = prev > now + ROLLBACK_WARNING;
            let was_lagging = self.lagging.swap(lagging, Ordering::Relaxed);
            if lagging && !was_lagging {
                tracing::warn!(
                    lag_ticks = prev - now,
                    "system clock is behind the last issued timestamp"
                );
            }
            next(prev)
        }

        fn node_and_sequence(&self) -> u64 {
            self.node_and_sequence
        }
    }

}
