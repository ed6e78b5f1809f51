//! UUID version 1 generators with timestamp layouts tuned for sorted storage
//!
//! ```rust
//! use serial_uuid::{SystemClock, TimeBasedGenerator};
//!
//! let g = TimeBasedGenerator::serial(SystemClock::default(), 0)?;
//! let uuid = g.generate();
//! println!("{}", uuid); // e.g. "1eefc2a5-6a3b-1c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! # Ok::<(), serial_uuid::ConfigurationError>(())
//! ```
//!
//! The identifiers produced are valid RFC 4122 version 1 UUIDs: they carry a 60-bit timestamp of
//! 100-nanosecond ticks since 1582-10-15, the version `1`, the variant `10`, a 14-bit clock
//! sequence, and a 48-bit node identifier. What differs between the layouts is where the timestamp
//! bits go, and therefore how the binary and textual order of the UUIDs relates to time.
//!
//! # Layouts
//!
//! | Layout             | Leading bits of the UUID           | Order of consecutive UUIDs   |
//! | ------------------ | ---------------------------------- | ---------------------------- |
//! | [`StandardLayout`] | low 32 bits of the timestamp       | wraps every 429.5 seconds    |
//! | [`SerialLayout`]   | high bits of the timestamp         | increasing (with `shift` 0)  |
//! | [`ReversedLayout`] | low byte of the timestamp          | spread over the key space    |
//!
//! The serial layout keeps inserts clustered at the tail of an LSM tree or B-tree, which helps
//! write locality and compression. Its `shift` parameter rotates the timestamp by whole bytes so
//! that a coarser time granularity leads the key, which suits time-bucketed partitioning. The
//! reversed layout does the opposite and distributes temporally adjacent records evenly over all
//! partitions of a range-partitioned store.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    layout(timestamp) [63:32]                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   layout(timestamp) [31:16]   |  ver  |layout(timestamp)[11:0]|
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|       clock_seq           |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! # Clock sources
//!
//! Generators pull timestamps from a [`ClockSource`]. The uniqueness of the generated UUIDs relies
//! entirely on the clock returning increasing timestamps and on the node identifier being unique;
//! the generators do not validate either. [`SystemClock`] reads the system time and
//! [`IntervalClock`] simulates a clock that advances by a fixed interval, for example to produce
//! historic data sets:
//!
//! ```rust
//! use serial_uuid::{node_and_sequence, IntervalClock, TimeBasedGenerator};
//!
//! // one UUID per second since 2019-01-01T00:00:00Z
//! let clock = IntervalClock::new(1_546_300_800_000, 1_000_000_000, node_and_sequence(0, &[0; 6]));
//! let g = TimeBasedGenerator::reversed(&clock);
//! for uuid in g.take(3) {
//!     println!("{}", uuid);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
mod generator;
mod id;
mod layout;

pub use clock::{
    node_and_sequence, ticks_from_unix_ms, unix_ms_from_ticks, ClockSource, IntervalClock,
    GREGORIAN_OFFSET,
};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use generator::TimeBasedGenerator;
pub use id::{ParseError, Uuid, Variant};
pub use layout::{
    ConfigurationError, Layout, ReversedLayout, SerialLayout, StandardLayout, TIMESTAMP_MASK,
};
