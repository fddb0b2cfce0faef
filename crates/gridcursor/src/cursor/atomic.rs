use portable_atomic::{AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    cursor::{CoordinateCursor, CursorStatus, resolve_slot, served_from_counter},
    grid::GridSequence,
};

/// A lock-free cursor suitable for multi-threaded environments.
///
/// Each call claims a slot with one `fetch_add` on an unbounded [`AtomicU64`]
/// counter and maps it onto the sequence: modulo the length when repeating,
/// otherwise any slot past the end is exhausted. The counter keeps growing
/// after exhaustion instead of being capped with a compare-and-swap loop, so
/// no caller ever retries or blocks.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Never blocks
///
/// ## Caveats
/// The counter wraps after 2^64 calls. A non-repeating cursor called that many
/// times would start handing out coordinates again, and a repeating cursor
/// whose length does not divide 2^64 would skip part of a cycle. Both are far
/// beyond any practical call volume.
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Contention is high and fair access can be sacrificed for throughput
///
/// ## See Also
/// - [`BasicCursor`]
/// - [`LockCursor`]
///
/// [`BasicCursor`]: crate::cursor::BasicCursor
/// [`LockCursor`]: crate::cursor::LockCursor
#[derive(Debug)]
pub struct AtomicCursor {
    sequence: GridSequence,
    repeat: bool,
    #[cfg(feature = "cache-padded")]
    counter: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    counter: AtomicU64,
}

impl AtomicCursor {
    /// Creates a cursor positioned at the start of `sequence`.
    ///
    /// # Example
    /// ```
    /// use gridcursor::{
    ///     cursor::AtomicCursor,
    ///     grid::{Coordinate, Dimensions, GridSequence, Order},
    /// };
    ///
    /// let seq = GridSequence::new(Dimensions::planar(2, 1), Order::Descending).unwrap();
    /// let cursor = AtomicCursor::new(seq, true);
    ///
    /// let first: Vec<_> = (0..4)
    ///     .filter_map(|_| cursor.next_coordinate().ready())
    ///     .map(Coordinate::xy)
    ///     .collect();
    /// assert_eq!(first, [(1, 0), (0, 0), (1, 0), (0, 0)]);
    /// ```
    pub fn new(sequence: GridSequence, repeat: bool) -> Self {
        Self {
            sequence,
            repeat,
            #[cfg(feature = "cache-padded")]
            counter: crossbeam_utils::CachePadded::new(AtomicU64::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            counter: AtomicU64::new(0),
        }
    }

    /// Claims the next coordinate without blocking.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_coordinate(&self) -> CursorStatus {
        // The sequence is immutable, so the slot itself is the only thing
        // that needs to be unique. Relaxed RMWs still form a single total
        // order per atomic.
        let slot = self.counter.fetch_add(1, Ordering::Relaxed);
        resolve_slot(&self.sequence, self.repeat, slot)
    }
}

impl CoordinateCursor for AtomicCursor {
    fn new(sequence: GridSequence, repeat: bool) -> Self {
        Self::new(sequence, repeat)
    }

    fn next_coordinate(&self) -> CursorStatus {
        self.next_coordinate()
    }

    fn sequence(&self) -> &GridSequence {
        &self.sequence
    }

    fn is_repeating(&self) -> bool {
        self.repeat
    }

    fn served(&self) -> u64 {
        served_from_counter(
            &self.sequence,
            self.repeat,
            self.counter.load(Ordering::Relaxed),
        )
    }
}
