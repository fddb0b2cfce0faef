use core::cell::Cell;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    cursor::{CoordinateCursor, CursorStatus, resolve_slot, served_from_counter},
    grid::GridSequence,
};

/// A single-owner cursor with no synchronization.
///
/// The position lives in a [`Cell`], so this cursor is `Send` but not `Sync`:
/// it can be moved into a task or thread but not shared between them.
///
/// ## Features
/// - ❌ Thread-safe
/// - ✅ No locking or atomic overhead
///
/// ## Recommended When
/// - A single consumer owns the cursor, e.g. the producer behind a
///   coordinate stream
///
/// ## See Also
/// - [`LockCursor`]
/// - [`AtomicCursor`]
///
/// [`LockCursor`]: crate::cursor::LockCursor
/// [`AtomicCursor`]: crate::cursor::AtomicCursor
#[derive(Debug)]
pub struct BasicCursor {
    sequence: GridSequence,
    repeat: bool,
    position: Cell<u64>,
}

impl BasicCursor {
    /// Creates a cursor positioned at the start of `sequence`.
    ///
    /// # Example
    /// ```
    /// use gridcursor::{
    ///     cursor::BasicCursor,
    ///     grid::{Coordinate, Dimensions, GridSequence, Order},
    /// };
    ///
    /// let seq = GridSequence::new(Dimensions::planar(2, 1), Order::Ascending).unwrap();
    /// let cursor = BasicCursor::new(seq, false);
    ///
    /// assert_eq!(cursor.next_coordinate().ready(), Some(Coordinate::planar(0, 0)));
    /// assert_eq!(cursor.next_coordinate().ready(), Some(Coordinate::planar(1, 0)));
    /// assert!(cursor.next_coordinate().is_exhausted());
    /// ```
    pub const fn new(sequence: GridSequence, repeat: bool) -> Self {
        Self {
            sequence,
            repeat,
            position: Cell::new(0),
        }
    }

    /// Claims the next coordinate.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_coordinate(&self) -> CursorStatus {
        let slot = self.position.get();
        let status = resolve_slot(&self.sequence, self.repeat, slot);
        if !status.is_exhausted() {
            self.position.set(slot.wrapping_add(1));
        }
        status
    }
}

impl CoordinateCursor for BasicCursor {
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
        served_from_counter(&self.sequence, self.repeat, self.position.get())
    }
}
