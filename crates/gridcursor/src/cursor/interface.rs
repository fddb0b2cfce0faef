use core::iter::FusedIterator;

use crate::{
    cursor::CursorStatus,
    grid::{Coordinate, GridSequence},
};

/// A thread-safe source of grid coordinates.
///
/// Every implementation hands out `sequence[n % len]` to the `n`th call
/// (zero-based, counted across all callers). Without `repeat`, calls past the
/// end return [`CursorStatus::Exhausted`] forever; with `repeat`, the sequence
/// cycles and the cursor never exhausts.
///
/// Implementations differ only in how they synchronize the shared position:
/// - [`LockCursor`] serializes calls behind a mutex.
/// - [`AtomicCursor`] assigns slots with a single `fetch_add`.
/// - [`BasicCursor`] is single-owner and not `Sync`.
///
/// [`LockCursor`]: crate::cursor::LockCursor
/// [`AtomicCursor`]: crate::cursor::AtomicCursor
/// [`BasicCursor`]: crate::cursor::BasicCursor
pub trait CoordinateCursor {
    /// Creates a cursor positioned at the start of `sequence`.
    fn new(sequence: GridSequence, repeat: bool) -> Self
    where
        Self: Sized;

    /// Claims the next coordinate.
    fn next_coordinate(&self) -> CursorStatus;

    /// The sequence this cursor walks.
    fn sequence(&self) -> &GridSequence;

    fn is_repeating(&self) -> bool;

    /// Number of coordinates handed out so far.
    ///
    /// Without `repeat` this never exceeds the sequence length, however many
    /// exhausted calls were made.
    fn served(&self) -> u64;

    /// Coordinates left before exhaustion, or `None` for a repeating cursor.
    fn remaining(&self) -> Option<u64> {
        if self.is_repeating() {
            None
        } else {
            Some(sequence_len(self.sequence()).saturating_sub(self.served()))
        }
    }

    /// Borrowing iterator that pulls until the cursor is exhausted.
    ///
    /// Iterators created on different threads from the same cursor split the
    /// sequence between them. A repeating cursor yields forever.
    fn iter(&self) -> Coordinates<'_, Self>
    where
        Self: Sized,
    {
        Coordinates { cursor: self }
    }
}

/// Iterator returned by [`CoordinateCursor::iter`].
#[derive(Debug)]
pub struct Coordinates<'a, C> {
    cursor: &'a C,
}

impl<C: CoordinateCursor> Iterator for Coordinates<'_, C> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next_coordinate().ready()
    }

    // Other callers may claim from the same cursor, so only the upper bound
    // is known.
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor.remaining() {
            Some(n) => (0, usize::try_from(n).ok()),
            None => (0, None),
        }
    }
}

// Exhaustion is permanent, so once `next` yields `None` it always will.
impl<C: CoordinateCursor> FusedIterator for Coordinates<'_, C> {}

pub(crate) fn sequence_len(sequence: &GridSequence) -> u64 {
    u64::try_from(sequence.len()).unwrap_or(u64::MAX)
}

/// Maps a claimed slot onto the sequence.
///
/// Slots are unbounded call counters. Repeating cursors reduce them modulo the
/// length; otherwise any slot at or past the length is exhausted, so no slot
/// ever indexes out of bounds.
#[inline]
pub(crate) fn resolve_slot(sequence: &GridSequence, repeat: bool, slot: u64) -> CursorStatus {
    let len = sequence_len(sequence);
    let index = if repeat {
        slot % len
    } else if slot < len {
        slot
    } else {
        return CursorStatus::Exhausted;
    };

    // `index < len`, and `len` came from a `usize`.
    #[allow(clippy::cast_possible_truncation)]
    let index = index as usize;
    CursorStatus::Ready {
        coordinate: sequence[index],
    }
}

/// Coordinates delivered by a cursor whose raw counter reads `counter`.
#[inline]
pub(crate) fn served_from_counter(sequence: &GridSequence, repeat: bool, counter: u64) -> u64 {
    if repeat {
        counter
    } else {
        counter.min(sequence_len(sequence))
    }
}
