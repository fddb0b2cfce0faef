#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    cursor::{CoordinateCursor, CursorStatus, Mutex, MutexGuard, resolve_slot, served_from_counter},
    grid::GridSequence,
};

/// A lock-based cursor suitable for multi-threaded environments.
///
/// A single mutex guards both the exhaustion check and the read-and-increment
/// of the position, so calls are fully serialized. Once a non-repeating cursor
/// is exhausted the position stops advancing.
///
/// With the `parking-lot` feature the lock is a [`parking_lot::Mutex`];
/// otherwise it is a [`std::sync::Mutex`] whose poisoning is ignored, since
/// the guarded counter is consistent at every point a holder could panic.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Easy to extend with per-call bookkeeping
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Contention is low to moderate, or fair access matters
/// - Your target doesn't support 64-bit atomics
///
/// ## See Also
/// - [`BasicCursor`]
/// - [`AtomicCursor`]
///
/// [`BasicCursor`]: crate::cursor::BasicCursor
/// [`AtomicCursor`]: crate::cursor::AtomicCursor
#[derive(Debug)]
pub struct LockCursor {
    sequence: GridSequence,
    repeat: bool,
    #[cfg(feature = "cache-padded")]
    position: crossbeam_utils::CachePadded<Mutex<u64>>,
    #[cfg(not(feature = "cache-padded"))]
    position: Mutex<u64>,
}

impl LockCursor {
    /// Creates a cursor positioned at the start of `sequence`.
    ///
    /// # Example
    /// ```
    /// use gridcursor::{
    ///     cursor::LockCursor,
    ///     grid::{Dimensions, GridSequence, Order},
    /// };
    ///
    /// let seq = GridSequence::new(Dimensions::planar(3, 2), Order::Ascending).unwrap();
    /// let cursor = LockCursor::new(seq, false);
    ///
    /// let drained = std::thread::scope(|s| {
    ///     let a = s.spawn(|| {
    ///         std::iter::from_fn(|| cursor.next_coordinate().ready()).count()
    ///     });
    ///     let b = s.spawn(|| {
    ///         std::iter::from_fn(|| cursor.next_coordinate().ready()).count()
    ///     });
    ///     a.join().unwrap() + b.join().unwrap()
    /// });
    /// assert_eq!(drained, 6);
    /// ```
    pub fn new(sequence: GridSequence, repeat: bool) -> Self {
        Self {
            sequence,
            repeat,
            #[cfg(feature = "cache-padded")]
            position: crossbeam_utils::CachePadded::new(Mutex::new(0)),
            #[cfg(not(feature = "cache-padded"))]
            position: Mutex::new(0),
        }
    }

    /// Claims the next coordinate.
    ///
    /// Blocks only while another caller holds the lock.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_coordinate(&self) -> CursorStatus {
        let mut position = self.lock();
        let status = resolve_slot(&self.sequence, self.repeat, *position);
        if !status.is_exhausted() {
            *position = position.wrapping_add(1);
        }
        status
    }

    fn lock(&self) -> MutexGuard<'_, u64> {
        #[cfg(feature = "parking-lot")]
        {
            self.position.lock()
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            use crate::cursor::PoisonError;
            self.position.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

impl CoordinateCursor for LockCursor {
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
        served_from_counter(&self.sequence, self.repeat, *self.lock())
    }
}
