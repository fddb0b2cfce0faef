//! Push-style delivery: a tokio task drains a cursor into a cancelable
//! stream.
//!
//! ## Lifecycle
//!
//! - [`CoordinateStream::spawn`] starts one producer task and returns the
//!   read side plus a [`StreamHandle`].
//! - The stream ends when the cursor is exhausted, when the handle (or a
//!   parent token) is cancelled, or when every reader is dropped.
//! - The producer never waits for a reader without also watching for
//!   cancellation, and dropping the handle cancels it.

mod handle;
mod producer;
mod reader;

pub use handle::*;
pub use reader::*;

use tokio::{runtime::Handle, sync::mpsc};
use tokio_util::sync::CancellationToken;

use crate::cursor::CoordinateCursor;

impl CoordinateStream {
    /// Spawns a producer for `cursor` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime, like [`tokio::spawn`].
    ///
    /// # Example
    /// ```
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// use gridcursor::{
    ///     cursor::{BasicCursor, CoordinateCursor},
    ///     grid::{Dimensions, GridSequence, Order},
    ///     stream::CoordinateStream,
    /// };
    ///
    /// let seq = GridSequence::new(Dimensions::planar(2, 2), Order::Ascending).unwrap();
    /// let (stream, handle) = CoordinateStream::spawn(BasicCursor::new(seq, false));
    ///
    /// let mut seen = 0;
    /// while let Some(_coordinate) = stream.recv().await {
    ///     seen += 1;
    /// }
    /// assert_eq!(seen, 4);
    /// handle.join().await.unwrap();
    /// # }
    /// ```
    pub fn spawn<C>(cursor: C) -> (Self, StreamHandle)
    where
        C: CoordinateCursor + Send + 'static,
    {
        Self::spawn_on(cursor, &Handle::current(), &CancellationToken::new())
    }

    /// Like [`Self::spawn`], but the stream is also cancelled when `parent`
    /// is.
    ///
    /// Cancelling the returned handle does not cancel `parent`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn_with_token<C>(cursor: C, parent: &CancellationToken) -> (Self, StreamHandle)
    where
        C: CoordinateCursor + Send + 'static,
    {
        Self::spawn_on(cursor, &Handle::current(), parent)
    }

    /// Spawns the producer on an explicit runtime.
    pub fn spawn_on<C>(
        cursor: C,
        runtime: &Handle,
        parent: &CancellationToken,
    ) -> (Self, StreamHandle)
    where
        C: CoordinateCursor + Send + 'static,
    {
        // One slot is the closest tokio gets to a rendezvous channel: at most
        // one claimed coordinate waits for a reader.
        let (tx, rx) = mpsc::channel(1);
        let token = parent.child_token();

        let task = runtime.spawn(producer::produce(cursor, tx, token.clone()));

        (Self::new(rx, token.clone()), StreamHandle::new(token, task))
    }
}
