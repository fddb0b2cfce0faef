use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Owns the producer task behind a [`CoordinateStream`].
///
/// Dropping the handle while the producer is still running cancels it, so the
/// task cannot outlive its owner. Keep the handle alive for as long as the
/// stream should keep flowing.
///
/// [`CoordinateStream`]: crate::stream::CoordinateStream
#[derive(Debug)]
#[must_use = "dropping the handle cancels the stream"]
pub struct StreamHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl StreamHandle {
    pub(crate) const fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self {
            token,
            task: Some(task),
        }
    }

    /// Signals the producer to stop.
    ///
    /// The producer exits at its next cancellation check, without waiting for
    /// a reader, and every reader observes end of stream.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Returns `true` once the producer task has terminated.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Waits for the producer task to terminate.
    ///
    /// A repeating stream only terminates after [`cancel`](Self::cancel), so
    /// cancel before joining one.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if the producer panicked or its runtime shut
    /// down first.
    pub async fn join(mut self) -> Result<(), JoinError> {
        match self.task.take() {
            Some(task) => task.await,
            None => Ok(()),
        }
    }

    /// Cancels the producer and waits for it to terminate.
    ///
    /// # Errors
    ///
    /// Same as [`Self::join`].
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.cancel();
        self.join().await
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        if self.task.as_ref().is_some_and(|task| !task.is_finished()) {
            #[cfg(feature = "tracing")]
            tracing::debug!("stream handle dropped, cancelling producer");
            self.token.cancel();
        }
    }
}
