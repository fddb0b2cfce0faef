use alloc::sync::Arc;

use futures::Stream;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::grid::Coordinate;

/// The read side of a coordinate stream.
///
/// Clones share one underlying channel, so any number of readers may drain
/// the stream concurrently and each coordinate reaches exactly one of them.
///
/// Once the producer finishes or the stream is cancelled, every pending and
/// future [`recv`](Self::recv) returns `None`.
#[derive(Clone, Debug)]
pub struct CoordinateStream {
    rx: Arc<Mutex<mpsc::Receiver<Coordinate>>>,
    token: CancellationToken,
}

impl CoordinateStream {
    pub(crate) fn new(rx: mpsc::Receiver<Coordinate>, token: CancellationToken) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
            token,
        }
    }

    /// Receives the next coordinate, or `None` at end of stream.
    ///
    /// Cancellation wins over any coordinate still buffered in the channel.
    pub async fn recv(&self) -> Option<Coordinate> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            coordinate = async { self.rx.lock().await.recv().await } => coordinate,
        }
    }

    /// Returns `true` once the stream has been cancelled.
    ///
    /// A stream that ended because its cursor was exhausted is not cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Adapts this reader into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Coordinate> + Send + 'static {
        futures::stream::unfold(self, |reader| async move {
            let coordinate = reader.recv().await?;
            Some((coordinate, reader))
        })
    }
}
