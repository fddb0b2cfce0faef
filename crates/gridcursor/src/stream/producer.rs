use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    cursor::{CoordinateCursor, CursorStatus},
    grid::Coordinate,
};

/// Background task feeding a coordinate stream.
///
/// Runs until one of:
/// - the cursor is exhausted (never, for a repeating cursor),
/// - `token` is cancelled,
/// - every reader has been dropped.
///
/// A coordinate is only claimed from the cursor once the channel has room for
/// it, so the wait for a reader is the single suspension point. The wait is
/// raced against cancellation and the token is checked again before every
/// claim. Returning drops `tx`, which closes the stream.
pub(crate) async fn produce<C>(cursor: C, tx: mpsc::Sender<Coordinate>, token: CancellationToken)
where
    C: CoordinateCursor,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(
        len = cursor.sequence().len(),
        order = %cursor.sequence().order(),
        repeat = cursor.is_repeating(),
        "coordinate producer started"
    );

    loop {
        let permit = tokio::select! {
            biased;
            () = token.cancelled() => None,
            permit = tx.reserve() => permit.ok(),
        };

        if token.is_cancelled() {
            #[cfg(feature = "tracing")]
            tracing::debug!(served = cursor.served(), "coordinate producer cancelled");
            break;
        }

        // `reserve` only fails once the receiver is gone.
        let Some(permit) = permit else {
            #[cfg(feature = "tracing")]
            tracing::debug!("all coordinate readers dropped");
            break;
        };

        let CursorStatus::Ready { coordinate } = cursor.next_coordinate() else {
            break;
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(%coordinate, "delivering");
        permit.send(coordinate);

        // Close right behind the last coordinate instead of waiting for room
        // to discover exhaustion.
        if cursor.remaining() == Some(0) {
            #[cfg(feature = "tracing")]
            tracing::debug!(served = cursor.served(), "coordinate producer exhausted");
            break;
        }
    }
}
