use crate::grid::Coordinate;

/// The outcome of pulling from a [`CoordinateCursor`].
///
/// - [`CursorStatus::Ready`] carries the coordinate assigned to this call.
///   No other call, on any thread, receives the same sequence slot.
/// - [`CursorStatus::Exhausted`] means every coordinate has been handed out.
///   It is terminal: every later call is exhausted as well. Repeating cursors
///   never return it.
///
/// [`CoordinateCursor`]: crate::cursor::CoordinateCursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorStatus {
    /// A coordinate was assigned to this call.
    Ready {
        /// The assigned coordinate.
        coordinate: Coordinate,
    },
    /// Nothing is left to hand out.
    Exhausted,
}

impl CursorStatus {
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// The assigned coordinate, or `None` once exhausted.
    pub const fn ready(self) -> Option<Coordinate> {
        match self {
            Self::Ready { coordinate } => Some(coordinate),
            Self::Exhausted => None,
        }
    }

    /// Splits the status into a `(coordinate, exhausted)` pair.
    ///
    /// When `exhausted` is `true` the coordinate is [`Coordinate::default`]
    /// and carries no meaning; discard it.
    pub fn into_parts(self) -> (Coordinate, bool) {
        match self {
            Self::Ready { coordinate } => (coordinate, false),
            Self::Exhausted => (Coordinate::default(), true),
        }
    }
}

impl From<CursorStatus> for Option<Coordinate> {
    fn from(status: CursorStatus) -> Self {
        status.ready()
    }
}
