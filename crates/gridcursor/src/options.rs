use rand::Rng;

#[cfg(feature = "atomic")]
use crate::cursor::AtomicCursor;
#[cfg(feature = "lock")]
use crate::cursor::LockCursor;
use crate::{
    cursor::{BasicCursor, CoordinateCursor},
    error::Result,
    grid::{Dimensions, GridSequence, Order},
};

/// Everything needed to build a cursor or stream.
///
/// Every constructor validates first and builds nothing on failure.
///
/// # Example
/// ```
/// use gridcursor::{
///     cursor::CoordinateCursor,
///     grid::{Coordinate, Order},
///     options::GridOptions,
/// };
///
/// let cursor = GridOptions::new(2, 2)
///     .with_order(Order::Descending)
///     .atomic_cursor()
///     .unwrap();
///
/// assert_eq!(cursor.next_coordinate().ready(), Some(Coordinate::planar(1, 1)));
/// assert_eq!(cursor.remaining(), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    pub width: u32,
    pub height: u32,
    /// `None` builds a planar grid.
    #[cfg_attr(feature = "serde", serde(default))]
    pub depth: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub order: Order,
    /// Cycle through the sequence forever instead of exhausting.
    #[cfg_attr(feature = "serde", serde(default))]
    pub repeat: bool,
}

impl GridOptions {
    /// A planar, ascending, non-repeating grid of `width x height`.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: None,
            order: Order::Ascending,
            repeat: false,
        }
    }

    #[must_use]
    pub const fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub const fn dimensions(&self) -> Dimensions {
        match self.depth {
            Some(depth) => Dimensions::volumetric(self.width, self.height, depth),
            None => Dimensions::planar(self.width, self.height),
        }
    }

    /// Checks the dimensions without building anything.
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    pub fn validate(&self) -> Result<()> {
        self.dimensions().validate()
    }

    /// Builds the coordinate sequence.
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    pub fn build_sequence(&self) -> Result<GridSequence> {
        GridSequence::new(self.dimensions(), self.order)
    }

    /// Builds the coordinate sequence, shuffling [`Order::Random`] with `rng`.
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    pub fn build_sequence_with_rng<R>(&self, rng: &mut R) -> Result<GridSequence>
    where
        R: Rng + ?Sized,
    {
        GridSequence::with_rng(self.dimensions(), self.order, rng)
    }

    /// Builds any cursor strategy.
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    pub fn cursor<C: CoordinateCursor>(&self) -> Result<C> {
        let sequence = self.build_sequence()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            cursor = core::any::type_name::<C>(),
            len = sequence.len(),
            order = %self.order,
            repeat = self.repeat,
            "built cursor"
        );
        Ok(C::new(sequence, self.repeat))
    }

    /// Builds a single-owner [`BasicCursor`].
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    pub fn basic_cursor(&self) -> Result<BasicCursor> {
        self.cursor()
    }

    /// Builds a mutex-guarded [`LockCursor`].
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    #[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
    #[cfg(feature = "lock")]
    pub fn lock_cursor(&self) -> Result<LockCursor> {
        self.cursor()
    }

    /// Builds a lock-free [`AtomicCursor`].
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    #[cfg_attr(docsrs, doc(cfg(feature = "atomic")))]
    #[cfg(feature = "atomic")]
    pub fn atomic_cursor(&self) -> Result<AtomicCursor> {
        self.cursor()
    }

    /// Spawns a [`CoordinateStream`] fed by a [`BasicCursor`] on the current
    /// tokio runtime.
    ///
    /// Nothing is spawned if validation fails.
    ///
    /// # Errors
    ///
    /// See [`Dimensions::validate`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    ///
    /// [`CoordinateStream`]: crate::stream::CoordinateStream
    #[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
    #[cfg(feature = "async-tokio")]
    pub fn spawn_stream(
        &self,
    ) -> Result<(crate::stream::CoordinateStream, crate::stream::StreamHandle)> {
        let cursor = self.basic_cursor()?;
        Ok(crate::stream::CoordinateStream::spawn(cursor))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        error::{Axis, Error},
        grid::Coordinate,
    };

    #[test]
    fn defaults_are_planar_ascending_once() {
        let opts = GridOptions::new(3, 2);
        assert_eq!(opts.dimensions(), Dimensions::planar(3, 2));
        assert_eq!(opts.order, Order::Ascending);
        assert!(!opts.repeat);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            GridOptions::new(0, 1).basic_cursor().unwrap_err(),
            Error::InvalidDimension {
                axis: Axis::X,
                value: 0
            }
        );
        assert_eq!(
            GridOptions::new(1, 0).validate(),
            Err(Error::InvalidDimension {
                axis: Axis::Y,
                value: 0
            })
        );
        assert_eq!(
            GridOptions::new(1, 1).with_depth(0).build_sequence(),
            Err(Error::InvalidDimension {
                axis: Axis::Z,
                value: 0
            })
        );
    }

    #[test]
    fn oversized_grid_builds_nothing() {
        let opts = GridOptions::new(u32::MAX, u32::MAX);
        assert!(matches!(
            opts.basic_cursor(),
            Err(Error::GridTooLarge { .. })
        ));
        assert!(matches!(
            opts.build_sequence(),
            Err(Error::GridTooLarge { .. })
        ));
    }

    #[test]
    fn depth_produces_volume() {
        let cursor = GridOptions::new(2, 2)
            .with_depth(3)
            .with_order(Order::Descending)
            .basic_cursor()
            .unwrap();
        assert_eq!(cursor.sequence().len(), 12);
        assert_eq!(
            cursor.next_coordinate().ready(),
            Some(Coordinate::new(1, 1, 2))
        );
    }

    #[test]
    fn repeat_is_forwarded() {
        let cursor = GridOptions::new(1, 1)
            .with_repeat(true)
            .basic_cursor()
            .unwrap();
        assert!(cursor.is_repeating());
        for _ in 0..10 {
            assert!(!cursor.next_coordinate().is_exhausted());
        }
    }

    #[test]
    fn seeded_sequences_match() {
        let opts = GridOptions::new(8, 8).with_order(Order::Random);
        let a = opts
            .build_sequence_with_rng(&mut StdRng::seed_from_u64(42))
            .unwrap();
        let b = opts
            .build_sequence_with_rng(&mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(a, b);
    }

    #[cfg(all(feature = "lock", feature = "atomic"))]
    #[test]
    fn strategies_agree() {
        let opts = GridOptions::new(4, 3).with_depth(2).with_order(Order::Descending);
        let lock: Vec<_> = opts.lock_cursor().unwrap().iter().collect();
        let atomic: Vec<_> = opts.atomic_cursor().unwrap().iter().collect();
        let basic: Vec<_> = opts.basic_cursor().unwrap().iter().collect();
        assert_eq!(lock, atomic);
        assert_eq!(lock, basic);
        assert_eq!(lock.len(), 24);
    }

    #[cfg(feature = "async-tokio")]
    #[tokio::test]
    async fn invalid_options_spawn_nothing() {
        assert!(GridOptions::new(0, 0).spawn_stream().is_err());

        let (stream, handle) = GridOptions::new(2, 1).spawn_stream().unwrap();
        assert_eq!(stream.recv().await, Some(Coordinate::planar(0, 0)));
        assert_eq!(stream.recv().await, Some(Coordinate::planar(1, 0)));
        assert_eq!(stream.recv().await, None);
        handle.join().await.unwrap();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_with_defaults() {
        let opts: GridOptions =
            serde_json::from_str(r#"{ "width": 3, "height": 4, "order": "desc" }"#).unwrap();
        assert_eq!(
            opts,
            GridOptions::new(3, 4).with_order(Order::Descending)
        );

        let err = serde_json::from_str::<GridOptions>(
            r#"{ "width": 3, "height": 4, "order": "spiral" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("spiral"));
    }
}
