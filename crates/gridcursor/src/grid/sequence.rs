use alloc::sync::Arc;
use core::ops::Index;

use rand::{Rng, seq::SliceRandom};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    grid::{Coordinate, Dimensions, Order},
};

/// Every coordinate of a grid, arranged once by an [`Order`].
///
/// The coordinates live behind an [`Arc`], so cloning a sequence is cheap and
/// every clone observes the same arrangement. A sequence is never empty and
/// never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridSequence {
    coordinates: Arc<[Coordinate]>,
    dimensions: Dimensions,
    order: Order,
}

impl GridSequence {
    /// Builds the sequence for `dimensions` arranged by `order`.
    ///
    /// [`Order::Random`] shuffles with the thread-local RNG. Use
    /// [`Self::with_rng`] to supply a seeded generator instead.
    ///
    /// # Errors
    ///
    /// Returns the error from [`Dimensions::validate`].
    ///
    /// # Example
    /// ```
    /// use gridcursor::grid::{Coordinate, Dimensions, GridSequence, Order};
    ///
    /// let seq = GridSequence::new(Dimensions::planar(2, 2), Order::Descending).unwrap();
    /// assert_eq!(seq[0], Coordinate::planar(1, 1));
    /// assert_eq!(seq.len(), 4);
    /// ```
    pub fn new(dimensions: Dimensions, order: Order) -> Result<Self> {
        Self::with_rng(dimensions, order, &mut rand::rng())
    }

    /// Like [`Self::new`], shuffling [`Order::Random`] with `rng`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`Dimensions::validate`].
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(rng)))]
    pub fn with_rng<R>(dimensions: Dimensions, order: Order, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let len = dimensions.len()?;
        let mut coordinates = ascending(dimensions, len)?;

        match order {
            Order::Ascending => {}
            Order::Descending => coordinates.reverse(),
            Order::Random => coordinates.shuffle(rng),
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(len, "sequenced grid");

        Ok(Self {
            coordinates: coordinates.into(),
            dimensions,
            order,
        })
    }

    /// Number of coordinates, always `>= 1`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.coordinates.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, Coordinate>> {
        self.coordinates.iter().copied()
    }

    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub const fn order(&self) -> Order {
        self.order
    }
}

impl Index<usize> for GridSequence {
    type Output = Coordinate;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl<'a> IntoIterator for &'a GridSequence {
    type Item = Coordinate;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, Coordinate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major enumeration with `x` fastest and `z` slowest.
///
/// The buffer is reserved fallibly: a grid whose coordinates do not fit in
/// memory is [`Error::GridTooLarge`] instead of an allocation panic.
fn ascending(dimensions: Dimensions, len: usize) -> Result<Vec<Coordinate>> {
    let mut coordinates = Vec::new();
    coordinates
        .try_reserve_exact(len)
        .map_err(|_| Error::GridTooLarge {
            width: dimensions.width,
            height: dimensions.height,
            depth: dimensions.depth,
        })?;
    for z in 0..dimensions.depth {
        for y in 0..dimensions.height {
            for x in 0..dimensions.width {
                coordinates.push(Coordinate::new(x, y, z));
            }
        }
    }
    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::error::{Axis, Error};

    fn coords(seq: &GridSequence) -> Vec<(u32, u32, u32)> {
        seq.iter().map(Coordinate::xyz).collect()
    }

    #[test]
    fn ascending_two_by_two() {
        let seq = GridSequence::new(Dimensions::planar(2, 2), Order::Ascending).unwrap();
        assert_eq!(
            coords(&seq),
            vec![(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 0)]
        );
    }

    #[test]
    fn descending_two_by_two() {
        let seq = GridSequence::new(Dimensions::planar(2, 2), Order::Descending).unwrap();
        assert_eq!(
            coords(&seq),
            vec![(1, 1, 0), (0, 1, 0), (1, 0, 0), (0, 0, 0)]
        );
    }

    #[test]
    fn ascending_volume_varies_depth_slowest() {
        let seq = GridSequence::new(Dimensions::volumetric(2, 2, 2), Order::Ascending).unwrap();
        let all = coords(&seq);
        assert_eq!(all.len(), 8);
        assert!(all[..4].iter().all(|&(_, _, z)| z == 0));
        assert!(all[4..].iter().all(|&(_, _, z)| z == 1));
        assert_eq!(all[5], (1, 0, 1));
        assert!(seq.iter().zip(seq.iter().skip(1)).all(|(a, b)| a < b));
    }

    #[test]
    fn descending_is_reverse_of_ascending() {
        for dims in [
            Dimensions::planar(1, 1),
            Dimensions::planar(7, 3),
            Dimensions::volumetric(3, 4, 5),
        ] {
            let asc = GridSequence::new(dims, Order::Ascending).unwrap();
            let desc = GridSequence::new(dims, Order::Descending).unwrap();
            let mut reversed = coords(&asc);
            reversed.reverse();
            assert_eq!(coords(&desc), reversed);
        }
    }

    #[test]
    fn random_is_a_permutation_of_ascending() {
        let dims = Dimensions::volumetric(9, 7, 3);
        let asc = GridSequence::new(dims, Order::Ascending).unwrap();
        let random = GridSequence::new(dims, Order::Random).unwrap();

        assert_eq!(random.len(), asc.len());
        let expected: HashSet<_> = asc.iter().collect();
        let actual: HashSet<_> = random.iter().collect();
        assert_eq!(actual.len(), random.len(), "random order repeated a cell");
        assert_eq!(actual, expected);
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let dims = Dimensions::planar(16, 16);
        let a = GridSequence::with_rng(dims, Order::Random, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = GridSequence::with_rng(dims, Order::Random, &mut StdRng::seed_from_u64(7)).unwrap();
        let asc = GridSequence::new(dims, Order::Ascending).unwrap();
        assert_eq!(a, b);
        assert_ne!(coords(&a), coords(&asc));
    }

    #[test]
    fn every_coordinate_is_in_bounds() {
        let dims = Dimensions::volumetric(5, 2, 3);
        let seq = GridSequence::new(dims, Order::Random).unwrap();
        assert!(seq.iter().all(|c| dims.contains(c)));
    }

    #[test]
    fn invalid_dimensions_build_nothing() {
        assert_eq!(
            GridSequence::new(Dimensions::planar(4, 0), Order::Ascending),
            Err(Error::InvalidDimension {
                axis: Axis::Y,
                value: 0
            })
        );
    }

    #[test]
    fn unallocatable_grid_is_too_large() {
        let dims = Dimensions::planar(u32::MAX, u32::MAX);
        for order in Order::ALL {
            assert_eq!(
                GridSequence::new(dims, order),
                Err(Error::GridTooLarge {
                    width: u32::MAX,
                    height: u32::MAX,
                    depth: 1,
                })
            );
        }
    }

    #[test]
    fn clones_share_storage() {
        let seq = GridSequence::new(Dimensions::planar(4, 4), Order::Random).unwrap();
        let copy = seq.clone();
        assert!(core::ptr::eq(seq.as_slice(), copy.as_slice()));
    }
}
