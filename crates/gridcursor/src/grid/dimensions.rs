use crate::{
    error::{Axis, Error, Result},
    grid::Coordinate,
};

/// The extent of a grid along each axis.
///
/// A planar grid is a volumetric grid with a depth of one; both share this
/// type so every cursor handles 2D and 3D grids alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_depth"))]
    pub depth: u32,
}

#[cfg(feature = "serde")]
const fn default_depth() -> u32 {
    1
}

impl Dimensions {
    /// A `width x height` grid.
    pub const fn planar(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: 1,
        }
    }

    /// A `width x height x depth` grid.
    pub const fn volumetric(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub const fn is_planar(&self) -> bool {
        self.depth == 1
    }

    /// Checks that every dimension is at least one and that the grid can be
    /// held in memory.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimension`] naming the first axis below one.
    /// - [`Error::GridTooLarge`] when the coordinate count overflows `usize`.
    pub fn validate(&self) -> Result<()> {
        self.len().map(|_| ())
    }

    /// Total number of coordinates in the grid.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`].
    pub fn len(&self) -> Result<usize> {
        for (axis, value) in [
            (Axis::X, self.width),
            (Axis::Y, self.height),
            (Axis::Z, self.depth),
        ] {
            if value < 1 {
                return Err(Error::InvalidDimension { axis, value });
            }
        }

        usize::try_from(self.width)
            .ok()
            .zip(usize::try_from(self.height).ok())
            .zip(usize::try_from(self.depth).ok())
            .and_then(|((w, h), d)| w.checked_mul(h)?.checked_mul(d))
            .ok_or(Error::GridTooLarge {
                width: self.width,
                height: self.height,
                depth: self.depth,
            })
    }

    /// Returns `true` if every component of `coordinate` lies inside the grid.
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.width && coordinate.y < self.height && coordinate.z < self.depth
    }
}
