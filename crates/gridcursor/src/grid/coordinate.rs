use core::fmt;

/// A single cell of the grid.
///
/// Components are zero-based and bounded by the grid's [`Dimensions`]. Planar
/// grids have a depth of one, so their coordinates always carry `z == 0`.
///
/// Ordering is lexicographic over `(z, y, x)`, which matches the order in
/// which an [`Order::Ascending`] sequence visits cells.
///
/// [`Dimensions`]: crate::grid::Dimensions
/// [`Order::Ascending`]: crate::grid::Order::Ascending
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub z: u32,
}

impl Coordinate {
    /// Creates a coordinate on the `z == 0` plane.
    pub const fn planar(x: u32, y: u32) -> Self {
        Self { x, y, z: 0 }
    }

    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// The `(x, y)` pair, dropping depth.
    pub const fn xy(self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub const fn xyz(self) -> (u32, u32, u32) {
        (self.x, self.y, self.z)
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.z, self.y, self.x).cmp(&(other.z, other.y, other.x))
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Self::planar(x, y)
    }
}

impl From<(u32, u32, u32)> for Coordinate {
    fn from((x, y, z): (u32, u32, u32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_ascending_visit_order() {
        let a = Coordinate::planar(1, 0);
        let b = Coordinate::planar(0, 1);
        let c = Coordinate::new(0, 0, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn planar_tuple_conversion_defaults_depth() {
        let c = Coordinate::from((3, 4));
        assert_eq!(c.xyz(), (3, 4, 0));
        assert_eq!(c.to_string(), "(3, 4, 0)");
    }
}
