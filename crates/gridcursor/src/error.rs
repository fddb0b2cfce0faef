use core::fmt;

/// A result type defaulting to the crate-wide [`Error`].
///
/// Only construction can fail. Pulling a coordinate from a cursor, or reading
/// from a coordinate stream, never returns an error: exhaustion is a normal
/// terminal signal.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The grid axis a dimension belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// The fastest varying axis (`width`).
    X,
    /// The second axis (`height`).
    Y,
    /// The slowest varying axis (`depth`).
    Z,
}

impl Axis {
    /// The name of the dimension measured along this axis.
    pub const fn dimension_name(self) -> &'static str {
        match self {
            Self::X => "width",
            Self::Y => "height",
            Self::Z => "depth",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dimension_name())
    }
}

/// All error variants that `gridcursor` can emit.
///
/// Every variant is raised while validating construction parameters, before
/// anything is allocated or spawned. None of them is worth retrying with the
/// same input: the caller has to correct the parameters and construct again.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A grid dimension was smaller than one.
    #[error("minimum {axis} is 1, got {value}")]
    InvalidDimension {
        /// The offending axis.
        axis: Axis,
        /// The rejected value.
        value: u32,
    },

    /// The ordering mode name was not recognized.
    #[error("unknown order `{name}`, expected one of Ascending, Descending, Random")]
    InvalidOrder {
        /// The name as supplied by the caller.
        name: String,
    },

    /// The grid has more coordinates than can be addressed in memory.
    #[error("grid of {width}x{height}x{depth} coordinates is too large to sequence")]
    GridTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Requested depth.
        depth: u32,
    },
}

impl Error {
    pub(crate) fn invalid_order(name: impl Into<String>) -> Self {
        Self::InvalidOrder { name: name.into() }
    }
}
