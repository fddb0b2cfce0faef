use core::{fmt, str::FromStr};

use crate::error::Error;

/// How the full coordinate sequence is arranged.
///
/// The order is applied once, when the [`GridSequence`] is built, and never
/// changes for the lifetime of the cursor that owns it.
///
/// [`GridSequence`]: crate::grid::GridSequence
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Order {
    /// Row-major: `x` varies fastest, then `y`, then `z`.
    #[default]
    Ascending,
    /// The exact reverse of [`Order::Ascending`].
    Descending,
    /// A uniformly random permutation of [`Order::Ascending`].
    Random,
}

impl Order {
    pub const ALL: [Self; 3] = [Self::Ascending, Self::Descending, Self::Random];

    /// Human-readable name, suitable for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending",
            Self::Descending => "Descending",
            Self::Random => "Random",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = Error;

    /// Parses an order name, case-insensitively. The short forms `asc`,
    /// `desc` and `rand` are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(Self::Ascending),
            "descending" | "desc" => Ok(Self::Descending),
            "random" | "rand" => Ok(Self::Random),
            _ => Err(Error::invalid_order(s)),
        }
    }
}

impl TryFrom<&str> for Order {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Order {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Order> for String {
    fn from(order: Order) -> Self {
        order.as_str().to_owned()
    }
}
