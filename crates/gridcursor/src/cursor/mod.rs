//! Pull-style cursors over a [`GridSequence`].
//!
//! [`GridSequence`]: crate::grid::GridSequence

#[cfg(feature = "atomic")]
mod atomic;
mod basic;
mod interface;
#[cfg(feature = "lock")]
mod lock;
#[cfg(feature = "lock")]
mod mutex;
mod status;

#[cfg_attr(docsrs, doc(cfg(feature = "atomic")))]
#[cfg(feature = "atomic")]
pub use atomic::*;
pub use basic::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
#[cfg(feature = "lock")]
pub use lock::*;
#[cfg(feature = "lock")]
pub(crate) use mutex::*;
pub use status::*;
