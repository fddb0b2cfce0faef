//! The immutable side of a cursor: grid shape, ordering, and the sequence of
//! coordinates built from them.

mod coordinate;
mod dimensions;
mod order;
mod sequence;

pub use coordinate::*;
pub use dimensions::*;
pub use order::*;
pub use sequence::*;
