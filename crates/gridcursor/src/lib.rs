#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod cursor;
pub mod error;
pub mod grid;
pub mod options;
#[cfg_attr(docsrs, doc(cfg(feature = "async-tokio")))]
#[cfg(feature = "async-tokio")]
pub mod stream;

pub use crate::error::{Error, Result};
pub use crate::options::GridOptions;
