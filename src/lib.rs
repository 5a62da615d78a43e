#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
mod r#type;
pub mod util;

pub use error::{KdIndexError, Result};
pub use kdtree::{KDTree, KDTreeBuilder, Neighbor};
pub use r#type::IndexableNum;
