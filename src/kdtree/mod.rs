//! An implementation of a static, exact K-D Tree over points of any fixed dimension.

#![warn(missing_docs)]

mod builder;
mod distance;
mod index;
mod node;
mod search;

pub use builder::KDTreeBuilder;
pub use distance::{distance_squared, Neighbor};
pub use index::KDTree;
