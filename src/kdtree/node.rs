use crate::r#type::IndexableNum;

/// Position of a [`Node`] inside its tree's node arena.
pub(crate) type NodeId = usize;

/// A single slot of the k-d tree.
///
/// Every node holds the median point of the sub-range it was built from. Points in the `left`
/// subtree have `point[axis]` less than or equal to this node's, points in the `right` subtree
/// greater than or equal. Equal values may land on either side.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node<N: IndexableNum, const D: usize> {
    pub(crate) point: [N; D],

    /// The coordinate this node splits on, in `0..D`.
    pub(crate) axis: usize,

    /// Distance from the root. Only used for diagnostics.
    pub(crate) level: usize,

    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<N: IndexableNum, const D: usize> Node<N, D> {
    pub(crate) fn new(point: [N; D], axis: usize, level: usize) -> Self {
        debug_assert!(axis < D);
        Self {
            point,
            axis,
            level,
            left: None,
            right: None,
        }
    }

    /// Signed offset of `query` from this node's splitting plane.
    #[inline]
    pub(crate) fn plane_offset(&self, query: &[N; D]) -> f64 {
        query[self.axis].as_f64() - self.point[self.axis].as_f64()
    }
}
