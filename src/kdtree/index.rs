use crate::error::{KdIndexError, Result};
use crate::kdtree::builder::{build_subtree, cast_points};
use crate::kdtree::node::{Node, NodeId};
use crate::r#type::IndexableNum;

/// A static k-d tree over `D`-dimensional points with coordinates of type `N`.
///
/// The tree is built once from a set of points (see [`KDTree::build`] or
/// [`KDTreeBuilder`][crate::kdtree::KDTreeBuilder]) and then answers any number of read-only
/// radius and k-nearest-neighbor queries. Queries return copies of the stored points.
///
/// Nodes are kept in a flat arena and refer to their children by position. Rebuilding replaces
/// the arena wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum, const D: usize> {
    pub(crate) nodes: Vec<Node<N, D>>,
    pub(crate) root: Option<NodeId>,
    depth: usize,
}

impl<N: IndexableNum, const D: usize> KDTree<N, D> {
    const NONZERO_DIM: () = assert!(D > 0, "A KDTree needs at least one dimension.");

    /// Create an empty tree. All queries against it return empty results.
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NONZERO_DIM;
        Self {
            nodes: Vec::new(),
            root: None,
            depth: 0,
        }
    }

    /// Build the tree from `points`, replacing any previously built tree.
    ///
    /// The input is copied into working storage, so the caller's slice is left untouched. Returns
    /// whether the tree now has a root, which is `false` only when `points` is empty.
    pub fn build(&mut self, points: &[[N; D]]) -> bool {
        self.build_owned(points.to_vec())
    }

    /// Build the tree from a flat buffer holding `count` interleaved points.
    ///
    /// Elements past `count * D` are ignored. A buffer holding fewer than `count * D` elements is
    /// rejected and the current tree is left as it was.
    pub fn build_interleaved(&mut self, coords: &[N], count: usize) -> Result<bool> {
        let expected = count.checked_mul(D).ok_or_else(|| {
            KdIndexError::General(format!("{} points of dimension {} overflow usize.", count, D))
        })?;
        if coords.len() < expected {
            tracing::warn!(
                expected,
                actual = coords.len(),
                "rejecting short coordinate buffer"
            );
            return Err(KdIndexError::BufferTooShort {
                expected,
                actual: coords.len(),
            });
        }

        let points = cast_points::<N, D>(&coords[..expected])?;
        Ok(self.build(points))
    }

    pub(crate) fn build_owned(&mut self, mut points: Vec<[N; D]>) -> bool {
        let mut nodes = Vec::with_capacity(points.len());
        let root = build_subtree(&mut nodes, &mut points, 0, 0);

        self.depth = nodes.iter().map(|node| node.level + 1).max().unwrap_or(0);
        self.nodes = nodes;
        self.root = root;

        tracing::debug!(num_items = self.nodes.len(), depth = self.depth, "built k-d tree");
        self.root.is_some()
    }

    /// The number of points stored in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no points, either because it was never built or because
    /// it was built from an empty set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree. A single point has depth 1; an empty tree has depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<N, D> {
        &self.nodes[id]
    }
}

impl<N: IndexableNum, const D: usize> Default for KDTree<N, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: IndexableNum, const D: usize> FromIterator<[N; D]> for KDTree<N, D> {
    fn from_iter<I: IntoIterator<Item = [N; D]>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.build_owned(iter.into_iter().collect());
        tree
    }
}
