use std::cmp;

use crate::error::{KdIndexError, Result};
use crate::kdtree::node::{Node, NodeId};
use crate::kdtree::KDTree;
use crate::r#type::IndexableNum;

/// A builder to create a [`KDTree`] one point at a time.
///
/// ```
/// use kd_index::kdtree::KDTreeBuilder;
///
/// let mut builder = KDTreeBuilder::<f32, 2>::new(3);
/// builder.add([0., 0.]);
/// builder.add([1., 1.]);
/// builder.add_interleaved(&[2., 2.]).unwrap();
/// let tree = builder.finish();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct KDTreeBuilder<N: IndexableNum, const D: usize> {
    points: Vec<[N; D]>,
    num_items: usize,
}

impl<N: IndexableNum, const D: usize> KDTreeBuilder<N, D> {
    /// Create a new builder expecting exactly `num_items` points.
    pub fn new(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
            num_items,
        }
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: [N; D]) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Add points from a flat buffer of interleaved coordinates, `D` values per point.
    ///
    /// Returns the insertion index of the first added point.
    pub fn add_interleaved(&mut self, coords: &[N]) -> Result<usize> {
        let points = cast_points::<N, D>(coords)?;
        let index = self.points.len();
        self.points.extend_from_slice(points);
        Ok(index)
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(self) -> KDTree<N, D> {
        assert_eq!(
            self.points.len(),
            self.num_items,
            "Added {} items when expected {}.",
            self.points.len(),
            self.num_items
        );

        let mut tree = KDTree::new();
        tree.build_owned(self.points);
        tree
    }
}

/// Reinterpret a flat coordinate buffer as points without copying.
pub(crate) fn cast_points<N: IndexableNum, const D: usize>(coords: &[N]) -> Result<&[[N; D]]> {
    bytemuck::try_cast_slice(coords).map_err(|_| {
        KdIndexError::General(format!(
            "Buffer of {} elements is not a whole number of {}-dimensional points.",
            coords.len(),
            D
        ))
    })
}

/// Recursively build the subtree for `points`, appending its nodes to `nodes`.
///
/// The median (by count) of `points` along `axis` becomes the subtree root. Everything before it
/// goes left, everything after it goes right, and both halves cycle to the next axis.
pub(crate) fn build_subtree<N: IndexableNum, const D: usize>(
    nodes: &mut Vec<Node<N, D>>,
    points: &mut [[N; D]],
    axis: usize,
    level: usize,
) -> Option<NodeId> {
    if points.is_empty() {
        return None;
    }

    let m = points.len() / 2;
    if points.len() > 1 {
        select(points, m, 0, points.len() - 1, axis);
    }

    let id = nodes.len();
    nodes.push(Node::new(points[m], axis, level));

    let next_axis = (axis + 1) % D;
    let (lower, rest) = points.split_at_mut(m);
    let upper = &mut rest[1..];
    let left = build_subtree(nodes, lower, next_axis, level + 1);
    let right = build_subtree(nodes, upper, next_axis, level + 1);

    nodes[id].left = left;
    nodes[id].right = right;
    Some(id)
}

/// Custom Floyd-Rivest selection algorithm: reorder `points[left..=right]` so that the `k`-th
/// item sits at its sorted position on `axis`, with no item before it greater and no item after
/// it smaller.
///
/// `k` must be at least 1 whenever `left == 0`.
fn select<N: IndexableNum, const D: usize>(
    points: &mut [[N; D]],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: usize,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(points, k, new_left, new_right, axis);
        }

        let t = points[k][axis];
        let mut i = left;
        let mut j = right;

        points.swap(left, k);
        if points[right][axis] > t {
            points.swap(left, right);
        }

        while i < j {
            points.swap(i, j);
            i += 1;
            j -= 1;
            while points[i][axis] < t {
                i += 1;
            }
            while points[j][axis] > t {
                j -= 1;
            }
        }

        if points[left][axis] == t {
            points.swap(left, j);
        } else {
            j += 1;
            points.swap(j, right);
        }

        if j <= k {
            left = j + 1;
        }
        if k <= j {
            right = j - 1;
        }
    }
}
