use std::collections::BinaryHeap;

use geo_traits::{CoordTrait, Dimensions};
use tinyvec::TinyVec;

use crate::error::{KdIndexError, Result};
use crate::kdtree::distance::{distance_squared, Candidate, Neighbor};
use crate::kdtree::node::NodeId;
use crate::kdtree::KDTree;
use crate::r#type::IndexableNum;

impl<N: IndexableNum, const D: usize> KDTree<N, D> {
    /// Search the index for points within a given radius of `query`.
    ///
    /// The boundary is inclusive: a point exactly `radius` away is returned. Results are in
    /// traversal order; use [`within_sorted`][Self::within_sorted] to get them by distance. A
    /// negative or NaN radius matches nothing.
    ///
    /// ```
    /// use kd_index::kdtree::KDTree;
    ///
    /// let mut tree = KDTree::<i32, 2>::new();
    /// tree.build(&[[0, 0], [3, 4], [10, 10]]);
    ///
    /// let mut found: Vec<[i32; 2]> = tree.within(&[0, 0], 5.).iter().map(|n| n.point).collect();
    /// found.sort();
    /// assert_eq!(found, vec![[0, 0], [3, 4]]);
    /// ```
    pub fn within(&self, query: &[N; D], radius: f64) -> Vec<Neighbor<N, D>> {
        let mut result = vec![];
        let Some(root) = self.root else {
            return result;
        };
        if radius.is_nan() || radius < 0. {
            return result;
        }
        let r2 = radius * radius;

        // Use TinyVec to avoid heap allocations
        let mut stack: TinyVec<[NodeId; 33]> = TinyVec::new();
        stack.push(root);

        while let Some(id) = stack.pop() {
            let node = self.node(id);

            let dist = distance_squared(query, &node.point);
            if dist <= r2 {
                result.push(Neighbor {
                    point: node.point,
                    distance_squared: dist,
                });
            }

            let dx = node.plane_offset(query);
            let (near, far) = if dx <= 0. {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };

            // Note: these are pushed in backwards order to what gets popped
            if dx * dx <= r2 {
                if let Some(far) = far {
                    stack.push(far);
                }
            }
            if let Some(near) = near {
                stack.push(near);
            }
        }

        result
    }

    /// Same as [`within`][Self::within], ordered by ascending distance.
    pub fn within_sorted(&self, query: &[N; D], radius: f64) -> Vec<Neighbor<N, D>> {
        let mut result = self.within(query, radius);
        result.sort_by(|a, b| a.distance_squared.total_cmp(&b.distance_squared));
        result
    }

    /// Same as [`within`][Self::within], returned as two parallel collections: the points and
    /// their squared distances.
    pub fn within_split(&self, query: &[N; D], radius: f64) -> (Vec<[N; D]>, Vec<f64>) {
        self.within(query, radius)
            .into_iter()
            .map(|n| (n.point, n.distance_squared))
            .unzip()
    }

    /// Search the index for points within a given radius of a coordinate.
    ///
    /// Fails if the coordinate does not have exactly `D` dimensions. Every stored dimension is
    /// indexed the same way, so an `m` value counts as the third axis of an `Xym` coordinate.
    pub fn within_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        radius: f64,
    ) -> Result<Vec<Neighbor<N, D>>> {
        let query = coord_to_point(coord)?;
        Ok(self.within(&query, radius))
    }

    /// Find the `k` points closest to `query`, nearest first.
    ///
    /// Returns `min(k, self.len())` results. Points at equal distance may come back in any order
    /// relative to each other.
    ///
    /// ```
    /// use kd_index::kdtree::KDTree;
    ///
    /// let tree: KDTree<f64, 3> = [[0., 0., 0.], [1., 0., 0.], [0., 2., 0.], [5., 5., 5.]]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let nearest = tree.neighbors(&[0., 0., 0.], 2);
    /// assert_eq!(nearest[0].point, [0., 0., 0.]);
    /// assert_eq!(nearest[1].point, [1., 0., 0.]);
    /// assert_eq!(nearest[1].distance_squared, 1.);
    /// ```
    pub fn neighbors(&self, query: &[N; D], k: usize) -> Vec<Neighbor<N, D>> {
        let Some(root) = self.root else {
            return vec![];
        };
        if k == 0 {
            return vec![];
        }

        // Max-heap holding the best `k` candidates so far, worst on top.
        let mut heap: BinaryHeap<Candidate<N, D>> = BinaryHeap::with_capacity(k.min(self.len()));

        // Each entry carries the squared distance from the query to the parent's splitting plane
        // if it is the far child, or `None` if it is the near child and must always be visited.
        let mut stack: TinyVec<[(NodeId, Option<f64>); 33]> = TinyVec::new();
        stack.push((root, None));

        while let Some((id, plane_dist)) = stack.pop() {
            if let Some(plane_dist) = plane_dist {
                if !could_improve(&heap, k, plane_dist) {
                    continue;
                }
            }

            let node = self.node(id);
            let candidate = Candidate(Neighbor {
                point: node.point,
                distance_squared: distance_squared(query, &node.point),
            });
            if heap.len() < k {
                heap.push(candidate);
            } else if let Some(mut worst) = heap.peek_mut() {
                if candidate.0.distance_squared < worst.0.distance_squared {
                    *worst = candidate;
                }
            }

            let dx = node.plane_offset(query);
            let (near, far) = if dx < 0. {
                (node.left, node.right)
            } else {
                (node.right, node.left)
            };

            // The far entry sits under the whole near subtree, so it is checked against the heap
            // only once the near side has been exhausted.
            if let Some(far) = far {
                stack.push((far, Some(dx * dx)));
            }
            if let Some(near) = near {
                stack.push((near, None));
            }
        }

        heap.into_sorted_vec().into_iter().map(|c| c.0).collect()
    }

    /// Find the `k` points closest to a coordinate, nearest first.
    ///
    /// Fails if the coordinate does not have exactly `D` dimensions.
    pub fn neighbors_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        k: usize,
    ) -> Result<Vec<Neighbor<N, D>>> {
        let query = coord_to_point(coord)?;
        Ok(self.neighbors(&query, k))
    }

    /// The single point closest to `query`, or `None` if the tree is empty.
    pub fn nearest(&self, query: &[N; D]) -> Option<Neighbor<N, D>> {
        self.neighbors(query, 1).into_iter().next()
    }
}

/// Whether a subtree whose splitting plane lies `plane_dist` (squared) away could still hold a
/// point closer than the current k-th best.
#[inline]
fn could_improve<N: IndexableNum, const D: usize>(
    heap: &BinaryHeap<Candidate<N, D>>,
    k: usize,
    plane_dist: f64,
) -> bool {
    if heap.len() < k {
        return true;
    }
    heap.peek()
        .is_some_and(|worst| plane_dist < worst.0.distance_squared)
}

fn coord_to_point<N: IndexableNum, const D: usize>(
    coord: &impl CoordTrait<T = N>,
) -> Result<[N; D]> {
    let actual = match coord.dim() {
        Dimensions::Xy => 2,
        Dimensions::Xyz | Dimensions::Xym => 3,
        Dimensions::Xyzm => 4,
        Dimensions::Unknown(n) => n,
    };
    if actual != D {
        return Err(KdIndexError::DimensionMismatch {
            expected: D,
            actual,
        });
    }

    let mut point = [N::zero(); D];
    for (axis, value) in point.iter_mut().enumerate() {
        *value = coord.nth_or_panic(axis);
    }
    Ok(point)
}
