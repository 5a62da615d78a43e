//! The squared Euclidean metric shared by every query.

use std::cmp::Ordering;

use crate::r#type::IndexableNum;

/// Squared Euclidean distance between two points.
///
/// The sum is accumulated in `f64`, so the result is exact for all integer coordinate types this
/// crate accepts. Take the square root yourself if you need the true distance.
///
/// ```
/// use kd_index::kdtree::distance_squared;
///
/// assert_eq!(distance_squared(&[0u8, 0, 0], &[1, 2, 2]), 9.);
/// ```
#[inline]
pub fn distance_squared<N: IndexableNum, const D: usize>(a: &[N; D], b: &[N; D]) -> f64 {
    a.iter().zip(b.iter()).fold(0., |sum, (&a, &b)| {
        let d = a.as_f64() - b.as_f64();
        sum + d * d
    })
}

/// A point returned from a query, along with its squared distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<N: IndexableNum, const D: usize> {
    /// A copy of the stored point
    pub point: [N; D],
    /// Squared Euclidean distance from the query point
    pub distance_squared: f64,
}

impl<N: IndexableNum, const D: usize> Neighbor<N, D> {
    /// Euclidean distance from the query point.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// Heap entry for k-nearest-neighbor search, ordered by distance so that a [`BinaryHeap`] keeps
/// the current worst candidate on top.
///
/// [`BinaryHeap`]: std::collections::BinaryHeap
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<N: IndexableNum, const D: usize>(pub(crate) Neighbor<N, D>);

impl<N: IndexableNum, const D: usize> PartialEq for Candidate<N, D> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: IndexableNum, const D: usize> Eq for Candidate<N, D> {}

impl<N: IndexableNum, const D: usize> Ord for Candidate<N, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.distance_squared.total_cmp(&other.0.distance_squared)
    }
}

impl<N: IndexableNum, const D: usize> PartialOrd for Candidate<N, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
