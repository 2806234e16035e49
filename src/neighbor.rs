//! Query results and the bounded heap used to collect them.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One query hit: a point id and its great-circle distance from the query, in kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Id of the point in its [`PointStore`][crate::store::PointStore].
    pub id: u32,
    /// Great-circle distance in kilometers.
    pub distance: f64,
}

impl Eq for Neighbor {}

impl Ord for Neighbor {
    // Closer first; exact ties go to the lower id so results are reproducible.
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the `k` best neighbors seen so far.
///
/// A max-heap on `(distance, id)`: the root is the current k-th best, which is what the grid
/// search compares its lower bound against.
#[derive(Debug)]
pub(crate) struct KNearest {
    k: usize,
    heap: BinaryHeap<Neighbor>,
}

impl KNearest {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, id: u32, distance: f64) {
        let candidate = Neighbor { id, distance };
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if self.heap.peek().is_some_and(|worst| candidate < *worst) {
            self.heap.pop();
            self.heap.push(candidate);
        }
    }

    /// The k-th best distance, once `k` candidates have been seen.
    #[inline]
    pub(crate) fn kth_distance(&self) -> Option<f64> {
        if self.heap.len() < self.k {
            return None;
        }
        self.heap.peek().map(|worst| worst.distance)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Consume, returning the neighbors sorted by `(distance, id)`.
    pub(crate) fn into_sorted_vec(self) -> Vec<Neighbor> {
        self.heap.into_sorted_vec()
    }
}
