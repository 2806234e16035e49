//! Brute-force nearest-neighbor search.

use crate::distance::haversine;
use crate::error::Result;
use crate::neighbor::{KNearest, Neighbor};
use crate::r#trait::NearestIndex;
use crate::store::PointStore;
use crate::util::{clamp_k, query_coord};

/// Answers queries by measuring the distance to every point in a store.
///
/// This is the reference the grid index is checked against, and what small datasets fall back
/// to.
#[derive(Debug, Clone, Copy)]
pub struct LinearScan<'a, P> {
    store: &'a PointStore<P>,
}

impl<'a, P> LinearScan<'a, P> {
    /// Create a scanner over `store`.
    pub fn new(store: &'a PointStore<P>) -> Self {
        Self { store }
    }
}

impl<P> NearestIndex for LinearScan<'_, P> {
    fn num_items(&self) -> usize {
        self.store.len()
    }

    fn neighbors(&self, lat: f64, lng: f64, k: usize) -> Result<Vec<Neighbor>> {
        let k = clamp_k(k, self.num_items())?;
        let (lat, lng) = query_coord(lat, lng)?;
        Ok(scan(
            self.store.iter().map(|point| (point.id, point.lat, point.lng)),
            lat,
            lng,
            k,
        ))
    }
}

/// Keep the `k` closest of `points`, given as `(id, lat, lng)`.
pub(crate) fn scan(
    points: impl Iterator<Item = (u32, f64, f64)>,
    lat: f64,
    lng: f64,
    k: usize,
) -> Vec<Neighbor> {
    let mut best = KNearest::new(k);
    for (id, point_lat, point_lng) in points {
        best.push(id, haversine(lat, lng, point_lat, point_lng));
    }
    best.into_sorted_vec()
}
