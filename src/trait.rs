use geo_traits::CoordTrait;

use crate::error::Result;
use crate::neighbor::Neighbor;

/// A trait for answering nearest-neighbor queries on the sphere.
///
/// Implementors must agree exactly, tie order included: results are sorted by great-circle
/// distance, and points at exactly the same distance come out in ascending id order.
pub trait NearestIndex {
    /// The number of items in this index.
    fn num_items(&self) -> usize;

    /// The `k` points closest to `(lat, lng)`, closest first.
    ///
    /// `k` larger than the number of items returns every item. Fails with
    /// [`InvalidArgument`][crate::GlobeIndexError::InvalidArgument] when `k == 0` or the query
    /// latitude is not in `[-90, 90]`.
    fn neighbors(&self, lat: f64, lng: f64, k: usize) -> Result<Vec<Neighbor>>;

    /// Same as [`neighbors`][Self::neighbors], for a coordinate with `x` = longitude and `y` =
    /// latitude.
    fn neighbors_coord(&self, coord: &impl CoordTrait<T = f64>, k: usize) -> Result<Vec<Neighbor>> {
        self.neighbors(coord.y(), coord.x(), k)
    }

    /// Ids of the `k` points closest to `(lat, lng)`, closest first.
    fn nearest_ids(&self, lat: f64, lng: f64, k: usize) -> Result<Vec<u32>> {
        Ok(self
            .neighbors(lat, lng, k)?
            .into_iter()
            .map(|neighbor| neighbor.id)
            .collect())
    }
}
