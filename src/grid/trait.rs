use tracing::trace;

use crate::distance::{haversine, HaversineDistance};
use crate::error::Result;
use crate::grid::traversal::{covers_all, unvisited_lower_bound, visit_ring};
use crate::grid::GridIndex;
use crate::linear::scan;
use crate::neighbor::{KNearest, Neighbor};
use crate::r#trait::NearestIndex;
use crate::util::{clamp_k, query_coord};

/// Slack on the stopping test, in kilometers, so floating error in the lower bound can never
/// end a search before an equally distant point has been seen.
const STOP_SLACK_KM: f64 = 1e-6;

impl NearestIndex for GridIndex {
    fn num_items(&self) -> usize {
        self.metadata.num_items()
    }

    /// Search items in order of distance from the given point.
    ///
    /// ```
    /// use globe_index::grid::GridIndexBuilder;
    /// use globe_index::NearestIndex;
    ///
    /// let mut builder = GridIndexBuilder::new_with_cell_size(3, 10.).unwrap();
    /// builder.add(0., -179.9);
    /// builder.add(0., 179.0);
    /// builder.add(45., 90.);
    /// let index = builder.finish().unwrap();
    ///
    /// let results = index.neighbors(0., 179.9, 3).unwrap();
    /// let ids: Vec<u32> = results.iter().map(|n| n.id).collect();
    /// assert_eq!(ids, vec![0, 1, 2]);
    /// ```
    fn neighbors(&self, lat: f64, lng: f64, k: usize) -> Result<Vec<Neighbor>> {
        let k = clamp_k(k, self.num_items())?;
        let (lat, lng) = query_coord(lat, lng)?;

        if self.is_degenerate() {
            return Ok(scan(self.points_in(0..self.ids.len()), lat, lng, k));
        }

        let metadata = &self.metadata;
        let metric = HaversineDistance::default();
        let home = metadata.cell_of(lat, lng);

        let mut best = KNearest::new(k);
        let mut scanned = 0;
        let mut radius = 0;
        loop {
            visit_ring(metadata, home, radius, |cell| {
                let range = self.cell_range(cell);
                scanned += range.len();
                for (id, point_lat, point_lng) in self.points_in(range) {
                    best.push(id, haversine(lat, lng, point_lat, point_lng));
                }
            });

            if covers_all(metadata, home, radius) {
                break;
            }
            if let Some(kth) = best.kth_distance() {
                let bound = unvisited_lower_bound(metadata, &metric, lat, lng, home, radius);
                if bound > kth + STOP_SLACK_KM {
                    break;
                }
            }
            radius += 1;
        }

        trace!(lat, lng, k, radius, scanned, found = best.len(), "grid search finished");
        Ok(best.into_sorted_vec())
    }
}
