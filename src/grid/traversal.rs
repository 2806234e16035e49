//! Ring-by-ring traversal of the grid around a home cell.
//!
//! Ring `r` is every cell whose row distance and wrapped column distance from the home cell have
//! a maximum of exactly `r`. Rows stop at the poles; columns wrap at the antimeridian. Each cell
//! of the grid belongs to exactly one ring.

use tinyvec::TinyVec;

use crate::distance::HaversineDistance;
use crate::grid::{Cell, GridMetadata};

/// Call `visit` once for every cell in ring `radius` around `home`.
pub(crate) fn visit_ring(
    metadata: &GridMetadata,
    home: Cell,
    radius: usize,
    mut visit: impl FnMut(Cell),
) {
    let num_cols = metadata.num_lng_cells();
    let first_row = home.row.saturating_sub(radius);
    let last_row = (home.row + radius).min(metadata.num_lat_cells() - 1);

    for row in first_row..=last_row {
        if row.abs_diff(home.row) == radius {
            // top or bottom edge of the ring: the full column span
            for col in span_columns(home.col, radius, num_cols) {
                visit(Cell { row, col });
            }
        } else {
            for col in edge_columns(home.col, radius, num_cols) {
                visit(Cell { row, col });
            }
        }
    }
}

/// Whether rings `0..=radius` around `home` cover the whole grid.
pub(crate) fn covers_all(metadata: &GridMetadata, home: Cell, radius: usize) -> bool {
    home.row <= radius
        && home.row + radius + 1 >= metadata.num_lat_cells()
        && 2 * radius + 1 >= metadata.num_lng_cells()
}

/// A lower bound on the distance from `(lat, lng)` to any point in a cell outside rings
/// `0..=radius` around `home`.
///
/// Unvisited cells either lie in rows beyond the visited band, which are at least the latitude
/// gap away along a meridian, or in columns beyond the visited span, which are at least the
/// cross-track distance to the nearest unvisited column edge away. Returns infinity when nothing
/// is left to visit.
pub(crate) fn unvisited_lower_bound(
    metadata: &GridMetadata,
    metric: &HaversineDistance,
    lat: f64,
    lng: f64,
    home: Cell,
    radius: usize,
) -> f64 {
    let mut bound = f64::INFINITY;

    let north_row = home.row + radius + 1;
    if north_row < metadata.num_lat_cells() {
        let gap = metadata.row_edge(north_row) - lat;
        bound = bound.min(metric.min_distance_across_lat(gap.max(0.0)));
    }
    if home.row > radius {
        let gap = lat - metadata.row_edge(home.row - radius);
        bound = bound.min(metric.min_distance_across_lat(gap.max(0.0)));
    }

    if 2 * radius + 1 < metadata.num_lng_cells() {
        let west = lng - metadata.col_edge(home.col as isize - radius as isize);
        let east = metadata.col_edge((home.col + radius + 1) as isize) - lng;
        let gap = west.min(east).max(0.0);
        bound = bound.min(metric.min_distance_across_lng(lat, gap));
    }

    bound
}

/// Columns at wrapped distance `<= radius` from `home`, each exactly once.
fn span_columns(home: usize, radius: usize, num_cols: usize) -> impl Iterator<Item = usize> {
    let (start, len) = if 2 * radius + 1 >= num_cols {
        (0, num_cols)
    } else {
        ((home + num_cols - radius) % num_cols, 2 * radius + 1)
    };
    (0..len).map(move |i| (start + i) % num_cols)
}

/// Columns at wrapped distance exactly `radius` from `home`.
fn edge_columns(home: usize, radius: usize, num_cols: usize) -> TinyVec<[usize; 2]> {
    let mut cols = TinyVec::new();
    if radius == 0 {
        cols.push(home);
    } else if 2 * radius < num_cols {
        cols.push((home + num_cols - radius) % num_cols);
        cols.push((home + radius) % num_cols);
    } else if 2 * radius == num_cols {
        cols.push((home + radius) % num_cols);
    }
    cols
}
