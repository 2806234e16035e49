use std::ops::Range;

use crate::error::Result;
use crate::grid::GridIndexBuilder;
use crate::store::PointStore;

/// A grid cell, addressed by row (latitude band, south to north) and column (longitude band,
/// west to east from the antimeridian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Latitude band, `0` at the south pole.
    pub row: usize,
    /// Longitude band, `0` starting at -180°.
    pub col: usize,
}

/// The shape of a [`GridIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetadata {
    num_items: usize,
    num_lat_cells: usize,
    num_lng_cells: usize,
    cell_height: f64,
    cell_width: f64,
}

impl GridMetadata {
    /// Lay out a grid of roughly `cell_size` degrees that tiles the sphere exactly.
    pub(crate) fn new(num_items: usize, cell_size: f64) -> Self {
        let num_lat_cells = ((180.0 / cell_size).ceil() as usize).max(1);
        let num_lng_cells = ((360.0 / cell_size).ceil() as usize).max(1);
        Self {
            num_items,
            num_lat_cells,
            num_lng_cells,
            cell_height: 180.0 / num_lat_cells as f64,
            cell_width: 360.0 / num_lng_cells as f64,
        }
    }

    /// The number of items in the index.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// The number of latitude bands.
    pub fn num_lat_cells(&self) -> usize {
        self.num_lat_cells
    }

    /// The number of longitude bands.
    pub fn num_lng_cells(&self) -> usize {
        self.num_lng_cells
    }

    /// The total number of cells.
    pub fn num_cells(&self) -> usize {
        self.num_lat_cells * self.num_lng_cells
    }

    /// Height of a cell in degrees of latitude.
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Width of a cell in degrees of longitude.
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// The cell containing `(lat, lng)`. Coordinates on the outer edges (`lat == 90`,
    /// `lng == 180`) land in the last row or column.
    pub fn cell_of(&self, lat: f64, lng: f64) -> Cell {
        Cell {
            row: band((lat + 90.0) / self.cell_height, self.num_lat_cells),
            col: band((lng + 180.0) / self.cell_width, self.num_lng_cells),
        }
    }

    #[inline]
    pub(crate) fn cell_index(&self, cell: Cell) -> usize {
        cell.row * self.num_lng_cells + cell.col
    }

    /// Latitude of the southern edge of `row`.
    #[inline]
    pub(crate) fn row_edge(&self, row: usize) -> f64 {
        -90.0 + row as f64 * self.cell_height
    }

    /// Longitude of the western edge of column `col`, without wrapping. Negative and
    /// out-of-range columns give edges beyond ±180°.
    #[inline]
    pub(crate) fn col_edge(&self, col: isize) -> f64 {
        -180.0 + col as f64 * self.cell_width
    }
}

#[inline]
fn band(position: f64, num_bands: usize) -> usize {
    if position <= 0.0 {
        0
    } else {
        (position.floor() as usize).min(num_bands - 1)
    }
}

/// An immutable grid index over a set of points.
///
/// Cells are stored in compressed form: `cell_offsets[i]..cell_offsets[i + 1]` is the range of
/// `ids` (and of coordinate pairs in `coords`) belonging to cell `i`. Only ids and coordinates
/// are kept, never payloads.
///
/// Usually this will be created from a [`PointStore`] via [`GridIndex::from_store`], or from
/// scratch via [`GridIndexBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridIndex {
    pub(crate) metadata: GridMetadata,
    pub(crate) cell_offsets: Vec<u32>,
    pub(crate) ids: Vec<u32>,
    /// Interleaved `[lat, lng]` pairs, in the same order as `ids`.
    pub(crate) coords: Vec<f64>,
    pub(crate) occupied_cells: usize,
}

impl GridIndex {
    /// Index every point of `store` with an automatically chosen cell size.
    pub fn from_store<P>(store: &PointStore<P>) -> Result<Self> {
        let mut builder = GridIndexBuilder::new(store.len());
        for point in store {
            builder.add(point.lat, point.lng);
        }
        builder.finish()
    }

    /// Index every point of `store` with cells of `cell_size` degrees.
    pub fn from_store_with_cell_size<P>(store: &PointStore<P>, cell_size: f64) -> Result<Self> {
        let mut builder = GridIndexBuilder::new_with_cell_size(store.len(), cell_size)?;
        for point in store {
            builder.add(point.lat, point.lng);
        }
        builder.finish()
    }

    /// Access the metadata describing this grid.
    pub fn metadata(&self) -> &GridMetadata {
        &self.metadata
    }

    /// The number of cells holding at least one point.
    pub fn occupied_cells(&self) -> usize {
        self.occupied_cells
    }

    /// Whether every point sits in the same cell, so the grid cannot prune anything.
    pub fn is_degenerate(&self) -> bool {
        self.occupied_cells <= 1
    }

    /// The ids of the points in `cell`, ascending.
    pub fn cell_ids(&self, cell: Cell) -> &[u32] {
        &self.ids[self.cell_range(cell)]
    }

    #[inline]
    pub(crate) fn cell_range(&self, cell: Cell) -> Range<usize> {
        let index = self.metadata.cell_index(cell);
        self.cell_offsets[index] as usize..self.cell_offsets[index + 1] as usize
    }

    /// `(id, lat, lng)` for every point in `range` of the cell-ordered arrays.
    #[inline]
    pub(crate) fn points_in(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (u32, f64, f64)> + '_ {
        range.map(move |slot| (self.ids[slot], self.coords[2 * slot], self.coords[2 * slot + 1]))
    }
}
