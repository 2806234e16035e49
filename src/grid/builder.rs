use tracing::debug;

use crate::distance::normalize_lng;
use crate::error::{GlobeIndexError, Result};
use crate::grid::{GridIndex, GridMetadata};

/// The number of points a cell should hold on average when the cell size is picked
/// automatically.
pub const DEFAULT_POINTS_PER_CELL: usize = 4;

/// The smallest allowed cell size, in degrees.
pub const MIN_CELL_SIZE: f64 = 0.25;

/// The largest useful cell size, in degrees. At this size the whole sphere is one cell.
pub const MAX_CELL_SIZE: f64 = 360.0;

/// Square degrees covered by the lat/lng plane.
const PLANE_AREA: f64 = 360.0 * 180.0;

/// A builder to create a [`GridIndex`].
///
/// ```
/// use globe_index::grid::GridIndexBuilder;
/// use globe_index::NearestIndex;
///
/// let mut builder = GridIndexBuilder::new(3);
/// builder.add(10., 170.);
/// builder.add(10., -170.);
/// builder.add(-40., 0.);
/// let index = builder.finish().unwrap();
///
/// assert_eq!(index.nearest_ids(10., 179., 2).unwrap(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct GridIndexBuilder {
    /// Interleaved `[lat, lng]` pairs in insertion order.
    coords: Vec<f64>,

    num_items: usize,
    cell_size: f64,
}

impl GridIndexBuilder {
    /// Create a new builder for `num_items` points, sizing cells so that each holds about
    /// [`DEFAULT_POINTS_PER_CELL`] points.
    pub fn new(num_items: usize) -> Self {
        Self {
            coords: Vec::with_capacity(num_items * 2),
            num_items,
            cell_size: auto_cell_size(num_items),
        }
    }

    /// Create a new builder for `num_items` points with cells of `cell_size` degrees.
    ///
    /// Fails if `cell_size` is not finite or is below [`MIN_CELL_SIZE`]. Sizes above
    /// [`MAX_CELL_SIZE`] are treated as [`MAX_CELL_SIZE`].
    pub fn new_with_cell_size(num_items: usize, cell_size: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size < MIN_CELL_SIZE {
            return Err(GlobeIndexError::InvalidArgument(format!(
                "Cell size must be a finite number of degrees >= {}, got {}.",
                MIN_CELL_SIZE, cell_size
            )));
        }
        Ok(Self {
            coords: Vec::with_capacity(num_items * 2),
            num_items,
            cell_size: cell_size.min(MAX_CELL_SIZE),
        })
    }

    /// The cell size this builder will use, in degrees.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Add a point to the index, returning its id.
    pub fn add(&mut self, lat: f64, lng: f64) -> usize {
        let index = self.coords.len() >> 1;
        self.coords.push(lat);
        self.coords.push(lng);
        index
    }

    /// Consume this builder, bucketing every point into its cell.
    ///
    /// Fails with [`GlobeIndexError::Data`] if the number of added points differs from the
    /// number declared up front, if no points were added, or if a coordinate is invalid.
    pub fn finish(mut self) -> Result<GridIndex> {
        let added = self.coords.len() >> 1;
        if added != self.num_items {
            return Err(GlobeIndexError::Data(format!(
                "Added {} items when expected {}.",
                added, self.num_items
            )));
        }
        if self.num_items == 0 {
            return Err(GlobeIndexError::Data(
                "Cannot build a grid index from an empty dataset.".to_string(),
            ));
        }
        if u32::try_from(self.num_items).is_err() {
            return Err(GlobeIndexError::Data(format!(
                "{} items do not fit in a grid index.",
                self.num_items
            )));
        }

        for (id, coord) in self.coords.chunks_exact_mut(2).enumerate() {
            let (lat, lng) = (coord[0], coord[1]);
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) || !lng.is_finite() {
                return Err(GlobeIndexError::Data(format!(
                    "Point {} has invalid coordinate ({}, {}).",
                    id, lat, lng
                )));
            }
            coord[1] = normalize_lng(lng);
        }

        let metadata = GridMetadata::new(self.num_items, self.cell_size);
        let num_cells = metadata.num_cells();

        let cells: Vec<usize> = self
            .coords
            .chunks_exact(2)
            .map(|coord| metadata.cell_index(metadata.cell_of(coord[0], coord[1])))
            .collect();

        // counting sort: ids stay ascending within each cell
        let mut cell_offsets = vec![0u32; num_cells + 1];
        for &cell in &cells {
            cell_offsets[cell + 1] += 1;
        }
        let occupied_cells = cell_offsets.iter().filter(|&&count| count > 0).count();
        for i in 0..num_cells {
            cell_offsets[i + 1] += cell_offsets[i];
        }

        let mut next: Vec<usize> = cell_offsets[..num_cells]
            .iter()
            .map(|&offset| offset as usize)
            .collect();
        let mut ids = vec![0u32; self.num_items];
        let mut coords = vec![0f64; self.num_items * 2];
        for (id, &cell) in cells.iter().enumerate() {
            let slot = next[cell];
            next[cell] += 1;
            ids[slot] = id as u32;
            coords[2 * slot] = self.coords[2 * id];
            coords[2 * slot + 1] = self.coords[2 * id + 1];
        }

        debug!(
            num_items = self.num_items,
            cell_size = self.cell_size,
            lat_cells = metadata.num_lat_cells(),
            lng_cells = metadata.num_lng_cells(),
            occupied_cells,
            "built grid index"
        );

        Ok(GridIndex {
            metadata,
            cell_offsets,
            ids,
            coords,
            occupied_cells,
        })
    }
}

/// Pick a cell size so an average cell holds [`DEFAULT_POINTS_PER_CELL`] points.
fn auto_cell_size(num_items: usize) -> f64 {
    if num_items == 0 {
        return MAX_CELL_SIZE;
    }
    let size = (PLANE_AREA * DEFAULT_POINTS_PER_CELL as f64 / num_items as f64).sqrt();
    size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
}
