//! The two entry points the host application calls: build once, then find nearest.

#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::info;

use crate::error::Result;
use crate::grid::GridIndex;
use crate::r#trait::NearestIndex;
use crate::store::{GeoPoint, PointStore, RawPoint};

/// A point store together with the grid index built over it.
///
/// Immutable once built. Any number of threads may query the same instance at once; to change
/// the dataset, build a new instance and swap it in with
/// [`SharedGlobeIndex`][crate::SharedGlobeIndex].
///
/// ```
/// use globe_index::{GlobeIndex, RawPoint};
///
/// let index = GlobeIndex::build_index(vec![
///     RawPoint::new(10., 170., "Pacific Ocean", "Sea turtle"),
///     RawPoint::new(10., -170., "Pacific Ocean", "Manta ray"),
///     RawPoint::new(-40., 0., "Atlantic Ocean", "Albatross"),
/// ])
/// .unwrap();
///
/// let nearest = index.find_nearest(10., 179., 2).unwrap();
/// let names: Vec<_> = nearest.iter().map(|point| point.payload).collect();
/// assert_eq!(names, vec!["Sea turtle", "Manta ray"]);
/// ```
#[derive(Debug, Clone)]
pub struct GlobeIndex<P> {
    store: PointStore<P>,
    grid: GridIndex,
}

impl<P> GlobeIndex<P> {
    /// Validate `records` and index them with an automatically sized grid.
    pub fn build_index(records: impl IntoIterator<Item = RawPoint<P>>) -> Result<Self> {
        Self::from_store(PointStore::build(records)?)
    }

    /// Validate `records` and index them with cells of `cell_size` degrees.
    pub fn build_with_cell_size(
        records: impl IntoIterator<Item = RawPoint<P>>,
        cell_size: f64,
    ) -> Result<Self> {
        let store = PointStore::build(records)?;
        let grid = GridIndex::from_store_with_cell_size(&store, cell_size)?;
        Ok(Self::new(store, grid))
    }

    /// Index an existing store with an automatically sized grid.
    pub fn from_store(store: PointStore<P>) -> Result<Self> {
        let grid = GridIndex::from_store(&store)?;
        Ok(Self::new(store, grid))
    }

    fn new(store: PointStore<P>, grid: GridIndex) -> Self {
        info!(
            points = store.len(),
            cells = grid.metadata().num_cells(),
            occupied_cells = grid.occupied_cells(),
            "built globe index"
        );
        Self { store, grid }
    }

    /// The `k` records closest to `(lat, lng)`, closest first.
    ///
    /// Asking for more records than exist returns all of them. Fails with
    /// [`InvalidArgument`][crate::GlobeIndexError::InvalidArgument] when `k == 0`.
    pub fn find_nearest(&self, lat: f64, lng: f64, k: usize) -> Result<Vec<&GeoPoint<P>>> {
        self.grid
            .neighbors(lat, lng, k)?
            .into_iter()
            .map(|neighbor| self.store.get(neighbor.id))
            .collect()
    }

    /// Like [`find_nearest`][Self::find_nearest], paired with each record's distance in
    /// kilometers.
    pub fn find_nearest_with_distance(
        &self,
        lat: f64,
        lng: f64,
        k: usize,
    ) -> Result<Vec<(&GeoPoint<P>, f64)>> {
        self.grid
            .neighbors(lat, lng, k)?
            .into_iter()
            .map(|neighbor| Ok((self.store.get(neighbor.id)?, neighbor.distance)))
            .collect()
    }

    /// The underlying point store.
    pub fn store(&self) -> &PointStore<P> {
        &self.store
    }

    /// The underlying grid index.
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Look up a record by id.
    pub fn get(&self, id: u32) -> Result<&GeoPoint<P>> {
        self.store.get(id)
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether there are no records. A built index is never empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<P: Sync> GlobeIndex<P> {
    /// Run [`find_nearest`][Self::find_nearest] for every `(lat, lng)` in `queries`.
    ///
    /// With the `rayon` feature the queries run in parallel. Fails on the first invalid query.
    pub fn find_nearest_batch(
        &self,
        queries: &[(f64, f64)],
        k: usize,
    ) -> Result<Vec<Vec<&GeoPoint<P>>>> {
        #[cfg(feature = "rayon")]
        let results: Result<Vec<_>> = queries
            .par_iter()
            .map(|&(lat, lng)| self.find_nearest(lat, lng, k))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let results: Result<Vec<_>> = queries
            .iter()
            .map(|&(lat, lng)| self.find_nearest(lat, lng, k))
            .collect();

        results
    }
}
