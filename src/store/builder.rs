use crate::distance::normalize_lng;
use crate::error::{GlobeIndexError, Result};
use crate::store::{GeoPoint, PointStore, RawPoint};

/// A builder to create a [`PointStore`].
///
/// Records are validated as they are added, but errors are only surfaced from
/// [`finish`][Self::finish], so a whole dataset can be fed in one loop.
#[derive(Debug)]
pub struct PointStoreBuilder<P> {
    points: Vec<GeoPoint<P>>,

    /// Number of records added so far, valid or not.
    pos: usize,

    /// The first validation failure, if any.
    error: Option<GlobeIndexError>,
}

impl<P> Default for PointStoreBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PointStoreBuilder<P> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new builder with room for `num_items` records.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
            pos: 0,
            error: None,
        }
    }

    /// Add a record to the store, returning the id it will have.
    pub fn add(&mut self, lat: f64, lng: f64, region: impl Into<String>, payload: P) -> usize {
        self.add_raw(RawPoint::new(lat, lng, region, payload))
    }

    /// Add a raw record to the store, returning the id it will have.
    ///
    /// A record with a missing or invalid coordinate is dropped and the failure is reported by
    /// [`finish`][Self::finish].
    pub fn add_raw(&mut self, raw: RawPoint<P>) -> usize {
        let index = self.pos;
        self.pos += 1;

        if self.error.is_some() {
            return index;
        }

        match validate(index, raw) {
            Ok(point) => self.points.push(point),
            Err(err) => self.error = Some(err),
        }
        index
    }

    /// Consume this builder, returning the finished store or the first ingest error.
    pub fn finish(self) -> Result<PointStore<P>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.points.is_empty() {
            return Err(GlobeIndexError::Data(
                "Cannot build a point store from an empty dataset.".to_string(),
            ));
        }
        debug_assert_eq!(self.points.len(), self.pos);
        Ok(PointStore {
            points: self.points,
        })
    }
}

fn validate<P>(index: usize, raw: RawPoint<P>) -> Result<GeoPoint<P>> {
    let id: u32 = index.try_into().map_err(|_| {
        GlobeIndexError::Data(format!("Record {} exceeds the maximum store size.", index))
    })?;

    let (lat, lng) = match (raw.lat, raw.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        (None, _) => {
            return Err(GlobeIndexError::Data(format!(
                "Record {} is missing its latitude.",
                index
            )))
        }
        (_, None) => {
            return Err(GlobeIndexError::Data(format!(
                "Record {} is missing its longitude.",
                index
            )))
        }
    };

    if !lat.is_finite() || !lng.is_finite() {
        return Err(GlobeIndexError::Data(format!(
            "Record {} has a non-finite coordinate ({}, {}).",
            index, lat, lng
        )));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(GlobeIndexError::Data(format!(
            "Record {} has latitude {} outside [-90, 90].",
            index, lat
        )));
    }

    Ok(GeoPoint {
        id,
        lat,
        lng: normalize_lng(lng),
        region: raw.region,
        payload: raw.payload,
    })
}
