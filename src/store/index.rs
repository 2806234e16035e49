use crate::error::{GlobeIndexError, Result};
use crate::store::{GeoPoint, PointStoreBuilder, RawPoint};

/// An immutable, ordered collection of validated records.
///
/// The id of every point equals its position in [`all`][Self::all].
#[derive(Debug, Clone, PartialEq)]
pub struct PointStore<P> {
    pub(crate) points: Vec<GeoPoint<P>>,
}

impl<P> PointStore<P> {
    /// Build a store from a sequence of raw records.
    ///
    /// Longitudes are wrapped into `[-180, 180]` and ids are assigned in input order. Fails with
    /// [`GlobeIndexError::Data`] if the input is empty, if a coordinate is missing or not
    /// finite, or if a latitude lies outside `[-90, 90]`.
    ///
    /// ```
    /// use globe_index::store::{PointStore, RawPoint};
    ///
    /// let store = PointStore::build(vec![
    ///     RawPoint::new(10., 190., "Pacific Ocean", "whale"),
    ///     RawPoint::new(-25., 133., "Australia", "koala"),
    /// ])
    /// .unwrap();
    /// assert_eq!(store.len(), 2);
    /// assert_eq!(store.get(0).unwrap().lng, -170.);
    /// ```
    pub fn build(records: impl IntoIterator<Item = RawPoint<P>>) -> Result<Self> {
        let records = records.into_iter();
        let mut builder = PointStoreBuilder::with_capacity(records.size_hint().0);
        for record in records {
            builder.add_raw(record);
        }
        builder.finish()
    }

    /// Look up a point by id.
    #[inline]
    pub fn get(&self, id: u32) -> Result<&GeoPoint<P>> {
        self.points
            .get(id as usize)
            .ok_or(GlobeIndexError::NotFound(id))
    }

    /// Every point, in insertion order.
    pub fn all(&self) -> &[GeoPoint<P>] {
        &self.points
    }

    /// Iterate over every point in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, GeoPoint<P>> {
        self.points.iter()
    }

    /// The number of points in this store.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this store holds no points. A finished store is never empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points whose region label equals `region` exactly, in insertion order.
    pub fn in_region<'a>(&'a self, region: &'a str) -> impl Iterator<Item = &'a GeoPoint<P>> + 'a {
        self.points.iter().filter(move |point| point.region == region)
    }
}

impl<'a, P> IntoIterator for &'a PointStore<P> {
    type Item = &'a GeoPoint<P>;
    type IntoIter = std::slice::Iter<'a, GeoPoint<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
