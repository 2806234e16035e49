/// One raw input record, before validation.
///
/// Coordinates are optional so that a dataset with missing fields can be deserialized and then
/// rejected with a [`Data`][crate::GlobeIndexError::Data] error instead of failing to parse.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawPoint<P> {
    /// Latitude in degrees.
    pub lat: Option<f64>,
    /// Longitude in degrees. Wrapped into `[-180, 180]` on ingest.
    pub lng: Option<f64>,
    /// Region label such as a country or ocean name.
    #[cfg_attr(feature = "serde", serde(default, alias = "country"))]
    pub region: String,
    /// Everything else in the record, passed through untouched.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub payload: P,
}

impl<P> RawPoint<P> {
    /// Create a record with both coordinates present.
    pub fn new(lat: f64, lng: f64, region: impl Into<String>, payload: P) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            region: region.into(),
            payload,
        }
    }
}

/// A validated record held by a [`PointStore`][crate::store::PointStore].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint<P> {
    /// Position of this record in the ingested sequence.
    pub id: u32,
    /// Latitude in degrees, in `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, in `[-180, 180]`.
    pub lng: f64,
    /// Opaque region label, only ever compared for equality.
    pub region: String,
    /// Opaque payload.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub payload: P,
}
