//! Great-circle distance on a spherical Earth.
//!
//! All coordinates in this crate are `(lat, lng)` pairs in degrees. Longitude differences are
//! always taken modulo 360°, so `179°` and `-179°` are 2° apart, not 358°.

/// Earth mean radius in kilometers.
///
/// Only used for consistent ordering; the absolute unit never changes a ranking.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Wrap a longitude into the `[-180, 180]` range.
///
/// Values already in range are returned unchanged (including `180.0`); anything else is wrapped
/// modulo 360 into `[-180, 180)`.
///
/// ```
/// use globe_index::distance::normalize_lng;
///
/// assert_eq!(normalize_lng(190.), -170.);
/// assert_eq!(normalize_lng(-540.), -180.);
/// assert_eq!(normalize_lng(180.), 180.);
/// ```
#[inline]
pub fn normalize_lng(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        lng
    } else {
        (lng + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// The shorter angular separation between two longitudes, in degrees. Always in `[0, 180]`.
#[inline]
pub fn lng_delta(lng1: f64, lng2: f64) -> f64 {
    let d = (lng1 - lng2).abs() % 360.0;
    d.min(360.0 - d)
}

/// Haversine distance metric.
///
/// This calculates the great-circle distance between two points on a sphere. The input
/// coordinates are latitude/longitude in degrees, and the output distance is in the unit of
/// `earth_radius` (kilometers by default).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaversineDistance {
    /// Sphere radius used to scale the central angle.
    pub earth_radius: f64,
}

impl Default for HaversineDistance {
    fn default() -> Self {
        Self {
            earth_radius: EARTH_MEAN_RADIUS_KM,
        }
    }
}

impl HaversineDistance {
    /// Create a new Haversine distance metric with a custom sphere radius.
    pub fn with_radius(earth_radius: f64) -> Self {
        Self { earth_radius }
    }

    /// Great-circle distance between `(lat1, lng1)` and `(lat2, lng2)`.
    #[inline]
    pub fn distance(&self, lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
        let phi1 = lat1.to_radians();
        let phi2 = lat2.to_radians();
        let half_dlat = (lat2 - lat1).to_radians() / 2.0;
        let half_dlng = lng_delta(lng1, lng2).to_radians() / 2.0;

        let a = half_dlat.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlng.sin().powi(2);
        // rounding can push `a` a hair past 1 for antipodal points
        let a = a.clamp(0.0, 1.0);
        2.0 * self.earth_radius * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// The smallest possible distance from `lat` to any point whose longitude differs from the
    /// query by at least `min_lng_delta` degrees.
    ///
    /// Up to 90° this is the cross-track distance to the bounding meridian; beyond that the
    /// closest such point is the nearer pole.
    pub(crate) fn min_distance_across_lng(&self, lat: f64, min_lng_delta: f64) -> f64 {
        let angle = if min_lng_delta <= 90.0 {
            (lat.to_radians().cos() * min_lng_delta.to_radians().sin())
                .clamp(0.0, 1.0)
                .asin()
        } else {
            (90.0 - lat.abs()).to_radians()
        };
        self.earth_radius * angle
    }

    /// The smallest possible distance between two points whose latitudes differ by at least
    /// `min_lat_delta` degrees: the meridian arc.
    #[inline]
    pub(crate) fn min_distance_across_lat(&self, min_lat_delta: f64) -> f64 {
        self.earth_radius * min_lat_delta.to_radians()
    }
}

/// Great-circle distance in kilometers on a sphere of [`EARTH_MEAN_RADIUS_KM`].
#[inline]
pub fn haversine(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    HaversineDistance::default().distance(lat1, lng1, lat2, lng2)
}

#[cfg(feature = "use-geo_0_31")]
impl<P> From<&crate::store::GeoPoint<P>> for geo_0_31::Point<f64> {
    fn from(point: &crate::store::GeoPoint<P>) -> Self {
        geo_0_31::Point::new(point.lng, point.lat)
    }
}
