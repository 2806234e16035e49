use crate::distance::normalize_lng;
use crate::error::{GlobeIndexError, Result};

/// Check a requested result count against the number of indexed items, clamping it to
/// `num_items`.
pub(crate) fn clamp_k(k: usize, num_items: usize) -> Result<usize> {
    if k < 1 {
        return Err(GlobeIndexError::InvalidArgument(format!(
            "k must be at least 1, got {}.",
            k
        )));
    }
    Ok(k.min(num_items))
}

/// Validate a query coordinate, wrapping its longitude into `[-180, 180]`.
pub(crate) fn query_coord(lat: f64, lng: f64) -> Result<(f64, f64)> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(GlobeIndexError::InvalidArgument(format!(
            "Query latitude {} is outside [-90, 90].",
            lat
        )));
    }
    if !lng.is_finite() {
        return Err(GlobeIndexError::InvalidArgument(format!(
            "Query longitude {} is not finite.",
            lng
        )));
    }
    Ok((lat, normalize_lng(lng)))
}
