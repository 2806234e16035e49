//! Cross-checks between the grid index and the brute-force scan on generated datasets.


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::store::{PointStore, RawPoint};

/// `n` points spread over the whole sphere, with some exact duplicates and points on the
/// antimeridian and near the poles mixed in.
pub(crate) fn random_store(n: usize, seed: u64) -> PointStore<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records: Vec<RawPoint<usize>> = Vec::with_capacity(n);
    for i in 0..n {
        let (lat, lng) = match i % 10 {
            // duplicate an earlier point so distance ties are exercised
            7 if i > 0 => {
                let j = rng.gen_range(0..i);
                (records[j].lat.unwrap_or(0.0), records[j].lng.unwrap_or(0.0))
            }
            8 => (rng.gen_range(-90.0..=90.0), if rng.gen_bool(0.5) { 180.0 } else { -180.0 }),
            9 => {
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                (sign * rng.gen_range(85.0..=90.0), rng.gen_range(-180.0..=180.0))
            }
            _ => (rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0)),
        };
        records.push(RawPoint::new(lat, lng, "", i));
    }
    PointStore::build(records).unwrap()
}

/// `n` points packed into a small patch around `(lat, lng)`.
pub(crate) fn clustered_store(n: usize, lat: f64, lng: f64, seed: u64) -> PointStore<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let records = (0..n).map(|i| {
        let point_lat = (lat + rng.gen_range(-2.0..2.0)).clamp(-90.0, 90.0);
        let point_lng = lng + rng.gen_range(-2.0..2.0);
        RawPoint::new(point_lat, point_lng, "", i)
    });
    PointStore::build(records).unwrap()
}

/// Query coordinates, including the awkward ones.
pub(crate) fn queries(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut queries = vec![
        (0.0, 179.9),
        (0.0, -179.9),
        (0.0, 180.0),
        (0.0, -180.0),
        (90.0, 0.0),
        (-90.0, 123.0),
        (89.99, -45.0),
        (-89.99, 180.0),
        (45.0, 0.0),
    ];
    queries.extend(
        (0..n).map(|_| (rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0))),
    );
    queries
}
