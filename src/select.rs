//! Choosing one record to show for a clicked location.
//!
//! A click first looks for records whose region matches the clicked region exactly. If there are
//! none, it falls back to the few records nearest to the click. Either way one record is picked
//! at random, avoiding the one shown last when there is an alternative. All randomness comes
//! from a caller-supplied [`Rng`], so a seeded generator gives reproducible picks.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GlobeIndexError, Result};
use crate::globe::GlobeIndex;
use crate::store::GeoPoint;

/// How many nearest records the fallback picks from.
pub const DEFAULT_FALLBACK_K: usize = 5;

/// The first record of an ordered query result.
pub fn pick_nearest<'a, P>(candidates: &[&'a GeoPoint<P>]) -> Option<&'a GeoPoint<P>> {
    candidates.first().copied()
}

/// Pick one candidate uniformly at random.
///
/// When there is more than one candidate, the record with id `exclude` is never picked.
/// Returns `None` only when `candidates` is empty.
pub fn pick_random<'a, P, R: Rng + ?Sized>(
    candidates: &[&'a GeoPoint<P>],
    exclude: Option<u32>,
    rng: &mut R,
) -> Option<&'a GeoPoint<P>> {
    if candidates.len() > 1 {
        if let Some(excluded) = exclude {
            let remaining: Vec<&GeoPoint<P>> = candidates
                .iter()
                .copied()
                .filter(|point| point.id != excluded)
                .collect();
            if !remaining.is_empty() {
                return remaining.choose(rng).copied();
            }
        }
    }
    candidates.choose(rng).copied()
}

/// Picks records for clicked locations from a [`GlobeIndex`].
#[derive(Debug, Clone, Copy)]
pub struct Selector<'a, P> {
    index: &'a GlobeIndex<P>,
    fallback_k: usize,
}

impl<'a, P> Selector<'a, P> {
    /// Create a selector that falls back to the [`DEFAULT_FALLBACK_K`] nearest records.
    pub fn new(index: &'a GlobeIndex<P>) -> Self {
        Self {
            index,
            fallback_k: DEFAULT_FALLBACK_K,
        }
    }

    /// Create a selector that falls back to the `fallback_k` nearest records.
    pub fn with_fallback_k(index: &'a GlobeIndex<P>, fallback_k: usize) -> Result<Self> {
        if fallback_k == 0 {
            return Err(GlobeIndexError::InvalidArgument(
                "fallback_k must be at least 1.".to_string(),
            ));
        }
        Ok(Self { index, fallback_k })
    }

    /// The number of nearest records the fallback picks from.
    pub fn fallback_k(&self) -> usize {
        self.fallback_k
    }

    /// Pick a record for a click at `(lat, lng)` classified as `region`.
    ///
    /// Records in `region` win; otherwise the pick is among the nearest records. `exclude` is
    /// the id of the record shown last. Returns `Ok(None)` only if there is nothing to pick
    /// from, which cannot happen on a built index.
    pub fn locate<R: Rng + ?Sized>(
        &self,
        lat: f64,
        lng: f64,
        region: Option<&str>,
        exclude: Option<u32>,
        rng: &mut R,
    ) -> Result<Option<&'a GeoPoint<P>>> {
        if let Some(region) = region {
            let local: Vec<&'a GeoPoint<P>> = self
                .index
                .store()
                .iter()
                .filter(|point| point.region == region)
                .collect();
            if !local.is_empty() {
                return Ok(pick_random(&local, exclude, rng));
            }
        }

        let nearest = self.index.find_nearest(lat, lng, self.fallback_k)?;
        Ok(pick_random(&nearest, exclude, rng))
    }

    /// A uniformly random record.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a GeoPoint<P>> {
        self.index.store().all().choose(rng)
    }
}
