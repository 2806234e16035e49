//! Swapping a live index for a rebuilt one.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::Result;
use crate::globe::GlobeIndex;
use crate::store::RawPoint;

/// A handle to the current [`GlobeIndex`] that can be replaced while readers are querying it.
///
/// Readers take a snapshot with [`load`][Self::load] and query it without holding any lock; the
/// lock only guards the pointer swap. A replaced index stays alive and valid for as long as a
/// snapshot of it exists.
#[derive(Debug)]
pub struct SharedGlobeIndex<P> {
    current: RwLock<Arc<GlobeIndex<P>>>,
}

impl<P> SharedGlobeIndex<P> {
    /// Wrap a built index.
    pub fn new(index: GlobeIndex<P>) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// A snapshot of the current index.
    pub fn load(&self) -> Arc<GlobeIndex<P>> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Swap in a fully built index, returning the one it replaces.
    pub fn replace(&self, index: GlobeIndex<P>) -> Arc<GlobeIndex<P>> {
        let index = Arc::new(index);
        let points = index.len();
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *current, index);
        drop(current);
        info!(points, previous_points = previous.len(), "swapped globe index");
        previous
    }

    /// Build a new index from `records` and swap it in.
    ///
    /// The build runs before the lock is taken. If it fails, the current index stays in place
    /// and the error is returned.
    pub fn rebuild(&self, records: impl IntoIterator<Item = RawPoint<P>>) -> Result<()> {
        let index = GlobeIndex::build_index(records)?;
        self.replace(index);
        Ok(())
    }
}

impl<P> From<GlobeIndex<P>> for SharedGlobeIndex<P> {
    fn from(index: GlobeIndex<P>) -> Self {
        Self::new(index)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::GlobeIndexError;

    fn dataset(lng: f64) -> Vec<RawPoint<u32>> {
        (0..50)
            .map(|i| RawPoint::new(-60.0 + i as f64 * 2.5, lng, "", i))
            .collect()
    }

    #[test]
    fn snapshots_survive_a_swap() {
        let shared = SharedGlobeIndex::new(GlobeIndex::build_index(dataset(0.0)).unwrap());
        let before = shared.load();

        shared.rebuild(dataset(90.0)).unwrap();
        let after = shared.load();

        assert_eq!(before.find_nearest(0.0, 0.0, 1).unwrap()[0].lng, 0.0);
        assert_eq!(after.find_nearest(0.0, 0.0, 1).unwrap()[0].lng, 90.0);
    }

    #[test]
    fn failed_rebuild_keeps_current_index() {
        let shared = SharedGlobeIndex::from(GlobeIndex::build_index(dataset(0.0)).unwrap());
        let err = shared.rebuild(vec![]).unwrap_err();
        assert!(matches!(err, GlobeIndexError::Data(_)));
        assert_eq!(shared.load().len(), 50);
    }

    #[test]
    fn replace_returns_previous() {
        let shared = SharedGlobeIndex::new(GlobeIndex::build_index(dataset(0.0)).unwrap());
        let previous = shared.replace(GlobeIndex::build_index(dataset(45.0)).unwrap());
        assert_eq!(previous.get(0).unwrap().lng, 0.0);
        assert_eq!(shared.load().get(0).unwrap().lng, 45.0);
    }

    #[test]
    fn concurrent_readers_during_swap() {
        let shared = Arc::new(SharedGlobeIndex::new(
            GlobeIndex::build_index(dataset(0.0)).unwrap(),
        ));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let index = shared.load();
                        let nearest = index.find_nearest(10.0, 10.0, 3).unwrap();
                        assert_eq!(nearest.len(), 3);
                        // every answer comes from a single, consistent dataset
                        assert!(nearest.iter().all(|p| p.lng == nearest[0].lng));
                    }
                })
            })
            .collect();

        for lng in [30.0, 60.0, 90.0] {
            shared.rebuild(dataset(lng)).unwrap();
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.load().get(0).unwrap().lng, 90.0);
    }
}
