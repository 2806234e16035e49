//! The point store: an immutable, ordered collection of geographic records.
//!
//! Each record is identified by its position in the ingested sequence. Build one with
//! [`PointStore::build`] or incrementally with [`PointStoreBuilder`].

#![warn(missing_docs)]

mod builder;
mod index;
mod point;

pub use builder::PointStoreBuilder;
pub use index::PointStore;
pub use point::{GeoPoint, RawPoint};
