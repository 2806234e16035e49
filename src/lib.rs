#![doc = include_str!("../README.md")]

pub mod distance;
mod error;
pub mod grid;
mod globe;
pub mod linear;
mod neighbor;
pub mod select;
mod shared;
pub mod store;
mod r#trait;
mod util;

pub use error::{GlobeIndexError, Result};
pub use globe::GlobeIndex;
pub use neighbor::Neighbor;
pub use r#trait::NearestIndex;
pub use shared::SharedGlobeIndex;
pub use store::{GeoPoint, PointStore, RawPoint};

#[cfg(test)]
pub(crate) mod test;
