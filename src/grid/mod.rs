//! An implementation of an immutable latitude/longitude grid index for nearest-neighbor
//! queries on the sphere.
//!
//! The sphere is cut into uniform cells; each cell holds the ids of the points inside it.
//! Queries search rings of cells outward from the query's cell, wrapping at the antimeridian
//! and clamping at the poles, and stop as soon as no unvisited cell can hold a closer point.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::{GridIndexBuilder, DEFAULT_POINTS_PER_CELL, MAX_CELL_SIZE, MIN_CELL_SIZE};
pub use index::{Cell, GridIndex, GridMetadata};

#[cfg(test)]
mod test;
