use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GlobeIndexError {
    /// The input dataset is empty or malformed. Raised while building a store or index.
    #[error("Data error: {0}")]
    Data(String),

    /// The caller passed an argument the query cannot satisfy, such as `k == 0`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No point with this id exists in the store.
    #[error("No point with id {0}")]
    NotFound(u32),
}

pub type Result<T> = std::result::Result<T, GlobeIndexError>;
