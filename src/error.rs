use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KdIndexError {
    #[error("General error: {0}")]
    General(String),

    #[error("Buffer holds {actual} elements but {expected} were declared.")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Got a {actual}-dimensional coordinate for a {expected}-dimensional index.")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, KdIndexError>;
