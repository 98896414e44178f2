//! Error types for galvani-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("singular matrix")]
    SingularMatrix,

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid circuit: {0}")]
    InvalidCircuit(String),

    #[error(transparent)]
    Assembly(#[from] galvani_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
