//! Error types for galvani-core.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("duplicate element name: {0}")]
    DuplicateName(String),

    #[error("element {name} has non-finite value {value}")]
    NonFiniteValue { name: String, value: f64 },

    #[error("no element at index {index} (circuit has {len})")]
    BadElementIndex { index: usize, len: usize },

    #[error("stamp value is NaN")]
    NanValue,

    #[error("system dimension {0} is too small to stamp")]
    SystemTooSmall(usize),

    #[error("index {index} out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },

    #[error("element {0} is already stamped")]
    AlreadyStamped(String),

    #[error("element {0} is missing from its source sub-list")]
    SourceListMismatch(String),
}

pub type Result<T> = std::result::Result<T, Error>;
