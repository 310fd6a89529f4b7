//! Error types shared by the transform and streaming engines

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DspError {
    #[error("Input length must be non-zero")]
    EmptyInput,

    #[error("Transform length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    #[error("Bin {bin} is out of range for length {len}")]
    BinOutOfRange { bin: usize, len: usize },

    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to allocate buffer of {0} elements")]
    Allocation(usize),
}

pub type Result<T> = std::result::Result<T, DspError>;
