use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorError>;

/// Failures raised by vector, ragged-array and histogram operations.
///
/// Numeric edge cases (division by zero, square roots of negative squared
/// masses) are never errors; they propagate as IEEE-754 values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VectorError {
    #[error("shape mismatch: expected length {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: isize, len: usize },
    #[error("invalid offsets: {0}")]
    InvalidOffsets(String),
    #[error("invalid binning: {0}")]
    InvalidBinning(String),
}

pub fn unsupported(message: &str) -> VectorError {
    VectorError::UnsupportedOperation(message.to_string())
}

/// Unwrap a shape check inside an operator overload, panicking with the error message.
pub(crate) fn expect_shape<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{}", e),
    }
}
