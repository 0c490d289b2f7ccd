//! Error types for numval

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using numval's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in numval operations
#[derive(Error, Debug)]
pub enum Error {
    /// Array-like value has a rank the comparator cannot handle
    #[error("Unsupported rank {ndim}: only rank 1 (vector) and rank 2 (matrix) are handled")]
    Rank {
        /// Number of dimensions of the offending value
        ndim: usize,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs:?} vs {rhs:?}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// Operands cannot be compared against each other
    #[error("Cannot compare {lhs} with {rhs}")]
    UnsupportedComparison {
        /// Kind of the left-hand operand
        lhs: &'static str,
        /// Kind of the right-hand operand
        rhs: &'static str,
    },

    /// View extents exceed the backing container
    #[error("View [{start}, {stop}) out of bounds for container of length {len}")]
    ViewOutOfBounds {
        /// View start (inclusive)
        start: usize,
        /// View stop (exclusive)
        stop: usize,
        /// Backing extent along the dimension
        len: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a dtype mismatch error
    pub fn dtype_mismatch(lhs: DType, rhs: DType) -> Self {
        Self::DTypeMismatch { lhs, rhs }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
