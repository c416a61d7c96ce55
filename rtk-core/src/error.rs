/// Error types for the geometry kernel
use thiserror::Error;

/// Errors raised by matrix, tuple and transformation operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Index outside the matrix extent, or an invalid submatrix request
    #[error("index ({row}, {col}) is out of bounds for a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Shapes are incompatible for the requested operation
    #[error("{operation} is not defined for shapes {lhs:?} and {rhs:?}")]
    DimensionMismatch {
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Non-positive dimension or empty/ragged initializer
    #[error("invalid values for matrix initialization: {0}")]
    InvalidInitialValues(String),

    /// Determinant is within tolerance of zero
    #[error("matrix is not invertible (determinant {determinant})")]
    MatrixNotInvertible { determinant: f64 },

    /// Division by a scalar within tolerance of zero
    #[error("cannot divide {0} by zero")]
    DivisionByZero(String),
}

/// Result type for geometry operations
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;
