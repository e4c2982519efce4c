//! Error type shared by all fallible operations.

use std::fmt;

use thiserror::Error;

/// Convenience alias for results carrying an [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The shape of an operand, as reported by [`Error::DimensionMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    /// A vector with the given number of elements.
    Vector(usize),
    /// A matrix with the given number of rows and columns.
    Matrix(usize, usize),
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::Vector(len) => write!(f, "vector of length {len}"),
            Dim::Matrix(rows, columns) => write!(f, "{rows}x{columns} matrix"),
        }
    }
}

/// Errors reported by scalar, vector and matrix operations.
///
/// Every operation either completes or returns one of these without touching its operands, so a
/// caller can recover from a singular matrix or a shape mismatch and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch: {lhs} is incompatible with {rhs}")]
    DimensionMismatch { lhs: Dim, rhs: Dim },

    #[error("index {index} is out of bounds for vector of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("row {row} is out of bounds for matrix with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("column {column} is out of bounds for matrix with {columns} columns")]
    ColumnOutOfBounds { column: usize, columns: usize },

    /// A square-only operation was given a `rows x columns` matrix.
    #[error("expected a square matrix, got a {rows}x{columns} matrix")]
    NotSquareMatrix { rows: usize, columns: usize },

    /// A zero divisor was encountered (inversion, division, or a zero LU pivot).
    #[error("division by zero")]
    DivisionByZero,

    /// The reduced numerator or denominator of a result does not fit in 64 bits.
    #[error("arithmetic overflow: result does not fit in a 64-bit fraction")]
    Overflow,

    /// A string could not be parsed as a scalar.
    #[error("invalid scalar literal `{0}`")]
    InvalidLiteral(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::DimensionMismatch {
            lhs: Dim::Matrix(2, 3),
            rhs: Dim::Matrix(2, 3),
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: 2x3 matrix is incompatible with 2x3 matrix"
        );
        assert_eq!(
            Error::IndexOutOfBounds { index: 4, len: 4 }.to_string(),
            "index 4 is out of bounds for vector of length 4"
        );
        assert_eq!(
            Error::NotSquareMatrix {
                rows: 1,
                columns: 2
            }
            .to_string(),
            "expected a square matrix, got a 1x2 matrix"
        );
        assert_eq!(Dim::Vector(3).to_string(), "vector of length 3");
    }
}
