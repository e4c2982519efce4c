//! Exact rational linear algebra.
//!
//! All values are [`Scalar`]s: signed fractions with 64-bit numerator and denominator that are
//! kept in lowest terms. On top of them, this crate provides dense [`Vector`]s and [`Matrix`]es,
//! and an [LU decomposition](lu_decompose) with row pivoting. Since there is no rounding, results
//! like `P * M == L * U` hold exactly.
//!
//! ```
//! # use exact_linalg::*;
//! let m = Matrix::from_rows([
//!     [1, 3, 5],
//!     [2, 4, 7],
//!     [1, 1, 0],
//! ])?;
//! let lu = lu_decompose(&m, Pivoting::default())?;
//! assert_eq!(lu.p.product(&m)?, lu.reconstruct()?);
//! assert_eq!(lu.u[(2, 2)], Scalar::from_int(-2));
//! # Ok::<_, Error>(())
//! ```
//!
//! # Goals & Non-Goals
//!
//! - Exactness over range. Numerators and denominators are fixed-width; results that do not fit
//!   are reported as [`Error::Overflow`] rather than wrapped or rounded. Arbitrary-precision
//!   integers are out of scope.
//! - Small to medium dense matrices. There are no sparse representations, and nothing is
//!   parallelized.
//! - Every fallible operation returns a [`Result`]. Operands are never modified by an operation
//!   that reports an error, so callers can recover from singular matrices and mismatched shapes.
//!   The [`std::ops`] operator impls are provided for convenience and panic instead.
//!
//! # Logging
//!
//! Pivot selection and decomposition progress are logged through the [`log`] crate, at *trace*
//! and *debug* level respectively.

mod decompose;
mod error;
mod matrix;
mod scalar;
mod traits;
mod vector;

pub use decompose::*;
pub use error::*;
pub use matrix::*;
pub use scalar::*;
pub use traits::*;
pub use vector::*;
