//! Row pivoting and [LU decomposition].
//!
//! [`lu_decompose`] factors a square matrix `M` into a unit lower-triangular matrix `L`, an
//! upper-triangular matrix `U` and a permutation matrix `P` such that `P * M = L * U`. All
//! arithmetic is exact, so the equality holds element by element.
//!
//! The permutation is chosen up front by [`pivotise`], which moves a suitable non-zero entry onto
//! the diagonal of every column. The factorization itself follows the Doolittle scheme and only
//! detects a zero pivot when it is about to divide by it, so singular matrices are reported as
//! [`Error::DivisionByZero`].
//!
//! [LU decomposition]: https://en.wikipedia.org/wiki/LU_decomposition

use std::str::FromStr;

use crate::{Error, Matrix, Result, Scalar, Zero};

/// Rule used by [`pivotise`] to pick the pivot row of each column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotStrategy {
    /// Picks the greatest entry by signed comparison, so `1` is preferred over `-5`.
    Greatest,
    /// Picks the entry with the largest absolute value (classic partial pivoting).
    #[default]
    LargestMagnitude,
}

impl PivotStrategy {
    /// Returns whether `candidate` should replace `best` as the pivot.
    ///
    /// Ties keep the earlier row.
    fn prefers(self, candidate: &Scalar, best: &Scalar) -> bool {
        match self {
            PivotStrategy::Greatest => candidate > best,
            PivotStrategy::LargestMagnitude => candidate.cmp_magnitude(best).is_gt(),
        }
    }
}

/// Whether [`lu_decompose`] reorders rows before factoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pivoting {
    /// Factor the matrix as given; the returned permutation is the identity.
    Disabled,
    /// Reorder rows with [`pivotise`] using the given strategy.
    Enabled(PivotStrategy),
}

impl Default for Pivoting {
    fn default() -> Self {
        Pivoting::Enabled(PivotStrategy::default())
    }
}

/// Error returned when parsing a [`Pivoting`] or [`PivotStrategy`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pivoting mode `{0}` (expected `none`, `greatest` or `magnitude`)")]
pub struct ParsePivotingError(String);

impl FromStr for PivotStrategy {
    type Err = ParsePivotingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "greatest" => Ok(PivotStrategy::Greatest),
            "magnitude" => Ok(PivotStrategy::LargestMagnitude),
            _ => Err(ParsePivotingError(s.to_string())),
        }
    }
}

impl FromStr for Pivoting {
    type Err = ParsePivotingError;

    /// Parses `none`, `greatest` or `magnitude`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(Pivoting::Disabled),
            other => other
                .parse()
                .map(Pivoting::Enabled)
                .map_err(|_| ParsePivotingError(s.to_string())),
        }
    }
}

/// Computes the row permutation used to pivot `matrix`.
///
/// For each column `i`, the rows `i..n` of the (already permuted) matrix are scanned for the best
/// entry according to `strategy`. If that entry is not on the diagonal, its row is swapped with
/// row `i`. The accumulated swaps are returned as a permutation matrix `P`, so that `P * matrix`
/// is the reordered matrix.
///
/// # Errors
///
/// Returns [`Error::NotSquareMatrix`] if `matrix` is not square.
///
/// # Examples
///
/// ```
/// # use exact_linalg::*;
/// let m = Matrix::from_rows([
///     [4, 3],
///     [6, 3],
/// ])?;
/// let p = pivotise(&m, PivotStrategy::Greatest)?;
/// assert_eq!(p, Matrix::from_rows([
///     [0, 1],
///     [1, 0],
/// ])?);
/// # Ok::<_, Error>(())
/// ```
pub fn pivotise(matrix: &Matrix, strategy: PivotStrategy) -> Result<Matrix> {
    let n = matrix.square_size()?;
    let mut p = Matrix::identity(n);
    let mut work = matrix.clone();

    for i in 0..n {
        let mut best = work[(i, i)];
        let mut row = i;
        for j in i + 1..n {
            let candidate = work[(j, i)];
            if strategy.prefers(&candidate, &best) {
                best = candidate;
                row = j;
            }
        }

        if row != i {
            log::trace!("column {i}: pivot {best} found in row {row}, swapping");
            p.swap_rows(i, row)?;
            work.swap_rows(i, row)?;
        } else {
            log::trace!("column {i}: pivot {best} already on the diagonal");
        }
    }

    Ok(p)
}

/// The result of [`lu_decompose`].
///
/// The factors satisfy `p * matrix == l * u`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuDecomposition {
    /// Unit lower-triangular factor.
    pub l: Matrix,
    /// Upper-triangular factor.
    pub u: Matrix,
    /// Row permutation applied to the input.
    pub p: Matrix,
}

impl LuDecomposition {
    /// Multiplies the factors back together, returning `L * U`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if an element of the product overflows.
    pub fn reconstruct(&self) -> Result<Matrix> {
        self.l.product(&self.u)
    }
}

/// Factors the square `matrix` into `L`, `U` and a permutation `P` with `P * matrix = L * U`.
///
/// With [`Pivoting::Disabled`], `P` is the identity and the matrix is factored as given.
///
/// # Errors
///
/// - [`Error::NotSquareMatrix`] if `matrix` is not square.
/// - [`Error::DivisionByZero`] if a zero pivot is encountered, which happens for every singular
///   matrix (and for some non-singular ones that need a different row order).
/// - [`Error::Overflow`] if an intermediate value does not fit in a 64-bit fraction.
///
/// # Examples
///
/// ```
/// # use exact_linalg::*;
/// let m = Matrix::from_rows([
///     [4, 3],
///     [6, 3],
/// ])?;
/// let lu = lu_decompose(&m, Pivoting::default())?;
/// assert_eq!(lu.p.product(&m)?, lu.l.product(&lu.u)?);
/// assert_eq!(lu.u, Matrix::from_rows([
///     [6, 3],
///     [0, 1],
/// ])?);
///
/// let singular = Matrix::from_rows([
///     [1, 2],
///     [2, 4],
/// ])?;
/// assert_eq!(lu_decompose(&singular, Pivoting::default()), Err(Error::DivisionByZero));
/// # Ok::<_, Error>(())
/// ```
pub fn lu_decompose(matrix: &Matrix, pivoting: Pivoting) -> Result<LuDecomposition> {
    let n = matrix.square_size()?;
    let p = match pivoting {
        Pivoting::Disabled => Matrix::identity(n),
        Pivoting::Enabled(strategy) => pivotise(matrix, strategy)?,
    };
    let a = p.product(matrix)?;

    let mut l = Matrix::identity(n);
    let mut u = Matrix::square(n);

    // `Σ_{k<terms} U[k][j] * L[i][k]`
    let partial_sum = |l: &Matrix, u: &Matrix, i: usize, j: usize, terms: usize| {
        (0..terms).try_fold(Scalar::ZERO, |acc, k| acc.try_add(u[(k, j)].try_mul(l[(i, k)])?))
    };

    for j in 0..n {
        for i in 0..=j {
            let sum = partial_sum(&l, &u, i, j, i)?;
            u[(i, j)] = a[(i, j)].try_sub(sum)?;
        }

        let pivot = u[(j, j)];
        if pivot.is_zero() {
            log::debug!("zero pivot in column {j} of {n}x{n} matrix ({pivoting:?})");
            return Err(Error::DivisionByZero);
        }

        for i in j..n {
            let sum = partial_sum(&l, &u, i, j, j)?;
            l[(i, j)] = a[(i, j)].try_sub(sum)?.try_div(pivot)?;
        }
    }

    log::debug!("factored {n}x{n} matrix ({pivoting:?})");
    Ok(LuDecomposition { l, u, p })
}
