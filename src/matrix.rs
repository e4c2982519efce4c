use std::fmt;

use itertools::Itertools;

use crate::{Dim, Error, One, Result, Scalar, Vector};

mod ops;

/// Selects whether [`Matrix::from_vector`] creates a row or a column matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// A `1 x n` matrix.
    Row,
    /// An `n x 1` matrix.
    Column,
}

/// A dense `rows x columns` matrix of [`Scalar`]s, stored as a list of row [`Vector`]s.
///
/// # Construction
///
/// There are several ways to create a [`Matrix`]:
///
/// - [`Matrix::new`] and [`Matrix::square`] create a matrix with every element set to zero.
/// - [`Matrix::identity`] creates a square matrix with 1 on its diagonal and 0 everywhere else.
/// - [`Matrix::from_rows`] fills a matrix from a list of rows, and checks that all rows have the
///   same length.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::from_diagonal`] creates a square matrix with a specified diagonal.
/// - [`Matrix::from_vector`] turns a [`Vector`] into a single row or column.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row*, the second is the *column*. Indices are 0-based, and
/// indexing out of bounds panics.
///
/// [`Matrix::get`] and [`Matrix::set`] are the checked counterparts, and report
/// [`Error::RowOutOfBounds`] or [`Error::ColumnOutOfBounds`] instead.
///
/// ```
/// # use exact_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1],
/// ])?;
/// mat[(0, 0)] = Scalar::from_int(4);
/// assert_eq!(mat.get(0, 0)?, Scalar::from_int(4));
/// assert_eq!(mat.get(0, 2), Err(Error::ColumnOutOfBounds { column: 2, columns: 2 }));
/// # Ok::<_, Error>(())
/// ```
///
/// Rows, columns and the diagonal are always returned as independent copies.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vector>,
    columns: usize,
}

impl Matrix {
    /// Creates a `rows x columns` matrix with every element set to zero.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![Vector::new(columns); rows],
            columns,
        }
    }

    /// Creates an `n x n` matrix with every element set to zero.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Creates the `n x n` identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// assert_eq!(Matrix::identity(2), Matrix::from_rows([
    ///     [1, 0],
    ///     [0, 1],
    /// ])?);
    /// # Ok::<_, Error>(())
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut this = Self::square(n);
        for i in 0..n {
            this[(i, i)] = Scalar::ONE;
        }
        this
    }

    /// Creates a [`Matrix`] from a list of rows.
    ///
    /// The first row determines the number of columns. An empty list creates a `0 x 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the rows do not all have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ])?;
    /// assert_eq!((mat.rows(), mat.columns()), (2, 3));
    ///
    /// let ragged = Matrix::from_rows([
    ///     Vector::from([1, 2]),
    ///     Vector::from([3]),
    /// ]);
    /// assert!(matches!(ragged, Err(Error::DimensionMismatch { .. })));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Vector>,
    {
        let rows = rows.into_iter().map(Into::into).collect::<Vec<Vector>>();
        let columns = rows.first().map_or(0, Vector::len);
        if let Some(row) = rows.iter().find(|row| row.len() != columns) {
            return Err(Error::DimensionMismatch {
                lhs: Dim::Vector(columns),
                rhs: Dim::Vector(row.len()),
            });
        }
        Ok(Self { rows, columns })
    }

    /// Creates a `rows x columns` matrix by invoking a closure with the position (row and column)
    /// of each element.
    pub fn from_fn<F>(rows: usize, columns: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> Scalar,
    {
        Self {
            rows: (0..rows)
                .map(|row| Vector::from_fn(columns, |col| cb(row, col)))
                .collect(),
            columns,
        }
    }

    /// Creates a square matrix from its diagonal.
    ///
    /// Elements outside the diagonal are zero.
    pub fn from_diagonal(diagonal: &Vector) -> Self {
        let mut this = Self::square(diagonal.len());
        for (i, elem) in diagonal.iter().enumerate() {
            this[(i, i)] = *elem;
        }
        this
    }

    /// Creates a single-row (`1 x n`) or single-column (`n x 1`) matrix from a vector of length
    /// `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let v = Vector::from([1, 2, 3]);
    /// let row = Matrix::from_vector(&v, Orientation::Row);
    /// let col = Matrix::from_vector(&v, Orientation::Column);
    /// assert_eq!((row.rows(), row.columns()), (1, 3));
    /// assert_eq!(col, row.transpose());
    /// ```
    pub fn from_vector(vector: &Vector, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Row => Self {
                rows: vec![vector.clone()],
                columns: vector.len(),
            },
            Orientation::Column => Self {
                rows: vector.iter().map(|elem| Vector::from([*elem])).collect(),
                columns: 1,
            },
        }
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn dim(&self) -> Dim {
        Dim::Matrix(self.rows(), self.columns())
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }

    /// Returns the size of this matrix if it is square.
    pub(crate) fn square_size(&self) -> Result<usize> {
        if !self.is_square() {
            return Err(Error::NotSquareMatrix {
                rows: self.rows(),
                columns: self.columns(),
            });
        }
        Ok(self.rows())
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows() {
            return Err(Error::RowOutOfBounds {
                row,
                rows: self.rows(),
            });
        }
        Ok(())
    }

    fn check_column(&self, column: usize) -> Result<()> {
        if column >= self.columns() {
            return Err(Error::ColumnOutOfBounds {
                column,
                columns: self.columns(),
            });
        }
        Ok(())
    }

    fn check_same_dim(&self, other: &Self) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(Error::DimensionMismatch {
                lhs: self.dim(),
                rhs: other.dim(),
            });
        }
        Ok(())
    }

    /// Returns a copy of the element at `(row, column)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] or [`Error::ColumnOutOfBounds`] if the position lies
    /// outside the matrix.
    pub fn get(&self, row: usize, column: usize) -> Result<Scalar> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self[(row, column)])
    }

    /// Overwrites the element at `(row, column)` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] or [`Error::ColumnOutOfBounds`] if the position lies
    /// outside the matrix.
    pub fn set(&mut self, row: usize, column: usize, value: Scalar) -> Result<()> {
        self.check_row(row)?;
        self.check_column(column)?;
        self[(row, column)] = value;
        Ok(())
    }

    /// Returns a copy of row `row`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] if `row` is not less than [`Matrix::rows`].
    pub fn row(&self, row: usize) -> Result<Vector> {
        self.check_row(row)?;
        Ok(self.rows[row].clone())
    }

    /// Returns a copy of column `column`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnOutOfBounds`] if `column` is not less than [`Matrix::columns`].
    pub fn column(&self, column: usize) -> Result<Vector> {
        self.check_column(column)?;
        Ok(self.rows.iter().map(|row| row[column]).collect())
    }

    /// Returns a copy of the leading diagonal.
    ///
    /// For non-square matrices the diagonal holds `min(rows, columns)` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2, 3],
    ///     [4, 5, 6],
    /// ])?;
    /// assert_eq!(mat.diagonal(), Vector::from([1, 5]));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn diagonal(&self) -> Vector {
        let len = self.rows().min(self.columns());
        Vector::from_fn(len, |i| self[(i, i)])
    }

    /// Returns an iterator over the rows of the matrix.
    pub fn iter_rows(&self) -> std::slice::Iter<'_, Vector> {
        self.rows.iter()
    }

    /// Swaps rows `a` and `b`.
    ///
    /// The rows are moved as a whole; no elements are copied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RowOutOfBounds`] if either row does not exist.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.rows.swap(a, b);
        Ok(())
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ])?.transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ])?);
    /// # Ok::<_, Error>(())
    /// ```
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.columns(), self.rows(), |row, col| self[(col, row)])
    }

    /// Computes the matrix product `self * rhs`.
    ///
    /// Element `(i, j)` of the result is the dot product of row `i` of `self` and column `j` of
    /// `rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the number of columns of `self` differs from the
    /// number of rows of `rhs`, and [`Error::Overflow`] if an element overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let a = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ])?;
    /// let b = Matrix::from_rows([
    ///     [5],
    ///     [6],
    /// ])?;
    /// assert_eq!(a.product(&b)?, Matrix::from_rows([[17], [39]])?);
    /// assert!(matches!(b.product(&a), Err(Error::DimensionMismatch { .. })));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn product(&self, rhs: &Self) -> Result<Self> {
        if self.columns() != rhs.rows() {
            return Err(Error::DimensionMismatch {
                lhs: self.dim(),
                rhs: rhs.dim(),
            });
        }

        // Rows of the transpose are the columns of `rhs`.
        let rhs_t = rhs.transpose();
        let rows = self
            .rows
            .iter()
            .map(|row| rhs_t.rows.iter().map(|col| row.dot(col)).collect::<Result<Vector>>())
            .collect::<Result<Vec<Vector>>>()?;

        Ok(Self {
            rows,
            columns: rhs.columns(),
        })
    }

    fn try_zip_with<F>(&self, other: &Self, op: F) -> Result<Self>
    where
        F: Fn(&Vector, &Vector) -> Result<Vector>,
    {
        self.check_same_dim(other)?;
        let rows = self
            .rows
            .iter()
            .zip_eq(&other.rows)
            .map(|(a, b)| op(a, b))
            .collect::<Result<_>>()?;
        Ok(Self {
            rows,
            columns: self.columns,
        })
    }

    /// Element-wise sum of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the matrices differ in shape, and
    /// [`Error::Overflow`] if an element overflows.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.try_zip_with(other, Vector::try_add)
    }

    /// Element-wise difference of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the matrices differ in shape, and
    /// [`Error::Overflow`] if an element overflows.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.try_zip_with(other, Vector::try_sub)
    }

    /// Multiplies every element by `factor`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if an element overflows. `self` is left unchanged in that
    /// case.
    pub fn scale(&mut self, factor: Scalar) -> Result<()> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.try_map(|elem| elem.try_mul(factor)))
            .collect::<Result<_>>()?;
        self.rows = rows;
        Ok(())
    }

    /// Returns whether every element above the diagonal is zero.
    pub fn is_lower_triangular(&self) -> bool {
        self.iter_rows()
            .enumerate()
            .all(|(i, row)| row.iter().skip(i + 1).all(Scalar::is_zero))
    }

    /// Returns whether every element below the diagonal is zero.
    pub fn is_upper_triangular(&self) -> bool {
        self.iter_rows()
            .enumerate()
            .all(|(i, row)| row.iter().take(i.min(self.columns)).all(Scalar::is_zero))
    }
}

impl fmt::Display for Matrix {
    /// Formats the matrix row by row, one row per line:
    ///
    /// ```text
    /// [[1 0]
    ///  [0 1]]
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter_rows().format("\n "))
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in &self.rows {
            list.entry(row);
        }
        list.finish()
    }
}
