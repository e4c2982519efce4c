use std::ops::{Index, IndexMut, Mul};

use crate::{Matrix, Scalar};

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.rows[row][col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.rows[row][col]
    }
}

/// Matrix * Matrix.
///
/// Panics where [`Matrix::product`] would return an error.
impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    #[track_caller]
    fn mul(self, rhs: &Matrix) -> Self::Output {
        match self.product(rhs) {
            Ok(product) => product,
            Err(e) => panic!("matrix multiplication failed: {e}"),
        }
    }
}
