//! Indexing and conversion impls.

use std::{
    ops::{Index, IndexMut},
    slice,
};

use crate::Scalar;

use super::Vector;

impl Index<usize> for Vector {
    type Output = Scalar;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl<T, const N: usize> From<[T; N]> for Vector
where
    T: Into<Scalar>,
{
    fn from(elems: [T; N]) -> Self {
        elems.into_iter().map(Into::into).collect()
    }
}

impl From<Vec<Scalar>> for Vector {
    fn from(elems: Vec<Scalar>) -> Self {
        Self(elems.into_boxed_slice())
    }
}

impl From<Vector> for Vec<Scalar> {
    fn from(v: Vector) -> Self {
        v.0.into_vec()
    }
}

impl FromIterator<Scalar> for Vector {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a Scalar;
    type IntoIter = slice::Iter<'a, Scalar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[Scalar]> for Vector {
    fn eq(&self, other: &[Scalar]) -> bool {
        *self.0 == *other
    }
}

impl<const N: usize> PartialEq<[Scalar; N]> for Vector {
    fn eq(&self, other: &[Scalar; N]) -> bool {
        *self.0 == other[..]
    }
}
