use std::{fmt, slice};

use itertools::Itertools;

use crate::{Dim, Error, Result, Scalar, Zero};

mod ops;

/// A fixed-length sequence of [`Scalar`]s.
///
/// The length of a [`Vector`] is chosen when it is created and cannot change afterwards.
///
/// # Construction
///
/// - [`Vector::new`] creates a vector of the given length with every element set to zero.
/// - [`Vector::from_fn`] creates each element by invoking a closure with its index.
/// - Vectors can be created from arrays of anything convertible to [`Scalar`] (like integers),
///   from a [`Vec<Scalar>`], or collected from an iterator of [`Scalar`]s.
///
/// # Element Access
///
/// [`Vector::get`] and [`Vector::set`] are checked and return [`Error::IndexOutOfBounds`] for an
/// index past the end. The [`Index`] and [`IndexMut`] impls panic instead, like they do for
/// slices.
///
/// ```
/// # use exact_linalg::*;
/// let mut v = Vector::from([1, 2, 3]);
/// v.set(0, Scalar::from_int(-1))?;
/// assert_eq!(v.get(0)?, Scalar::from_int(-1));
/// assert_eq!(v[2], Scalar::from_int(3));
/// assert_eq!(v.get(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
/// # Ok::<_, Error>(())
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, PartialEq, Eq)]
pub struct Vector(Box<[Scalar]>);

impl Vector {
    /// Creates a vector of length `len` with every element set to zero.
    pub fn new(len: usize) -> Self {
        Self(vec![Scalar::ZERO; len].into_boxed_slice())
    }

    /// Creates a vector of length `len` where each element is initialized by invoking a closure
    /// with its index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let v = Vector::from_fn(3, |i| Scalar::from_int(i as i64 * 10));
    /// assert_eq!(v, Vector::from([0, 10, 20]));
    /// ```
    pub fn from_fn<F>(len: usize, cb: F) -> Self
    where
        F: FnMut(usize) -> Scalar,
    {
        (0..len).map(cb).collect()
    }

    /// Applies a closure to each element, returning a new vector.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(Scalar) -> Scalar,
    {
        self.0.iter().copied().map(f).collect()
    }

    /// Applies a fallible closure to each element, returning a new vector or the first error.
    pub(crate) fn try_map<F>(&self, f: F) -> Result<Self>
    where
        F: FnMut(Scalar) -> Result<Scalar>,
    {
        self.0.iter().copied().map(f).collect()
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.0
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Scalar> {
        self.0.iter()
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is not less than [`Vector::len`].
    pub fn get(&self, index: usize) -> Result<Scalar> {
        self.0
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Overwrites the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is not less than [`Vector::len`].
    pub fn set(&mut self, index: usize, value: Scalar) -> Result<()> {
        let len = self.len();
        let elem = self
            .0
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *elem = value;
        Ok(())
    }

    fn check_same_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                lhs: Dim::Vector(self.len()),
                rhs: Dim::Vector(other.len()),
            });
        }
        Ok(())
    }

    /// Applies `op` to each pair of elements of `self` and `other`.
    fn try_zip_with<F>(&self, other: &Self, mut op: F) -> Result<Self>
    where
        F: FnMut(Scalar, Scalar) -> Result<Scalar>,
    {
        self.check_same_len(other)?;
        self.iter()
            .zip_eq(other.iter())
            .map(|(&a, &b)| op(a, b))
            .collect()
    }

    /// Element-wise sum of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the vectors differ in length, and
    /// [`Error::Overflow`] if an element overflows.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.try_zip_with(other, Scalar::try_add)
    }

    /// Element-wise difference of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the vectors differ in length, and
    /// [`Error::Overflow`] if an element overflows.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.try_zip_with(other, Scalar::try_sub)
    }

    /// Computes the dot product `Σ self[i] * other[i]`.
    ///
    /// The dot product of two empty vectors is zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the vectors differ in length, and
    /// [`Error::Overflow`] if a product or partial sum overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let a = Vector::from([1, 3, -5]);
    /// let b = Vector::from([4, -2, -1]);
    /// assert_eq!(a.dot(&b)?, Scalar::from_int(3));
    ///
    /// let c = Vector::from([1, 2]);
    /// assert!(matches!(a.dot(&c), Err(Error::DimensionMismatch { .. })));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn dot(&self, other: &Self) -> Result<Scalar> {
        self.check_same_len(other)?;
        self.iter()
            .zip_eq(other.iter())
            .try_fold(Scalar::ZERO, |acc, (&a, &b)| acc.try_add(a.try_mul(b)?))
    }

    /// Multiplies every element by `factor`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if an element overflows. `self` is left unchanged in that
    /// case.
    pub fn scale(&mut self, factor: Scalar) -> Result<()> {
        *self = self.try_map(|elem| elem.try_mul(factor))?;
        Ok(())
    }
}

impl fmt::Display for Vector {
    /// Formats the vector as `[a b c]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().format(" "))
    }
}

impl fmt::Debug for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::One;

    use super::*;

    #[test]
    fn construction() {
        let v = Vector::new(3);
        assert_eq!(v.len(), 3);
        assert!(v.iter().all(|s| *s == Scalar::ZERO));
        assert!(Vector::new(0).is_empty());

        assert_eq!(
            Vector::from([1, -2]),
            Vector::from(vec![Scalar::ONE, Scalar::from_int(-2)])
        );
    }

    #[test]
    fn access() {
        let mut v = Vector::from([1, 2, 3]);
        assert_eq!(v.get(1).unwrap(), Scalar::from_int(2));
        assert_eq!(v.get(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));

        v.set(1, Scalar::from_int(-7)).unwrap();
        assert_eq!(v, Vector::from([1, -7, 3]));
        assert_eq!(
            v.set(5, Scalar::ONE),
            Err(Error::IndexOutOfBounds { index: 5, len: 3 })
        );

        v[2] = Scalar::ZERO;
        assert_eq!(v.as_slice(), &[Scalar::ONE, Scalar::from_int(-7), Scalar::ZERO]);
    }

    #[test]
    fn add_sub() {
        let a = Vector::from([1, 2, 3]);
        let b = Vector::from([3, -2, 0]);
        assert_eq!(a.try_add(&b).unwrap(), Vector::from([4, 0, 3]));
        assert_eq!(a.try_sub(&b).unwrap(), Vector::from([-2, 4, 3]));
        // Operands are not modified.
        assert_eq!(b, Vector::from([3, -2, 0]));

        let c = Vector::from([1]);
        assert_eq!(
            a.try_add(&c),
            Err(Error::DimensionMismatch {
                lhs: Dim::Vector(3),
                rhs: Dim::Vector(1),
            })
        );
        assert!(a.try_sub(&c).is_err());
    }

    #[test]
    fn dot() {
        let a = Vector::from([1, 3, -5]);
        assert_eq!(a.dot(&Vector::from([4, -2, -1])).unwrap(), Scalar::from_int(3));
        assert_eq!(a.dot(&a).unwrap(), Scalar::from_int(35));
        assert_eq!(Vector::new(0).dot(&Vector::new(0)).unwrap(), Scalar::ZERO);

        let halves = Vector::from_fn(4, |_| Scalar::new(1, 2, false).unwrap());
        assert_eq!(halves.dot(&halves).unwrap(), Scalar::ONE);
    }

    #[test]
    fn scale() {
        let mut v = Vector::from([2, -4, 0]);
        v.scale(Scalar::new(1, 2, true).unwrap()).unwrap();
        assert_eq!(v, Vector::from([-1, 2, 0]));

        let mut big = Vector::from([1, i64::MAX]);
        assert_eq!(big.scale(Scalar::from_int(4)), Err(Error::Overflow));
        assert_eq!(big, Vector::from([1, i64::MAX]));
    }

    #[test]
    fn fmt() {
        let v = Vector::from_fn(3, |i| Scalar::new(i as u64, 2, i == 1).unwrap());
        assert_eq!(v.to_string(), "[0 -1/2 1]");
        assert_eq!(format!("{v:?}"), "[0, -1/2, 1]");
        assert_eq!(Vector::new(0).to_string(), "[]");
    }
}
