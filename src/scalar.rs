use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{Error, One, Result, Zero};

mod ops;

/// An exact signed fraction with 64-bit numerator and denominator.
///
/// A [`Scalar`] is always kept in lowest terms: the denominator is at least 1, numerator and
/// denominator share no common factor, and zero is always represented as `0/1` with a positive
/// sign. Because of that, two scalars are equal exactly when their parts are equal.
///
/// # Arithmetic
///
/// The `try_*` methods ([`Scalar::try_add`], [`Scalar::try_sub`], [`Scalar::try_mul`],
/// [`Scalar::try_div`], ...) compute the exact result and report division by zero or a result
/// that no longer fits in 64 bits as an [`Error`]. Intermediate values are computed with 128-bit
/// integers, so only the *reduced* result has to fit.
///
/// The [`std::ops`] operator traits are implemented as well. Like the integer operators they
/// panic on the conditions the `try_*` methods report.
///
/// ```
/// # use exact_linalg::*;
/// let half = Scalar::new(1, 2, false)?;
/// let third = Scalar::new(1, 3, false)?;
/// assert_eq!(half.try_add(third)?, Scalar::new(5, 6, false)?);
/// assert_eq!(half - third, Scalar::new(1, 6, false)?);
/// assert_eq!(half.try_div(Scalar::ZERO), Err(Error::DivisionByZero));
/// # Ok::<_, Error>(())
/// ```
///
/// # Formatting
///
/// The [`Display`](fmt::Display) impl prints the canonical form: `0`, `a`, `-a`, `a/b` or `-a/b`.
/// The same syntax is accepted by the [`FromStr`] impl.
#[derive(Clone, Copy)]
pub struct Scalar {
    negative: bool,
    numerator: u64,
    denominator: u64,
}

impl Zero for Scalar {
    const ZERO: Self = Self {
        negative: false,
        numerator: 0,
        denominator: 1,
    };
}

impl One for Scalar {
    const ONE: Self = Self {
        negative: false,
        numerator: 1,
        denominator: 1,
    };
}

impl Scalar {
    /// Creates the scalar `numerator / denominator`, negated if `negative` is set.
    ///
    /// The fraction is reduced to lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] if `denominator` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let s = Scalar::new(6, 8, true)?;
    /// assert_eq!(s.numerator(), 3);
    /// assert_eq!(s.denominator(), 4);
    /// assert!(s.is_negative());
    /// assert_eq!(s.to_string(), "-3/4");
    /// # Ok::<_, Error>(())
    /// ```
    pub fn new(numerator: u64, denominator: u64, negative: bool) -> Result<Self> {
        if denominator == 0 {
            return Err(Error::DivisionByZero);
        }
        Self::reduced(negative, numerator.into(), denominator.into())
    }

    /// Creates a scalar holding the integer `n`.
    pub const fn from_int(n: i64) -> Self {
        Self {
            negative: n < 0,
            numerator: n.unsigned_abs(),
            denominator: 1,
        }
    }

    /// Builds a scalar from 128-bit intermediates, reducing it and narrowing back to 64 bits.
    fn reduced(negative: bool, numerator: u128, denominator: u128) -> Result<Self> {
        debug_assert_ne!(denominator, 0);
        let (numerator, denominator) = normalize(numerator, denominator);
        let numerator = u64::try_from(numerator).map_err(|_| Error::Overflow)?;
        let denominator = u64::try_from(denominator).map_err(|_| Error::Overflow)?;
        Ok(Self {
            negative: negative && numerator != 0,
            numerator,
            denominator,
        })
    }

    /// Returns the (unsigned) numerator.
    #[inline]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator, which is always at least 1.
    #[inline]
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Returns whether this scalar is strictly less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Returns the absolute value of `self`.
    pub const fn abs(self) -> Self {
        Self {
            negative: false,
            ..self
        }
    }

    /// Compares the absolute values of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// use std::cmp::Ordering;
    ///
    /// let a = Scalar::from_int(-6);
    /// let b = Scalar::from_int(4);
    /// assert_eq!(a.cmp(&b), Ordering::Less);
    /// assert_eq!(a.cmp_magnitude(&b), Ordering::Greater);
    /// ```
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }

        let (x, y, _) = rescale(self, other);
        x.cmp(&y)
    }

    /// Computes `self + rhs`.
    ///
    /// When the operands have different signs, the result takes the sign of the operand with the
    /// larger magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the reduced result does not fit in 64 bits.
    pub fn try_add(self, rhs: Self) -> Result<Self> {
        if self.is_zero() && rhs.is_zero() {
            return Ok(Self::ZERO);
        }

        let (x, y, denominator) = if self.denominator == rhs.denominator {
            (
                u128::from(self.numerator),
                u128::from(rhs.numerator),
                u128::from(self.denominator),
            )
        } else {
            rescale(&self, &rhs)
        };

        let (negative, numerator) = if self.negative == rhs.negative {
            (self.negative, x.checked_add(y).ok_or(Error::Overflow)?)
        } else if x >= y {
            (self.negative, x - y)
        } else {
            (rhs.negative, y - x)
        };

        Self::reduced(negative, numerator, denominator)
    }

    /// Computes `self - rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the reduced result does not fit in 64 bits.
    pub fn try_sub(self, rhs: Self) -> Result<Self> {
        self.try_add(-rhs)
    }

    /// Computes `self * rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the reduced result does not fit in 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let a = Scalar::new(1, 2, false)?;
    /// let b = Scalar::new(1, 2, true)?;
    /// let c = a.try_mul(b)?;
    /// assert_eq!(c.to_string(), "-1/4");
    /// assert_eq!(c.try_mul(c)?.to_string(), "1/16");
    ///
    /// let big = Scalar::from_int(i64::MAX);
    /// assert_eq!(big.try_mul(big), Err(Error::Overflow));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn try_mul(self, rhs: Self) -> Result<Self> {
        let numerator = u128::from(self.numerator) * u128::from(rhs.numerator);
        let denominator = u128::from(self.denominator) * u128::from(rhs.denominator);
        Self::reduced(self.negative != rhs.negative, numerator, denominator)
    }

    /// Computes `self / rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] if `rhs` is zero, and [`Error::Overflow`] if the reduced
    /// result does not fit in 64 bits.
    pub fn try_div(self, rhs: Self) -> Result<Self> {
        self.try_mul(rhs.try_inverse()?)
    }

    /// Computes the multiplicative inverse `1 / self`, keeping the sign.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] if `self` is zero.
    pub fn try_inverse(self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Self::reduced(
            self.negative,
            self.denominator.into(),
            self.numerator.into(),
        )
    }

    /// Multiplies `self` by the integer `factor`, negating the result if `negate` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the reduced result does not fit in 64 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let third = Scalar::new(1, 3, false)?;
    /// assert_eq!(third.try_scale(6, true)?, Scalar::from_int(-2));
    /// # Ok::<_, Error>(())
    /// ```
    pub fn try_scale(self, factor: u64, negate: bool) -> Result<Self> {
        Self::reduced(
            self.negative != negate,
            u128::from(self.numerator) * u128::from(factor),
            self.denominator.into(),
        )
    }

    /// Returns the length in bytes of the [`Display`](fmt::Display) representation of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use exact_linalg::*;
    /// let s = Scalar::new(10, 3, true)?;
    /// assert_eq!(s.display_len(), "-10/3".len());
    /// assert_eq!(Scalar::ZERO.display_len(), 1);
    /// # Ok::<_, Error>(())
    /// ```
    pub fn display_len(&self) -> usize {
        let mut len = decimal_digits(self.numerator);
        if self.numerator != 0 && self.denominator != 1 {
            len += 1 + decimal_digits(self.denominator);
        }
        if self.negative {
            len += 1;
        }
        len
    }

    /// Converts `self` to the nearest [`f64`] (lossy).
    pub fn to_f64(self) -> f64 {
        let value = self.numerator as f64 / self.denominator as f64;
        if self.negative {
            -value
        } else {
            value
        }
    }
}

/// Reduces `numerator / denominator` to lowest terms.
///
/// Zero is mapped to `0/1`. Applying this to an already reduced fraction returns it unchanged.
fn normalize(numerator: u128, denominator: u128) -> (u128, u128) {
    if numerator == 0 {
        return (0, 1);
    }
    if denominator == 1 {
        return (numerator, 1);
    }
    if numerator == denominator {
        return (1, 1);
    }

    let gcd = gcd(numerator, denominator);
    (numerator / gcd, denominator / gcd)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

fn lcm(a: u128, b: u128) -> u128 {
    a / gcd(a, b) * b
}

/// Rescales the magnitudes of `x` and `y` to their least common denominator.
///
/// Returns both numerators and the common denominator. None of the products can overflow, since
/// every factor fits in 64 bits.
fn rescale(x: &Scalar, y: &Scalar) -> (u128, u128, u128) {
    let xd = u128::from(x.denominator);
    let yd = u128::from(y.denominator);
    let lcm = lcm(xd, yd);
    (
        u128::from(x.numerator) * (lcm / xd),
        u128::from(y.numerator) * (lcm / yd),
        lcm,
    )
}

fn decimal_digits(mut n: u64) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

impl Default for Scalar {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }

        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => self.cmp_magnitude(other).reverse(),
        }
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Self::from_int(n.into())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        Self {
            negative: false,
            numerator: n,
            denominator: 1,
        }
    }
}

impl FromStr for Scalar {
    type Err = Error;

    /// Parses `a`, `-a`, `a/b` or `-a/b` (a leading `+` is also accepted).
    ///
    /// The result is reduced, so `"4/6"` parses to `2/3`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidLiteral(s.to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let parse = |digits: &str| {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.parse::<u64>().map_err(|_| invalid())
        };

        match rest.split_once('/') {
            Some((numerator, denominator)) => {
                Self::new(parse(numerator)?, parse(denominator)?, negative)
            }
            None => Self::new(parse(rest)?, 1, negative),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator == 0 {
            return write!(f, "0");
        }
        if self.negative {
            write!(f, "-")?;
        }
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(numerator: u64, denominator: u64, negative: bool) -> Scalar {
        Scalar::new(numerator, denominator, negative).unwrap()
    }

    fn random_scalar(rng: &mut fastrand::Rng) -> Scalar {
        frac(rng.u64(0..1000), rng.u64(1..1000), rng.bool())
    }

    #[test]
    fn canonical_form() {
        let s = frac(12, 18, false);
        assert_eq!((s.numerator(), s.denominator()), (2, 3));

        let s = frac(7, 7, true);
        assert_eq!((s.numerator(), s.denominator(), s.is_negative()), (1, 1, true));

        // Zero is always `0/1` and never negative.
        let s = frac(0, 17, true);
        assert_eq!((s.numerator(), s.denominator(), s.is_negative()), (0, 1, false));

        assert_eq!(Scalar::new(1, 0, false), Err(Error::DivisionByZero));
        assert_eq!(Scalar::from_int(i64::MIN).numerator(), 1 << 63);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut rng = fastrand::Rng::with_seed(0x5ca1a5);
        for _ in 0..1000 {
            let n = u128::from(rng.u64(..));
            let d = u128::from(rng.u64(1..));
            let once = normalize(n, d);
            assert_eq!(normalize(once.0, once.1), once);
        }

        assert_eq!(normalize(0, 5), (0, 1));
        assert_eq!(normalize(9, 9), (1, 1));
        assert_eq!(normalize(9, 1), (9, 1));
        assert_eq!(normalize(9, 6), (3, 2));
    }

    #[test]
    fn compare() {
        let neg_half = frac(1, 2, true);
        let third = frac(1, 3, false);
        let neg_third = frac(1, 3, true);

        assert!(neg_half < third);
        assert!(neg_half < neg_third);
        assert!(third > neg_third);
        assert!(frac(2, 3, false) > frac(3, 5, false));
        assert!(frac(2, 3, true) < frac(3, 5, true));
        assert!(frac(5, 7, false) > frac(3, 7, false));
        assert!(frac(5, 7, true) < frac(3, 7, true));
        assert!(Scalar::ZERO > neg_third);
        assert!(Scalar::ZERO < third);

        // Rescaling uses 128-bit intermediates and cannot overflow.
        let a = frac(u64::MAX - 1, u64::MAX, false);
        let b = frac(u64::MAX - 2, u64::MAX - 1, false);
        assert!(a > b);

        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            let x = random_scalar(&mut rng);
            assert_eq!(x.cmp(&x), Ordering::Equal);
        }
    }

    #[test]
    fn add() {
        let half = frac(1, 2, false);
        let third = frac(1, 3, false);

        assert_eq!(half.try_add(third).unwrap(), frac(5, 6, false));
        assert_eq!(half.try_add(-third).unwrap(), frac(1, 6, false));
        assert_eq!((-half).try_add(third).unwrap(), frac(1, 6, true));
        assert_eq!((-half).try_add(-third).unwrap(), frac(5, 6, true));
        assert_eq!(third.try_add(-half).unwrap(), frac(1, 6, true));
        assert_eq!((-third).try_add(half).unwrap(), frac(1, 6, false));
        assert_eq!(half.try_add(half).unwrap(), Scalar::ONE);
        assert_eq!(half.try_add(-half).unwrap(), Scalar::ZERO);
        assert!(!half.try_add(-half).unwrap().is_negative());
        assert_eq!(Scalar::ZERO.try_add(Scalar::ZERO).unwrap(), Scalar::ZERO);
        assert_eq!(Scalar::ZERO.try_add(-third).unwrap(), -third);

        let max = Scalar::from(u64::MAX);
        assert_eq!(max.try_add(Scalar::ONE), Err(Error::Overflow));
        assert_eq!(max.try_add(-Scalar::ONE).unwrap(), Scalar::from(u64::MAX - 1));
    }

    #[test]
    fn add_negation_is_zero() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..500 {
            let x = random_scalar(&mut rng);
            assert_eq!(x.try_add(-x).unwrap(), Scalar::ZERO);
            assert_eq!(x.try_sub(x).unwrap(), Scalar::ZERO);
        }
    }

    #[test]
    fn sub_leaves_operands_untouched() {
        let x = frac(3, 4, false);
        let y = frac(1, 4, true);
        assert_eq!(x.try_sub(y).unwrap(), Scalar::ONE);
        assert_eq!(y, frac(1, 4, true));
        assert_eq!(y.try_sub(x).unwrap(), -Scalar::ONE);
    }

    #[test]
    fn mul() {
        let a = frac(1, 2, false).try_mul(frac(1, 2, true)).unwrap();
        assert_eq!(a, frac(1, 4, true));
        let b = a.try_mul(a).unwrap();
        assert_eq!(b, frac(1, 16, false));
        assert_eq!(frac(2, 3, false).try_mul(frac(3, 2, false)).unwrap(), Scalar::ONE);
        assert_eq!(frac(2, 3, true).try_mul(Scalar::ZERO).unwrap(), Scalar::ZERO);
        assert!(!frac(2, 3, true).try_mul(Scalar::ZERO).unwrap().is_negative());

        // Large intermediates are fine as long as the reduced result fits.
        let big = frac(u64::MAX, 2, false);
        assert_eq!(big.try_mul(frac(2, u64::MAX, false)).unwrap(), Scalar::ONE);
        assert_eq!(big.try_mul(big), Err(Error::Overflow));
    }

    #[test]
    fn div() {
        assert_eq!(
            frac(1, 2, false).try_div(frac(1, 4, true)).unwrap(),
            Scalar::from_int(-2)
        );
        assert_eq!(Scalar::ONE.try_div(Scalar::ZERO), Err(Error::DivisionByZero));
        assert_eq!(Scalar::ZERO.try_inverse(), Err(Error::DivisionByZero));
        assert_eq!(frac(3, 5, true).try_inverse().unwrap(), frac(5, 3, true));
    }

    #[test]
    fn div_mul_roundtrip() {
        let mut rng = fastrand::Rng::with_seed(1234);
        for _ in 0..500 {
            let x = random_scalar(&mut rng);
            let y = random_scalar(&mut rng);
            if y.is_zero() {
                continue;
            }
            let q = x.try_div(y).unwrap();
            assert_eq!(q.try_mul(y).unwrap(), x, "{x} / {y} = {q}");
        }
    }

    #[test]
    fn scale() {
        let s = frac(3, 8, false);
        assert_eq!(s.try_scale(4, false).unwrap(), frac(3, 2, false));
        assert_eq!(s.try_scale(4, true).unwrap(), frac(3, 2, true));
        assert_eq!((-s).try_scale(4, true).unwrap(), frac(3, 2, false));
        assert_eq!(s.try_scale(0, true).unwrap(), Scalar::ZERO);
        assert!(!s.try_scale(0, true).unwrap().is_negative());
    }

    #[test]
    fn fmt() {
        assert_eq!(Scalar::ZERO.to_string(), "0");
        assert_eq!(Scalar::from_int(7).to_string(), "7");
        assert_eq!(Scalar::from_int(-7).to_string(), "-7");
        assert_eq!(frac(2, 3, false).to_string(), "2/3");
        assert_eq!(frac(2, 3, true).to_string(), "-2/3");
        assert_eq!(format!("{:?}", frac(2, 3, true)), "-2/3");

        for s in [
            Scalar::ZERO,
            Scalar::from_int(10),
            Scalar::from_int(-100),
            frac(99, 100, true),
            frac(u64::MAX, u64::MAX - 1, true),
        ] {
            assert_eq!(s.display_len(), s.to_string().len(), "{s}");
        }
    }

    #[test]
    fn parse() {
        assert_eq!("0".parse::<Scalar>().unwrap(), Scalar::ZERO);
        assert_eq!("-0".parse::<Scalar>().unwrap(), Scalar::ZERO);
        assert_eq!(" 42 ".parse::<Scalar>().unwrap(), Scalar::from_int(42));
        assert_eq!("+4/6".parse::<Scalar>().unwrap(), frac(2, 3, false));
        assert_eq!("-4/6".parse::<Scalar>().unwrap(), frac(2, 3, true));
        assert_eq!("1/0".parse::<Scalar>(), Err(Error::DivisionByZero));

        for bad in ["", "-", "1/", "/2", "1/-2", "a", "1.5", "--1", "1/2/3"] {
            assert_eq!(
                bad.parse::<Scalar>(),
                Err(Error::InvalidLiteral(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn to_f64() {
        assert_eq!(frac(1, 4, true).to_f64(), -0.25);
        assert_eq!(Scalar::ZERO.to_f64(), 0.0);
    }
}
