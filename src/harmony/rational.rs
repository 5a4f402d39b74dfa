//! Exact fractions kept in lowest terms.
//!
//! All arithmetic is checked: a result that does not fit the `i64`
//! representation is reported as [`RationalError::NonFiniteValue`] instead of
//! wrapping or saturating.

use std::fmt;
use std::str::FromStr;

use num_traits::checked_pow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing or combining [`Rational`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RationalError {
    /// The denominator was zero.
    #[error("rational has a zero denominator")]
    DivisionByZero,
    /// The numerator, the denominator or their quotient does not fit in an `i64`.
    #[error("rational value is not finite in the i64 representation")]
    NonFiniteValue,
}

/// Errors raised when parsing a ratio such as `4:5` or `4/5`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRationalError {
    /// The text is not two integers separated by `:` or `/`.
    #[error("malformed ratio '{0}', expected a:b")]
    Malformed(String),
    /// The integers parsed but do not form a valid rational.
    #[error(transparent)]
    Invalid(#[from] RationalError),
}

/// An exact fraction `a / b`.
///
/// The value is always canonical: `gcd(|a|, b) == 1`, `b > 0`, and zero is
/// stored as `0/1`. Derived equality is therefore equality of fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRational", into = "RawRational")]
pub struct Rational {
    a: i64,
    b: i64,
}

/// Stored `{a, b}` shape of a [`Rational`].
///
/// Reading one back goes through [`Rational::new`], so unreduced or
/// sign-flipped pairs are accepted and canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRational {
    /// Numerator
    pub a: i64,
    /// Denominator
    pub b: i64,
}

impl Rational {
    /// `0/1`
    pub const ZERO: Rational = Rational { a: 0, b: 1 };
    /// `1/1`
    pub const ONE: Rational = Rational { a: 1, b: 1 };
    /// `1/2`, one octave up expressed as lower over upper frequency.
    pub const HALF: Rational = Rational { a: 1, b: 2 };

    /// Builds a fraction that is already canonical, for constant tables.
    ///
    /// The caller guarantees `b > 0` and `gcd(|a|, b) == 1`.
    pub(crate) const fn new_unchecked(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Creates the fraction `a / b` in lowest terms.
    pub fn new(a: i64, b: i64) -> Result<Self, RationalError> {
        Self::from_wide(i128::from(a), i128::from(b))
    }

    /// Reduces a fraction computed in double width and narrows it back to `i64`.
    fn from_wide(a: i128, b: i128) -> Result<Self, RationalError> {
        if b == 0 {
            return Err(RationalError::DivisionByZero);
        }
        if a == 0 {
            return Ok(Self::ZERO);
        }

        let g = gcd(a.unsigned_abs(), b.unsigned_abs()) as i128;
        let (mut a, mut b) = (a / g, b / g);
        if b < 0 {
            a = -a;
            b = -b;
        }

        let a = i64::try_from(a).map_err(|_| RationalError::NonFiniteValue)?;
        let b = i64::try_from(b).map_err(|_| RationalError::NonFiniteValue)?;
        Ok(Self { a, b })
    }

    /// Numerator, carrying the sign.
    pub fn numer(&self) -> i64 {
        self.a
    }

    /// Denominator, always positive.
    pub fn denom(&self) -> i64 {
        self.b
    }

    /// True for `0/1`.
    pub fn is_zero(&self) -> bool {
        self.a == 0
    }

    /// True when the fraction is a whole number.
    pub fn is_integer(&self) -> bool {
        self.b == 1
    }

    /// Exact product of two fractions.
    pub fn multiply(&self, other: &Rational) -> Result<Rational, RationalError> {
        // i64 * i64 always fits in i128, so only the reduced result can overflow
        Self::from_wide(
            i128::from(self.a) * i128::from(other.a),
            i128::from(self.b) * i128::from(other.b),
        )
    }

    /// Reciprocal `b / a`. Fails with `DivisionByZero` for zero.
    pub fn recip(&self) -> Result<Rational, RationalError> {
        Self::new(self.b, self.a)
    }

    /// Integer power.
    ///
    /// `k == 0` gives `1/1` (including `0^0`), positive `k` gives `a^k / b^k`
    /// and negative `k` gives `b^|k| / a^|k|`.
    pub fn pow(&self, k: i64) -> Result<Rational, RationalError> {
        if k == 0 {
            return Ok(Self::ONE);
        }

        let n = usize::try_from(k.unsigned_abs()).map_err(|_| RationalError::NonFiniteValue)?;
        let num = checked_pow(self.a, n).ok_or(RationalError::NonFiniteValue)?;
        let den = checked_pow(self.b, n).ok_or(RationalError::NonFiniteValue)?;

        if k > 0 {
            Self::new(num, den)
        } else {
            Self::new(den, num)
        }
    }

    /// Floating-point approximation, for display and heuristics only.
    pub fn to_f64(&self) -> f64 {
        self.a as f64 / self.b as f64
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ONE
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // denominators are positive, so cross multiplication keeps the order
        (i128::from(self.a) * i128::from(other.b)).cmp(&(i128::from(other.a) * i128::from(self.b)))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<RawRational> for Rational {
    type Error = RationalError;

    fn try_from(raw: RawRational) -> Result<Self, Self::Error> {
        Rational::new(raw.a, raw.b)
    }
}

impl From<Rational> for RawRational {
    fn from(r: Rational) -> Self {
        RawRational { a: r.a, b: r.b }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.a, self.b)
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseRationalError::Malformed(s.to_string());

        let (a, b) = s
            .split_once(':')
            .or_else(|| s.split_once('/'))
            .ok_or_else(malformed)?;
        let a: i64 = a.trim().parse().map_err(|_| malformed())?;
        let b: i64 = b.trim().parse().map_err(|_| malformed())?;

        Ok(Rational::new(a, b)?)
    }
}

fn gcd(mut x: u128, mut y: u128) -> u128 {
    while y != 0 {
        let r = x % y;
        x = y;
        y = r;
    }
    x
}
