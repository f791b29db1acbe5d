//! Exact rational numbers.
//!
//! Every numeric term and every arithmetic constraint is evaluated with
//! [`Rational`], a thin layer over [`BigRational`] that adds the *invalid*
//! value. Division by zero produces it, and it then propagates through every
//! further operation.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An arbitrary-precision fraction, or the invalid value.
///
/// Equality is structural, so the invalid value compares equal to itself.
/// Ordering an invalid value is a contract violation and panics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational(Option<BigRational>);

impl Rational {
    /// Build `numer / denom` in canonical form. A zero `denom` gives the
    /// invalid value.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Self {
        let denom = denom.into();
        if denom.is_zero() {
            return Self::invalid();
        }
        Self(Some(BigRational::new(numer.into(), denom)))
    }

    /// An integral value `value / 1`.
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self(Some(BigRational::from_integer(value.into())))
    }

    pub fn zero() -> Self {
        Self(Some(BigRational::zero()))
    }

    pub fn one() -> Self {
        Self::integer(1)
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    /// The reduced fraction, or `None` for the invalid value.
    pub fn as_ratio(&self) -> Option<&BigRational> {
        self.0.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_integer(&self) -> bool {
        self.0.as_ref().is_some_and(BigRational::is_integer)
    }

    /// The value as an `i64`, if it is an integer that fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.0
            .as_ref()
            .filter(|ratio| ratio.is_integer())
            .and_then(|ratio| ratio.numer().to_i64())
    }

    fn zip_with(
        &self,
        rhs: &Rational,
        op: impl FnOnce(&BigRational, &BigRational) -> Option<BigRational>,
    ) -> Rational {
        match (&self.0, &rhs.0) {
            (Some(left), Some(right)) => Rational(op(left, right)),
            _ => Rational::invalid(),
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::integer(value)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::integer(value)
    }
}

impl From<BigRational> for Rational {
    fn from(value: BigRational) -> Self {
        Self(Some(value))
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(self.0.as_ref().map(|ratio| -ratio))
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(self.0.map(|ratio| -ratio))
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        self.zip_with(rhs, |a, b| Some(a + b))
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self.zip_with(rhs, |a, b| Some(a - b))
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        self.zip_with(rhs, |a, b| Some(a * b))
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, rhs: &Rational) -> Rational {
        self.zip_with(rhs, |a, b| (!b.is_zero()).then(|| a / b))
    }
}

macro_rules! forward_by_value {
    ($($trait:ident::$method:ident),*) => {
        $(
            impl $trait for Rational {
                type Output = Rational;

                fn $method(self, rhs: Rational) -> Rational {
                    (&self).$method(&rhs)
                }
            }
        )*
    };
}

forward_by_value!(Add::add, Sub::sub, Mul::mul, Div::div);

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(left), Some(right)) => left.cmp(right),
            _ => panic!("ordering comparison on an invalid rational"),
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => write!(f, "invalid"),
            Some(ratio) if ratio.is_integer() => write!(f, "{}", ratio.numer()),
            Some(ratio) => write!(f, "{}/{}", ratio.numer(), ratio.denom()),
        }
    }
}

#[cfg(test)]
#[path = "tests/rational.rs"]
mod tests;
