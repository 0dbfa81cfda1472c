//! Numeric backends.
//!
//! Every indicator is written once against [`Numeric`] and instantiated for
//! two representations:
//! - `f64` for the fast path
//! - [`rust_decimal::Decimal`] for exact, string-safe arithmetic
//!
//! `Decimal` arithmetic panics on division by zero and on overflow. Indicator
//! code guards every divisor, and steps that can leave the `Decimal` range
//! (squares, weighted sums, unbounded ratios, running totals) go through the
//! checked operations below and yield no result instead of panicking.

use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::{FromPrimitive, Num, Signed, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

/// Arithmetic required by the indicator algorithms.
pub trait Numeric:
    Num
    + Signed
    + FromPrimitive
    + ToPrimitive
    + Sum
    + Copy
    + PartialOrd
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Convert a small integer constant.
    fn from_int(value: i64) -> Self;

    /// Convert a count (interval length, weight index).
    fn from_count(value: usize) -> Self;

    /// Build the fraction `num / den` in the backend's precision. A zero
    /// denominator yields zero.
    ///
    /// Terminating fractions such as `2/5` are exact in both backends; others
    /// such as `1/3` are rounded (28 significant digits for `Decimal`).
    fn ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return Self::zero();
        }
        Self::from_int(num) / Self::from_int(den)
    }

    /// Square root of a non-negative value.
    fn sqrt(self) -> Self;

    /// Lossy conversion used to compare backends.
    fn to_f64_lossy(self) -> f64;

    /// `self + rhs`, or None when the result leaves the representable range.
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// `self - rhs`, or None when the result leaves the representable range.
    fn checked_sub(self, rhs: Self) -> Option<Self>;

    /// `self * rhs`, or None when the result leaves the representable range.
    fn checked_mul(self, rhs: Self) -> Option<Self>;

    /// `self / rhs`, or None for a zero divisor or an out of range quotient.
    fn checked_div(self, rhs: Self) -> Option<Self>;
}

#[inline]
fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl Numeric for f64 {
    #[inline]
    fn from_int(value: i64) -> Self {
        value as f64
    }

    #[inline]
    fn from_count(value: usize) -> Self {
        value as f64
    }

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }

    #[inline]
    fn checked_add(self, rhs: Self) -> Option<Self> {
        finite(self + rhs)
    }

    #[inline]
    fn checked_sub(self, rhs: Self) -> Option<Self> {
        finite(self - rhs)
    }

    #[inline]
    fn checked_mul(self, rhs: Self) -> Option<Self> {
        finite(self * rhs)
    }

    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs == 0.0 {
            return None;
        }
        finite(self / rhs)
    }
}

impl Numeric for Decimal {
    #[inline]
    fn from_int(value: i64) -> Self {
        Decimal::from(value)
    }

    #[inline]
    fn from_count(value: usize) -> Self {
        Decimal::from(value)
    }

    fn sqrt(self) -> Self {
        MathematicalOps::sqrt(&self).unwrap_or(Decimal::ZERO)
    }

    fn to_f64_lossy(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    #[inline]
    fn checked_add(self, rhs: Self) -> Option<Self> {
        Decimal::checked_add(self, rhs)
    }

    #[inline]
    fn checked_sub(self, rhs: Self) -> Option<Self> {
        Decimal::checked_sub(self, rhs)
    }

    #[inline]
    fn checked_mul(self, rhs: Self) -> Option<Self> {
        Decimal::checked_mul(self, rhs)
    }

    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        Decimal::checked_div(self, rhs)
    }
}

/// Sum of `values`, or None if a partial sum overflows.
pub fn checked_sum<T: Numeric>(values: impl IntoIterator<Item = T>) -> Option<T> {
    values
        .into_iter()
        .try_fold(T::zero(), |total, value| total.checked_add(value))
}

/// Larger of two partially ordered values, preferring `a` on ties.
#[inline]
pub fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// Smaller of two partially ordered values, preferring `a` on ties.
#[inline]
pub fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}
