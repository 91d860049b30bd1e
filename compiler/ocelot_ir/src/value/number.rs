//! Exact decimal numbers.

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, ParseBigDecimalError};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

/// Arbitrary-precision decimal.
///
/// Arithmetic is exact; comparison is by value, so `1.0 == 1.00`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Number(BigDecimal);

impl Number {
    /// Largest decimal shift, in either direction, that `quot_rem` scales by.
    pub const MAX_PLACES: i64 = 100_000;

    pub fn zero() -> Self {
        Number(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Number(BigDecimal::from(1))
    }

    pub fn from_i64(n: i64) -> Self {
        Number(BigDecimal::from(n))
    }

    /// `digits * 10^-scale`.
    pub fn from_scaled(digits: i64, scale: i64) -> Self {
        Number(BigDecimal::new(BigInt::from(digits), scale))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    #[must_use]
    pub fn add(&self, other: &Number) -> Number {
        Number(&self.0 + &other.0)
    }

    #[must_use]
    pub fn sub(&self, other: &Number) -> Number {
        Number(&self.0 - &other.0)
    }

    #[must_use]
    pub fn mul(&self, other: &Number) -> Number {
        Number(&self.0 * &other.0)
    }

    /// Default division with the decimal library's working precision.
    ///
    /// `None` when `divisor` is zero.
    pub fn div(&self, divisor: &Number) -> Option<Number> {
        if divisor.is_zero() {
            return None;
        }
        Some(Number(&self.0 / &divisor.0))
    }

    /// Quotient truncated toward zero at `places` decimal places, and the
    /// matching remainder `self - divisor * quotient`.
    ///
    /// Negative `places` truncate to tens, hundreds and so on. `None` when
    /// `divisor` is zero, or when `places` or the scaling exponent lies
    /// beyond [`Number::MAX_PLACES`].
    pub fn quot_rem(&self, divisor: &Number, places: i64) -> Option<(Number, Number)> {
        if divisor.is_zero() || !(-Self::MAX_PLACES..=Self::MAX_PLACES).contains(&places) {
            return None;
        }
        let (num, num_scale) = self.0.as_bigint_and_exponent();
        let (den, den_scale) = divisor.0.as_bigint_and_exponent();

        // self / divisor * 10^places == num * 10^shift / den
        let shift = den_scale.checked_sub(num_scale)?.checked_add(places)?;
        let (num, den) = if shift >= 0 {
            (num * pow10(shift)?, den)
        } else {
            (num, den * pow10(shift.checked_neg()?)?)
        };

        let quotient = BigDecimal::new(num / den, places);
        let remainder = self.0.clone() - &divisor.0 * &quotient;
        Some((Number(quotient), Number(remainder)))
    }

    /// Integer part, truncated toward zero.
    pub fn trunc_i64(&self) -> Option<i64> {
        self.0.with_scale(0).to_i64()
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

fn pow10(exp: i64) -> Option<BigInt> {
    if exp > Number::MAX_PLACES {
        return None;
    }
    let exp = usize::try_from(exp).ok()?;
    Some(num_traits::pow(BigInt::from(10u8), exp))
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_i64(n)
    }
}

impl From<BigDecimal> for Number {
    fn from(d: BigDecimal) -> Self {
        Number(d)
    }
}

impl FromStr for Number {
    type Err = ParseBigDecimalError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        BigDecimal::from_str(text).map(Number)
    }
}

/// Plain positional notation with trailing fractional zeros removed:
/// `1.50` renders `1.5`, `1E+2` renders `100`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (digits, scale) = self.0.normalized().into_bigint_and_exponent();
        if digits.is_zero() {
            return f.write_str("0");
        }
        if digits.is_negative() {
            f.write_str("-")?;
        }
        let mut text = digits.magnitude().to_string();
        let Ok(shift) = usize::try_from(scale.unsigned_abs()) else {
            return write!(f, "{text}E{}", -scale);
        };
        if scale <= 0 {
            text.extend(std::iter::repeat('0').take(shift));
        } else {
            if text.len() <= shift {
                let pad = "0".repeat(shift - text.len() + 1);
                text.insert_str(0, &pad);
            }
            text.insert(text.len() - shift, '.');
        }
        f.write_str(&text)
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests;
