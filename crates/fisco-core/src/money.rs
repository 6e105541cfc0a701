//! # Money and Rate — Fixed-Point Arithmetic Primitives
//!
//! All tax arithmetic in the engine runs on two integer newtypes:
//!
//! - [`Money`]: a signed count of centavos (R$ 1.234,56 = `123456`).
//! - [`Rate`]: a signed count of basis points (6,54% = `654`).
//!
//! ## Determinism
//!
//! Rate application truncates toward zero and intermediate products are
//! widened to `i128`, so identical inputs always produce identical outputs
//! and no realistic revenue figure can overflow. A computed tax therefore
//! never exceeds the statutory rate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a money string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    /// The input was empty or whitespace.
    #[error("empty amount")]
    Empty,

    /// The input was not a decimal number.
    #[error("malformed amount: {0:?}")]
    Malformed(String),

    /// The amount does not fit in centavos of an `i64`.
    #[error("amount out of range: {0:?}")]
    OutOfRange(String),
}

/// An amount of money in centavos.
///
/// Serializes as a plain integer count of centavos. Use [`Money::to_string`]
/// for the human-readable `1234.56` form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero centavos.
    pub const ZERO: Money = Money(0);

    /// Create from a raw centavo count.
    pub const fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    /// Create from whole reais (no fractional part).
    pub const fn from_reais(reais: i64) -> Self {
        Self(reais * 100)
    }

    /// The raw centavo count.
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Whether this amount is strictly negative.
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtraction floored at zero. The workhorse of deduction chains:
    /// `tax = nominal - deduction` must never go negative.
    pub fn saturating_sub_floor_zero(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }

    /// Multiply by `numerator / denominator` with an `i128` intermediate,
    /// truncating toward zero. Returns zero when the denominator is zero.
    pub fn mul_div(self, numerator: i64, denominator: i64) -> Money {
        if denominator == 0 {
            return Money::ZERO;
        }
        let product = self.0 as i128 * numerator as i128;
        Money((product / denominator as i128) as i64)
    }

    /// This amount as a fraction of `whole`, in `[0, +inf)`. Zero when
    /// `whole` is zero.
    pub fn ratio_of(self, whole: Money) -> f64 {
        if whole.0 == 0 {
            0.0
        } else {
            self.0 as f64 / whole.0 as f64
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyParseError;

    /// Parse `"1234.56"`, `"1234"` (whole reais) or `"-0.50"` into centavos.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let malformed = || MoneyParseError::Malformed(s.to_string());
        let out_of_range = || MoneyParseError::OutOfRange(s.to_string());

        let (sign, digits) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s),
        };

        let (int_part, frac_centavos) = match digits.find('.') {
            Some(dot) => {
                let int_str = &digits[..dot];
                let frac_str = &digits[dot + 1..];
                if frac_str.is_empty() || frac_str.len() > 2 {
                    return Err(malformed());
                }
                let frac = frac_str.parse::<i64>().map_err(|_| malformed())?;
                let frac = if frac_str.len() == 1 { frac * 10 } else { frac };
                (int_str, frac)
            }
            None => (digits, 0),
        };

        if int_part.is_empty() {
            return Err(malformed());
        }
        let whole = int_part.parse::<i64>().map_err(|_| malformed())?;
        let centavos = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac_centavos))
            .ok_or_else(out_of_range)?;
        Ok(Money(sign * centavos))
    }
}

/// A statutory rate in basis points.
///
/// Serializes as a plain integer count of basis points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rate(i64);

impl Rate {
    /// Zero basis points.
    pub const ZERO: Rate = Rate(0);

    /// Create from a raw basis-point count (6.54% = 654).
    pub const fn from_bps(bps: i64) -> Self {
        Self(bps)
    }

    /// Create from a whole percentage (20% = `from_percent(20)`).
    pub const fn from_percent(percent: i64) -> Self {
        Self(percent * 100)
    }

    /// The raw basis-point count.
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Whether this rate is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The rate as a fraction in `[0, 1]` for statutory rates.
    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Apply this rate to an amount, truncating toward zero.
    pub fn apply(&self, amount: Money) -> Money {
        amount.mul_div(self.0, 10_000)
    }

    /// Clamp this rate into `[floor, cap]`.
    pub fn clamp(self, floor: Rate, cap: Rate) -> Rate {
        Rate(self.0.clamp(floor.0, cap.0))
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}%", sign, abs / 100, abs % 100)
    }
}
