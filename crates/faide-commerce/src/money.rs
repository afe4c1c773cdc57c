//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The store trades in a
//! single currency (South African Rand), so amounts carry no currency tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Symbol prefixed to displayed amounts.
pub const CURRENCY_SYMBOL: &str = "R";

/// ISO 4217 code of the store currency.
pub const CURRENCY_CODE: &str = "ZAR";

const DECIMAL_PLACES: u32 = 2;
const MINOR_PER_MAJOR: i64 = 10_i64.pow(DECIMAL_PLACES);

/// A monetary value in the store currency.
///
/// Amounts are stored in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a whole number of rand.
    pub const fn from_major(rand: i64) -> Self {
        Self::new(rand * MINOR_PER_MAJOR)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN, infinities and values outside the `i64` cent range.
    ///
    /// ```
    /// use faide_commerce::money::Money;
    /// let price = Money::from_decimal(349.99).unwrap();
    /// assert_eq!(price.amount_cents, 34999);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * MINOR_PER_MAJOR as f64).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self::new(cents as i64))
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / MINOR_PER_MAJOR as f64
    }

    /// Format as a display string (e.g., "R349.99").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
    }

    /// Format as a fixed-point string without symbol (e.g., "349.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let per = MINOR_PER_MAJOR.unsigned_abs();
        format!(
            "{sign}{}.{:0width$}",
            abs / per,
            abs % per,
            width = DECIMAL_PLACES as usize
        )
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: u32) -> Option<Money> {
        self.amount_cents
            .checked_mul(i64::from(factor))
            .map(Money::new)
    }

    /// Add another amount, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(Money::new)
    }

    /// Add another amount, saturating at the numeric bounds.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn saturating_multiply(&self, factor: u32) -> Money {
        Money::new(self.amount_cents.saturating_mul(i64::from(factor)))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.saturating_add(&other)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, factor: u32) -> Money {
        self.saturating_multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter that reads and writes [`Money`] as a decimal number of rand.
///
/// Catalog files and the persisted cart both carry prices like `349.99`.
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "faide_commerce::money::decimal")]
///     price: Money,
/// }
/// ```
pub mod decimal {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Money::from_decimal(raw)
            .ok_or_else(|| D::Error::custom(format!("price out of range: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(79900);
        assert_eq!(m.amount_cents, 79900);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(199.99).unwrap().amount_cents, 19999);
        assert_eq!(Money::from_decimal(799.0).unwrap(), Money::from_major(799));
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_major(2397).display(), "R2397.00");
        assert_eq!(Money::new(34999).display(), "R349.99");
        assert_eq!(Money::new(5).display_amount(), "0.05");
        assert_eq!(Money::new(-150).display_amount(), "-1.50");
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::from_major(799);
        assert_eq!(m * 3, Money::from_major(2397));
        assert_eq!(m.try_multiply(3), Some(Money::from_major(2397)));
        assert_eq!(Money::new(i64::MAX).try_multiply(2), None);
    }

    #[test]
    fn test_money_sum() {
        let prices = [Money::from_major(799), Money::from_major(1499)];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_major(2298));

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_decimal_serde() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "decimal")]
            price: Money,
        }

        let row: Row = serde_json::from_str(r#"{"price": 349.99}"#).unwrap();
        assert_eq!(row.price.amount_cents, 34999);

        let row: Row = serde_json::from_str(r#"{"price": 799}"#).unwrap();
        assert_eq!(row.price, Money::from_major(799));

        let json = serde_json::to_string(&Row {
            price: Money::new(149900),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":1499.0}"#);
    }
}
