//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive from the host page as `data-product-price` strings and are
//! stored as plain JSON numbers written with every decimal digit, so a saved
//! price reads back exactly. Arithmetic happens on [`Decimal`] so totals
//! never pick up binary floating-point drift.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::quantity::Quantity;

/// Errors from parsing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price is empty")]
    Empty,
    #[error("price is not a number: {0}")]
    NotANumber(String),
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative unit price.
///
/// The currency is implied by the page; [`PriceFormat`] supplies the suffix
/// when the price is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Parse a price from a data attribute value such as `"1499.90"`.
    ///
    /// Plain and scientific notation are accepted. Anything else is
    /// rejected rather than turned into a meaningless number.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the input is empty, not numeric, or negative.
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::NotANumber(trimmed.to_string()))?;
        Self::new(amount)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    #[must_use]
    pub fn times(&self, quantity: Quantity) -> Decimal {
        self.0
            .checked_mul(Decimal::from(quantity.get()))
            .unwrap_or(Decimal::MAX)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

/// Locale-aware number formatting with a fixed currency suffix.
///
/// Defaults match the `ru-RU` locale: digits grouped in threes with a
/// no-break space, a decimal comma, at most three fraction digits, and a
/// trailing `₽`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFormat {
    /// Separator inserted between groups of three integer digits.
    pub group_separator: String,
    /// Separator between the integer and fraction parts.
    pub decimal_separator: String,
    /// Fraction digits kept after rounding half away from zero.
    pub max_fraction_digits: u32,
    /// Currency sign appended after a space. Empty means no suffix.
    pub currency_suffix: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            group_separator: "\u{a0}".to_string(),
            decimal_separator: ",".to_string(),
            max_fraction_digits: 3,
            currency_suffix: "₽".to_string(),
        }
    }
}

impl PriceFormat {
    /// Format an amount with grouping and decimal separators, no suffix.
    #[must_use]
    pub fn format_number(&self, amount: Decimal) -> String {
        let rounded = amount
            .round_dp_with_strategy(self.max_fraction_digits, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (integer, fraction) = digits
            .split_once('.')
            .map_or((digits.as_str(), None), |(i, f)| (i, Some(f)));

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&group_digits(integer, &self.group_separator));
        if let Some(fraction) = fraction {
            out.push_str(&self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Format an amount for display, e.g. `"1 234,5 ₽"`.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let number = self.format_number(amount);
        if self.currency_suffix.is_empty() {
            number
        } else {
            format!("{number} {}", self.currency_suffix)
        }
    }

    /// Format a unit price for display.
    #[must_use]
    pub fn format_price(&self, price: Price) -> String {
        self.format(price.amount())
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(digits.len() + (len / 3) * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
