//! Money and tax rate value objects.
//!
//! Amounts are kept as `f64` in currency units (euros), exactly as they are
//! persisted. No intermediate rounding ever happens: rounding to two decimals
//! is a display concern only ([`Money::display`]).

use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Currency amount in euros.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    /// Highest accepted catalog price.
    pub const MAX_PRICE: Money = Money(1_000_000.0);

    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Validate a catalog price: finite, non-negative, at most [`Money::MAX_PRICE`].
    pub fn price(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price must not be negative"));
        }
        if amount > Self::MAX_PRICE.0 {
            return Err(DomainError::validation(format!(
                "price must not exceed {}",
                Self::MAX_PRICE.display()
            )));
        }
        Ok(Self(amount))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Amount rounded half away from zero to cents (display only).
    pub fn rounded(self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }

    /// Human-readable amount, e.g. `4.20 €`.
    pub fn display(self) -> String {
        format!("{:.2} €", self.0)
    }

    /// Divide by a count, yielding zero for an empty set.
    pub fn average_over(self, count: usize) -> Money {
        if count == 0 {
            Money::ZERO
        } else {
            Money(self.0 / count as f64)
        }
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

/// Unit price × quantity.
impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money(self.0 * f64::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// Sales tax rate as a fraction (0.20 = 20%).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(f64);

impl TaxRate {
    /// French standard VAT, applied to every sale.
    pub const STANDARD: TaxRate = TaxRate(0.20);

    /// Tax owed on `base`, unrounded.
    pub fn apply(self, base: Money) -> Money {
        Money(base.0 * self.0)
    }

    /// Label used on receipts and in the cart summary, e.g. `20%`.
    pub fn percent_label(self) -> String {
        format!("{}%", (self.0 * 100.0).round() as i64)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl ValueObject for TaxRate {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_rejects_negative_and_non_finite() {
        assert!(Money::price(-0.01).is_err());
        assert!(Money::price(f64::NAN).is_err());
        assert!(Money::price(f64::INFINITY).is_err());
        assert_eq!(Money::price(0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn price_is_bounded_so_totals_stay_finite() {
        assert!(Money::price(1e308).is_err());
        assert!(Money::price(1_000_000.01).is_err());
        assert_eq!(Money::price(1_000_000.0).unwrap(), Money::MAX_PRICE);
    }

    #[test]
    fn display_rounds_to_cents_only_on_output() {
        let m = Money::new(8.088);
        assert_eq!(m.display(), "8.09 €");
        assert_eq!(m.amount(), 8.088);
    }

    #[test]
    fn average_over_empty_is_zero() {
        assert_eq!(Money::new(12.0).average_over(0), Money::ZERO);
        assert_eq!(Money::new(12.0).average_over(4), Money::new(3.0));
    }

    #[test]
    fn standard_tax_rate_is_twenty_percent() {
        assert_eq!(TaxRate::STANDARD.percent_label(), "20%");
        let tax = TaxRate::STANDARD.apply(Money::new(10.0));
        assert!((tax.amount() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn money_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Money::new(1.5)).unwrap(), "1.5");
    }
}
