//! Money amounts in major currency units using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with currency information.
///
/// Amounts are held in the currency's standard unit (e.g., euros, not
/// cents) with two-fractional-digit semantics. The order backend reports
/// minor units; use [`Money::from_minor_units`] at the wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Build from backend minor units (integer cents).
    #[must_use]
    pub fn from_minor_units(cents: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub fn zero(currency_code: CurrencyCode) -> Self {
        Self::from_minor_units(0, currency_code)
    }

    /// Format for display (e.g., "€19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes the dashboard renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    USD,
    GBP,
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::EUR => "€",
            Self::USD => "$",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::USD => "USD",
            Self::GBP => "GBP",
            Self::INR => "INR",
        }
    }

    /// Parse a backend currency tag, falling back to the default currency
    /// for tags this build does not render.
    #[must_use]
    pub fn parse_or_default(code: &str) -> Self {
        match code {
            "USD" => Self::USD,
            "GBP" => Self::GBP,
            "INR" => Self::INR,
            _ => Self::EUR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minor_units_divide_by_one_hundred() {
        let money = Money::from_minor_units(12345, CurrencyCode::EUR);
        assert_eq!(money.amount, Decimal::new(12345, 2));
        assert_eq!(money.display(), "€123.45");
    }

    #[test]
    fn zero_displays_two_fraction_digits() {
        assert_eq!(Money::zero(CurrencyCode::USD).display(), "$0.00");
    }

    #[test]
    fn unrecognized_currency_tags_fall_back() {
        assert_eq!(CurrencyCode::parse_or_default("CHF"), CurrencyCode::EUR);
        assert_eq!(CurrencyCode::parse_or_default("INR"), CurrencyCode::INR);
    }
}
