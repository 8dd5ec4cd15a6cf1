//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept as [`Decimal`] in the currency's standard unit (dollars,
//! not cents) so that cart totals never accumulate float drift.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default currency.
    #[must_use]
    pub fn from_amount(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::default())
    }

    /// Format for display (e.g., "$19.99").
    ///
    /// Always two decimal places, rounded half away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let mut amount = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        format!("{}{amount}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes. The menu is priced in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}
