//! Decimal price arithmetic for booking quotes.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A nightly or total price in the platform's single currency (USD).
///
/// The Stay API transmits prices as whole dollar amounts; quote arithmetic
/// happens in `Decimal` so partial amounts survive future schema changes
/// without float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole dollar amount (the wire representation).
    #[must_use]
    pub fn from_dollars(dollars: i64) -> Self {
        Self(Decimal::from(dollars))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Total for a stay of `nights` nights at this nightly price.
    ///
    /// Negative night counts clamp to zero.
    #[must_use]
    pub fn total_for_nights(&self, nights: i64) -> Self {
        Self(self.0 * Decimal::from(nights.max(0)))
    }

    /// Whether this is a positive amount.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

impl From<i64> for Price {
    fn from(dollars: i64) -> Self {
        Self::from_dollars(dollars)
    }
}
