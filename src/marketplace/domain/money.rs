//! Monetary scalar types for budgets and bid amounts.
//!
//! Amounts are integer minor currency units (cents). The domain performs
//! no floating-point arithmetic; callers convert display currency at the
//! presentation boundary.

use super::MarketplaceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative monetary amount in minor currency units (cents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates a validated amount.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::NegativeAmount`] when the value is
    /// below zero.
    pub const fn new(cents: i64) -> Result<Self, MarketplaceDomainError> {
        if cents < 0 {
            return Err(MarketplaceDomainError::NegativeAmount(cents));
        }
        Ok(Self(cents))
    }

    /// Returns the amount in minor currency units.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive budget range attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetRange {
    min: Amount,
    max: Amount,
}

impl BudgetRange {
    /// Creates a validated budget range.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::NegativeAmount`] when either bound
    /// is below zero, or [`MarketplaceDomainError::InvalidBudgetRange`] when
    /// the minimum exceeds the maximum.
    pub const fn from_cents(min: i64, max: i64) -> Result<Self, MarketplaceDomainError> {
        let lower = match Amount::new(min) {
            Ok(amount) => amount,
            Err(err) => return Err(err),
        };
        let upper = match Amount::new(max) {
            Ok(amount) => amount,
            Err(err) => return Err(err),
        };
        if lower.cents() > upper.cents() {
            return Err(MarketplaceDomainError::InvalidBudgetRange { min, max });
        }
        Ok(Self {
            min: lower,
            max: upper,
        })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn min(self) -> Amount {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn max(self) -> Amount {
        self.max
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
