//! Twelve-month value vectors.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every monthly amount is a `rust_decimal::Decimal`.

use std::ops::{Index, IndexMut};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of months in a reporting year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Why an amount could not be added to a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MonthlyError {
    /// Calendar month outside 1-12.
    #[error("Month {0} is outside 1-12")]
    InvalidMonth(u32),

    /// The month's value would leave the decimal range.
    #[error("Monthly value overflowed")]
    Overflow,
}

/// One value per calendar month, January first.
///
/// Indexing is 0-based (`values[0]` is January). Storage-side months are
/// 1-based; use [`MonthlyValues::month_index`] to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyValues([Decimal; MONTHS_PER_YEAR]);

impl MonthlyValues {
    /// All twelve months set to zero.
    pub const ZERO: Self = Self([Decimal::ZERO; MONTHS_PER_YEAR]);

    /// Creates a vector with every month at zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Converts a 1-based calendar month into an array index.
    ///
    /// Returns `None` for anything outside 1-12.
    #[must_use]
    pub fn month_index(month: u32) -> Option<usize> {
        if (1..=12).contains(&month) {
            usize::try_from(month - 1).ok()
        } else {
            None
        }
    }

    /// Adds an amount to a 1-based calendar month.
    ///
    /// On error the values are left unchanged.
    pub fn add_to_month(&mut self, month: u32, amount: Decimal) -> Result<(), MonthlyError> {
        let index = Self::month_index(month).ok_or(MonthlyError::InvalidMonth(month))?;
        self.0[index] = self.0[index]
            .checked_add(amount)
            .ok_or(MonthlyError::Overflow)?;
        Ok(())
    }

    /// Sum of all twelve months; zero if the sum leaves the decimal range.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0
            .iter()
            .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(*value))
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if every month is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Decimal::is_zero)
    }
}

impl From<[Decimal; MONTHS_PER_YEAR]> for MonthlyValues {
    fn from(values: [Decimal; MONTHS_PER_YEAR]) -> Self {
        Self(values)
    }
}

impl Index<usize> for MonthlyValues {
    type Output = Decimal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for MonthlyValues {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}
