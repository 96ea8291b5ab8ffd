//! Folding ledger entries into raw monthly totals.

use budgetry_shared::types::MonthlyError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::entry::LedgerEntry;
use crate::chart::{AccountKind, ChartTree};

/// Counters describing what happened to each entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationStats {
    /// Entries added to an INPUT account.
    pub applied: usize,
    /// Entries whose account is not in the chart.
    pub unknown_account: usize,
    /// Entries pointing at a DERIVED account.
    pub derived_account: usize,
    /// Entries with a month outside 1-12.
    pub invalid_month: usize,
    /// Entries that would push a month out of the decimal range.
    pub overflowed: usize,
}

impl AggregationStats {
    /// Number of entries that were dropped.
    #[must_use]
    pub const fn ignored(&self) -> usize {
        self.unknown_account + self.derived_account + self.invalid_month + self.overflowed
    }
}

/// Adds ledger amounts into the INPUT rows of a chart tree.
pub struct InputAggregator;

impl InputAggregator {
    /// Adds every applicable entry's amount into its account's month.
    ///
    /// Entries for unknown accounts, DERIVED accounts, months outside 1-12,
    /// or amounts that overflow the month are skipped. Duplicates are summed.
    pub fn apply<'a, I>(tree: &mut ChartTree, entries: I) -> AggregationStats
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut stats = AggregationStats::default();

        for entry in entries {
            let Some(index) = tree.index_of(entry.account_id) else {
                trace!(entry_id = %entry.id, account_id = %entry.account_id, "Entry for unknown account ignored");
                stats.unknown_account += 1;
                continue;
            };
            if tree.kind(index) != AccountKind::Input {
                trace!(entry_id = %entry.id, account_id = %entry.account_id, "Entry for derived account ignored");
                stats.derived_account += 1;
                continue;
            }
            match tree.values_mut(index).add_to_month(entry.month, entry.amount) {
                Ok(()) => stats.applied += 1,
                Err(MonthlyError::InvalidMonth(month)) => {
                    trace!(entry_id = %entry.id, month, "Entry with invalid month ignored");
                    stats.invalid_month += 1;
                }
                Err(MonthlyError::Overflow) => {
                    trace!(entry_id = %entry.id, month = entry.month, "Entry overflowing its month ignored");
                    stats.overflowed += 1;
                }
            }
        }

        debug!(
            applied = stats.applied,
            ignored = stats.ignored(),
            "Aggregated ledger entries"
        );
        stats
    }
}
