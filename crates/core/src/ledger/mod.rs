//! Ledger entries and their aggregation into INPUT accounts.

pub mod aggregate;
pub mod entry;

pub use aggregate::{AggregationStats, InputAggregator};
pub use entry::LedgerEntry;
