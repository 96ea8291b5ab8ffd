//! Statements and roll-ups.
//!
//! - `service` - one resolved statement over a set of entries
//! - `metrics` - summary lines and vertical analysis read off a statement
//! - `aggregator` - the same computation per company, cost center,
//!   department and client

pub mod aggregator;
pub mod error;
pub mod metrics;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregator::{DimensionalAggregator, Snapshot, UNASSIGNED};
pub use error::ReportError;
pub use metrics::MetricExtractor;
pub use service::{PreparedChart, StatementService};
pub use types::*;
