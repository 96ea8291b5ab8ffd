//! Common types used across the application.

pub mod id;
pub mod monthly;

pub use id::*;
pub use monthly::{MONTHS_PER_YEAR, MonthlyError, MonthlyValues};
