//! Business units and dimensional scoping.
//!
//! - `types` - company / department / cost center / client master data
//! - `ownership` - effective company and department of an entry
//! - `filter` - entry scopes

pub mod filter;
pub mod ownership;
pub mod types;

pub use filter::EntryScope;
pub use ownership::OwnershipMap;
pub use types::{BusinessUnits, Client, Company, CostCenter, Department};
