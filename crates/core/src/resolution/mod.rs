//! Resolution of DERIVED account values.
//!
//! - `plan` - picks each row's strategy once per chart
//! - `engine` - bounded fixed-point passes over the row list

pub mod engine;
pub mod plan;


pub use engine::{ResolutionEngine, ResolutionOutcome};
pub use plan::{ResolutionPlan, Strategy};
