//! Statement engine for Budgetry.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It turns a tenant's chart of accounts plus a set of ledger entries into a
//! month-by-month income statement, and rolls the same entries up by business
//! unit.
//!
//! # Modules
//!
//! - `chart` - Account records, code ordering, and the account tree
//! - `ledger` - Ledger entries and their aggregation into input accounts
//! - `formula` - Arithmetic formulas over `@code` references
//! - `resolution` - Fixed-point resolution of derived accounts
//! - `dimension` - Business units, ownership precedence, and entry scopes
//! - `reports` - Statements, summary metrics, and dimensional roll-ups

pub mod chart;
pub mod dimension;
pub mod formula;
pub mod ledger;
pub mod reports;
pub mod resolution;
