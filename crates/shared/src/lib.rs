//! Shared types, errors, and configuration for Budgetry.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Twelve-month value vectors with decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, EngineConfig, MetricCodes, ReportConfig};
pub use error::{AppError, AppResult};
