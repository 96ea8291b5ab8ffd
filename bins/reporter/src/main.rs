//! Budgetry reporter
//!
//! Feeds a JSON snapshot through the statement engine and prints the result.
//!
//! Usage: `reporter <snapshot.json> [summary|statement] [--company ID [--cost-center ID]]`

mod snapshot;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use budgetry_core::chart::ChartDiagnostics;
use budgetry_core::reports::{DimensionalAggregator, ReportError, Snapshot};
use budgetry_shared::types::{CompanyId, CostCenterId};
use budgetry_shared::{AppConfig, AppError};

use snapshot::SnapshotFile;

/// Computes income statements and dashboards from a JSON snapshot
#[derive(Parser)]
#[command(name = "reporter", version)]
struct Cli {
    /// Snapshot file (accounts, entries, companies, departments, cost centers, clients)
    snapshot: PathBuf,

    /// What to print
    #[arg(value_enum, default_value = "summary")]
    report: Report,

    /// Restrict the statement to one company's effective entries
    #[arg(long)]
    company: Option<CompanyId>,

    /// Restrict the statement to one cost center within `--company`
    #[arg(long, requires = "company")]
    cost_center: Option<CostCenterId>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Report {
    /// Dashboard: grand total, monthly series, and business-unit roll-ups
    Summary,
    /// Resolved statement rows
    Statement,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetry=info,reporter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().map_err(|e| AppError::Configuration(e.to_string()))?;

    let mut file = SnapshotFile::read(&cli.snapshot)
        .with_context(|| format!("Failed to read snapshot {}", cli.snapshot.display()))?;
    file.retain_in_scope();

    let issues = ChartDiagnostics::log(&file.accounts);
    info!(
        accounts = file.accounts.len(),
        entries = file.entries.len(),
        issues = issues.len(),
        "Snapshot ready"
    );

    let aggregator = DimensionalAggregator::new(&config);
    let snapshot = Snapshot::new(&file.accounts, &file.entries, &file.units);

    let output = match cli.report {
        Report::Summary => serde_json::to_string_pretty(&aggregator.dashboard(&snapshot))?,
        Report::Statement => {
            let statement = match (cli.company, cli.cost_center) {
                (Some(company), Some(cost_center)) => aggregator
                    .cost_center_statement(&snapshot, company, cost_center)
                    .map_err(into_app_error)?,
                (Some(company), None) => aggregator
                    .company_statement(&snapshot, company)
                    .map_err(into_app_error)?,
                _ => aggregator.grand_total(&snapshot),
            };
            if !statement.outcome.stable {
                info!(passes = statement.outcome.passes, "Statement did not stabilize");
            }
            serde_json::to_string_pretty(&statement)?
        }
    };

    println!("{output}");
    Ok(())
}

fn into_app_error(err: ReportError) -> AppError {
    match err {
        ReportError::CompanyNotFound(_) | ReportError::CostCenterNotFound(_) => {
            AppError::NotFound(err.to_string())
        }
        ReportError::CostCenterOutsideCompany { .. } => AppError::Validation(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_down_errors_map_to_app_errors() {
        let company = CompanyId::new();
        let cost_center = CostCenterId::new();

        assert_eq!(
            into_app_error(ReportError::CompanyNotFound(company)).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            into_app_error(ReportError::CostCenterNotFound(cost_center)).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            into_app_error(ReportError::CostCenterOutsideCompany {
                company,
                cost_center
            })
            .error_code(),
            "VALIDATION_ERROR"
        );
    }
}
