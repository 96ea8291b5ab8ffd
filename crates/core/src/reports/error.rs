//! Report error types.

use budgetry_shared::types::{CompanyId, CostCenterId};
use thiserror::Error;

/// Errors for drill-down requests naming master data that does not exist.
///
/// Computation itself never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Company not in the tenant's master data.
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    /// Cost center not in the tenant's master data.
    #[error("Cost center not found: {0}")]
    CostCenterNotFound(CostCenterId),

    /// Cost center owned by a different company.
    #[error("Cost center {cost_center} does not belong to company {company}")]
    CostCenterOutsideCompany {
        /// Requested company.
        company: CompanyId,
        /// Requested cost center.
        cost_center: CostCenterId,
    },
}
