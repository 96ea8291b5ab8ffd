//! Ledger entry domain types.

use budgetry_shared::types::{
    AccountId, ClientId, CompanyId, CostCenterId, DepartmentId, LedgerEntryId, SegmentId,
    VersionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One dimensioned monthly amount recorded against an INPUT account.
///
/// Callers keep (account, month, year, version, dimensions) unique; when they
/// don't, duplicates are summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The account this amount is recorded against.
    pub account_id: AccountId,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Signed amount.
    pub amount: Decimal,
    /// Company the entry was tagged with.
    pub company_id: CompanyId,
    /// Cost center, if any.
    #[serde(default)]
    pub cost_center_id: Option<CostCenterId>,
    /// Client, if any.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Department (entry grouping), if any.
    #[serde(default, alias = "grouping_id")]
    pub department_id: Option<DepartmentId>,
    /// Business segment, if any.
    #[serde(default)]
    pub segment_id: Option<SegmentId>,
    /// Budget version (scenario), if any.
    #[serde(default)]
    pub version_id: Option<VersionId>,
}

impl LedgerEntry {
    /// Creates an entry tagged only with a company.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        company_id: CompanyId,
        year: i32,
        month: u32,
        amount: Decimal,
    ) -> Self {
        Self {
            id: LedgerEntryId::new(),
            account_id,
            month,
            year,
            amount,
            company_id,
            cost_center_id: None,
            client_id: None,
            department_id: None,
            segment_id: None,
            version_id: None,
        }
    }

    /// Tags the entry with a cost center.
    #[must_use]
    pub fn with_cost_center(mut self, cost_center_id: CostCenterId) -> Self {
        self.cost_center_id = Some(cost_center_id);
        self
    }

    /// Tags the entry with a department.
    #[must_use]
    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Tags the entry with a client.
    #[must_use]
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Tags the entry with a segment.
    #[must_use]
    pub fn with_segment(mut self, segment_id: SegmentId) -> Self {
        self.segment_id = Some(segment_id);
        self
    }

    /// Tags the entry with a budget version.
    #[must_use]
    pub fn with_version(mut self, version_id: VersionId) -> Self {
        self.version_id = Some(version_id);
        self
    }
}
