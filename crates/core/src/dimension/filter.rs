//! Dimensional scoping of ledger entries.

use budgetry_shared::types::{
    ClientId, CompanyId, CostCenterId, DepartmentId, SegmentId, VersionId,
};
use serde::{Deserialize, Serialize};

use super::ownership::OwnershipMap;
use crate::ledger::LedgerEntry;

/// Scope a statement is computed for.
///
/// Every set field must match; an empty scope matches everything. Company and
/// department constraints compare against the effective business unit when
/// an [`OwnershipMap`] is supplied and the raw entry tags otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryScope {
    /// Company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
    /// Cost center.
    #[serde(default)]
    pub cost_center_id: Option<CostCenterId>,
    /// Department.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// Client.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    /// Segment.
    #[serde(default)]
    pub segment_id: Option<SegmentId>,
    /// Budget version.
    #[serde(default)]
    pub version_id: Option<VersionId>,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl EntryScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one company.
    #[must_use]
    pub const fn company(mut self, id: CompanyId) -> Self {
        self.company_id = Some(id);
        self
    }

    /// Restricts to one cost center.
    #[must_use]
    pub const fn cost_center(mut self, id: CostCenterId) -> Self {
        self.cost_center_id = Some(id);
        self
    }

    /// Restricts to one department.
    #[must_use]
    pub const fn department(mut self, id: DepartmentId) -> Self {
        self.department_id = Some(id);
        self
    }

    /// Restricts to one client.
    #[must_use]
    pub const fn client(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Restricts to one segment.
    #[must_use]
    pub const fn segment(mut self, id: SegmentId) -> Self {
        self.segment_id = Some(id);
        self
    }

    /// Restricts to one budget version.
    #[must_use]
    pub const fn version(mut self, id: VersionId) -> Self {
        self.version_id = Some(id);
        self
    }

    /// Restricts to one year.
    #[must_use]
    pub const fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Returns true if the scope matches everything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.company_id.is_none()
            && self.cost_center_id.is_none()
            && self.department_id.is_none()
            && self.client_id.is_none()
            && self.segment_id.is_none()
            && self.version_id.is_none()
            && self.year.is_none()
    }

    /// Tests one entry against the scope.
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry, ownership: Option<&OwnershipMap>) -> bool {
        if let Some(company) = self.company_id {
            let effective = ownership.map_or(entry.company_id, |o| o.effective_company(entry));
            if effective != company {
                return false;
            }
        }
        if let Some(department) = self.department_id {
            let effective = match ownership {
                Some(o) => o.effective_department(entry),
                None => entry.department_id,
            };
            if effective != Some(department) {
                return false;
            }
        }
        matches_optional(self.cost_center_id, entry.cost_center_id)
            && matches_optional(self.client_id, entry.client_id)
            && matches_optional(self.segment_id, entry.segment_id)
            && matches_optional(self.version_id, entry.version_id)
            && self.year.is_none_or(|year| entry.year == year)
    }

    /// Entries matching the scope, in input order.
    #[must_use]
    pub fn select<'a>(
        &self,
        entries: &'a [LedgerEntry],
        ownership: Option<&OwnershipMap>,
    ) -> Vec<&'a LedgerEntry> {
        entries
            .iter()
            .filter(|entry| self.matches(entry, ownership))
            .collect()
    }
}

fn matches_optional<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
    wanted.is_none_or(|wanted| actual == Some(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::types::{BusinessUnits, CostCenter, Department};
    use budgetry_shared::types::AccountId;
    use rust_decimal_macros::dec;

    fn entry(company: CompanyId) -> LedgerEntry {
        LedgerEntry::new(AccountId::new(), company, 2025, 1, dec!(1))
    }

    #[test]
    fn test_empty_scope_matches_everything() {
        let scope = EntryScope::new();
        assert!(scope.is_empty());
        assert!(scope.matches(&entry(CompanyId::new()), None));
    }

    #[test]
    fn test_company_uses_raw_tag_without_ownership() {
        let company = CompanyId::new();
        let scope = EntryScope::new().company(company);
        assert!(scope.matches(&entry(company), None));
        assert!(!scope.matches(&entry(CompanyId::new()), None));
    }

    #[test]
    fn test_company_uses_effective_owner_with_ownership() {
        let tagged = CompanyId::new();
        let owner = CompanyId::new();
        let department = DepartmentId::new();
        let cost_center = CostCenterId::new();
        let units = BusinessUnits {
            departments: vec![Department {
                id: department,
                name: "Ops".to_string(),
                company_id: Some(owner),
            }],
            cost_centers: vec![CostCenter {
                id: cost_center,
                name: "Plant".to_string(),
                department_id: Some(department),
                company_id: None,
            }],
            ..BusinessUnits::default()
        };
        let ownership = OwnershipMap::new(&units);
        let e = entry(tagged).with_cost_center(cost_center);

        assert!(EntryScope::new().company(owner).matches(&e, Some(&ownership)));
        assert!(!EntryScope::new().company(tagged).matches(&e, Some(&ownership)));
        assert!(EntryScope::new().department(department).matches(&e, Some(&ownership)));
        assert!(!EntryScope::new().department(department).matches(&e, None));
    }

    #[test]
    fn test_optional_dimensions_and_year() {
        let company = CompanyId::new();
        let client = ClientId::new();
        let version = VersionId::new();
        let e = entry(company).with_client(client).with_version(version);

        assert!(EntryScope::new().client(client).version(version).year(2025).matches(&e, None));
        assert!(!EntryScope::new().client(ClientId::new()).matches(&e, None));
        assert!(!EntryScope::new().segment(SegmentId::new()).matches(&e, None));
        assert!(!EntryScope::new().year(2024).matches(&e, None));
    }

    #[test]
    fn test_select_keeps_order() {
        let a = CompanyId::new();
        let b = CompanyId::new();
        let entries = vec![entry(a), entry(b), entry(a)];
        let selected = EntryScope::new().company(a).select(&entries, None);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, entries[0].id);
        assert_eq!(selected[1].id, entries[2].id);
    }
}
