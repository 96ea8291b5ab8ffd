//! Ownership precedence between direct and structural attribution.
//!
//! An entry's effective company is, first match wins:
//! 1. the company owning its cost center,
//! 2. the company owning its department,
//! 3. its own `company_id`.
//!
//! A cost center is owned by its department's company; a cost center without
//! a department (or whose department has no company) falls back to its own
//! company tag.

use std::collections::HashMap;

use budgetry_shared::types::{CompanyId, CostCenterId, DepartmentId};

use super::types::BusinessUnits;
use crate::ledger::LedgerEntry;

/// Derived business-unit ownership lookups.
#[derive(Debug, Clone, Default)]
pub struct OwnershipMap {
    department_company: HashMap<DepartmentId, CompanyId>,
    cost_center_company: HashMap<CostCenterId, CompanyId>,
    cost_center_department: HashMap<CostCenterId, DepartmentId>,
}

impl OwnershipMap {
    /// Builds the lookups from master data.
    #[must_use]
    pub fn new(units: &BusinessUnits) -> Self {
        let department_company: HashMap<DepartmentId, CompanyId> = units
            .departments
            .iter()
            .filter_map(|d| d.company_id.map(|company| (d.id, company)))
            .collect();

        let mut cost_center_company = HashMap::new();
        let mut cost_center_department = HashMap::new();
        for cost_center in &units.cost_centers {
            if let Some(department) = cost_center.department_id {
                cost_center_department.insert(cost_center.id, department);
            }
            let owner = cost_center
                .department_id
                .and_then(|d| department_company.get(&d).copied())
                .or(cost_center.company_id);
            if let Some(company) = owner {
                cost_center_company.insert(cost_center.id, company);
            }
        }

        Self {
            department_company,
            cost_center_company,
            cost_center_department,
        }
    }

    /// Company owning a cost center, if known.
    #[must_use]
    pub fn company_of_cost_center(&self, id: CostCenterId) -> Option<CompanyId> {
        self.cost_center_company.get(&id).copied()
    }

    /// Company owning a department, if known.
    #[must_use]
    pub fn company_of_department(&self, id: DepartmentId) -> Option<CompanyId> {
        self.department_company.get(&id).copied()
    }

    /// Department a cost center sits in, if known.
    #[must_use]
    pub fn department_of_cost_center(&self, id: CostCenterId) -> Option<DepartmentId> {
        self.cost_center_department.get(&id).copied()
    }

    /// The company an entry rolls up to.
    #[must_use]
    pub fn effective_company(&self, entry: &LedgerEntry) -> CompanyId {
        entry
            .cost_center_id
            .and_then(|cc| self.company_of_cost_center(cc))
            .or_else(|| {
                entry
                    .department_id
                    .and_then(|d| self.company_of_department(d))
            })
            .unwrap_or(entry.company_id)
    }

    /// The department an entry rolls up to: its cost center's department,
    /// else its own department tag.
    #[must_use]
    pub fn effective_department(&self, entry: &LedgerEntry) -> Option<DepartmentId> {
        entry
            .cost_center_id
            .and_then(|cc| self.department_of_cost_center(cc))
            .or(entry.department_id)
    }
}
