//! Business-unit master data.

use budgetry_shared::types::{ClientId, CompanyId, CostCenterId, DepartmentId};
use serde::{Deserialize, Serialize};

/// A company: the top-level business unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
}

/// A department, owned by at most one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department ID.
    pub id: DepartmentId,
    /// Display name.
    pub name: String,
    /// Owning company.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

/// A cost center, usually placed under a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center ID.
    pub id: CostCenterId,
    /// Display name.
    pub name: String,
    /// Department the cost center sits in.
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    /// Company tag used when there is no department.
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

/// A client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// Display name.
    pub name: String,
}

/// All dimension master data of one tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessUnits {
    /// Companies, in display order.
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Departments, in display order.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Cost centers, in display order.
    #[serde(default)]
    pub cost_centers: Vec<CostCenter>,
    /// Clients, in display order.
    #[serde(default)]
    pub clients: Vec<Client>,
}
