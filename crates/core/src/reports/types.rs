//! Report data types.

use budgetry_shared::MetricCodes;
use budgetry_shared::types::{
    AccountId, ClientId, CompanyId, CostCenterId, DepartmentId, MonthlyValues,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::{AccountKind, ResolvedRow};
use crate::ledger::AggregationStats;
use crate::resolution::ResolutionOutcome;

/// One statement line in row order, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Input or derived.
    pub kind: AccountKind,
    /// Display depth derived from the code.
    pub level: usize,
    /// January..December.
    pub values: MonthlyValues,
    /// Year total.
    pub total: Decimal,
}

/// Fully resolved statement for one scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    /// Resolved account forest.
    pub rows: Vec<ResolvedRow>,
    /// Every row, flattened depth-first.
    pub lines: Vec<StatementLine>,
    /// Resolution passes and stability.
    pub outcome: ResolutionOutcome,
    /// What happened to the scope's ledger entries.
    pub aggregation: AggregationStats,
}

impl Statement {
    /// First line carrying a code.
    #[must_use]
    pub fn line(&self, code: &str) -> Option<&StatementLine> {
        self.lines.iter().find(|line| line.code == code)
    }

    /// Monthly values of a code, if present.
    #[must_use]
    pub fn values_of(&self, code: &str) -> Option<&MonthlyValues> {
        self.line(code).map(|line| &line.values)
    }

    /// Year total of a code; zero if absent.
    #[must_use]
    pub fn year_total(&self, code: &str) -> Decimal {
        self.line(code).map_or(Decimal::ZERO, |line| line.total)
    }
}

/// Income statement summary lines, identified by tenant-convention codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Gross revenue.
    GrossRevenue,
    /// Deductions from gross revenue.
    Deductions,
    /// Net revenue.
    NetRevenue,
    /// Operational costs.
    OperationalCosts,
    /// Gross margin.
    GrossMargin,
    /// Operating expenses.
    OperatingExpenses,
    /// Gross profit.
    GrossProfit,
    /// Administrative expenses.
    AdminExpenses,
    /// EBITDA.
    Ebitda,
    /// Financial expenses.
    FinancialExpenses,
    /// Net profit.
    NetProfit,
}

impl MetricKind {
    /// Every metric, in statement order.
    pub const ALL: [Self; 11] = [
        Self::GrossRevenue,
        Self::Deductions,
        Self::NetRevenue,
        Self::OperationalCosts,
        Self::GrossMargin,
        Self::OperatingExpenses,
        Self::GrossProfit,
        Self::AdminExpenses,
        Self::Ebitda,
        Self::FinancialExpenses,
        Self::NetProfit,
    ];

    /// Account code of this metric under a tenant convention.
    #[must_use]
    pub fn code(self, codes: &MetricCodes) -> &str {
        match self {
            Self::GrossRevenue => &codes.gross_revenue,
            Self::Deductions => &codes.deductions,
            Self::NetRevenue => &codes.net_revenue,
            Self::OperationalCosts => &codes.operational_costs,
            Self::GrossMargin => &codes.gross_margin,
            Self::OperatingExpenses => &codes.operating_expenses,
            Self::GrossProfit => &codes.gross_profit,
            Self::AdminExpenses => &codes.admin_expenses,
            Self::Ebitda => &codes.ebitda,
            Self::FinancialExpenses => &codes.financial_expenses,
            Self::NetProfit => &codes.net_profit,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GrossRevenue => "Gross revenue",
            Self::Deductions => "Revenue deductions",
            Self::NetRevenue => "Net revenue",
            Self::OperationalCosts => "Operational costs",
            Self::GrossMargin => "Gross margin",
            Self::OperatingExpenses => "Operating expenses",
            Self::GrossProfit => "Gross profit",
            Self::AdminExpenses => "Administrative expenses",
            Self::Ebitda => "EBITDA",
            Self::FinancialExpenses => "Financial expenses",
            Self::NetProfit => "Net profit",
        }
    }
}

/// Year total of one metric with its vertical analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValue {
    /// Metric.
    pub metric: MetricKind,
    /// Account code it was read from.
    pub code: String,
    /// Sum of the twelve months.
    pub total: Decimal,
    /// Total as a percent of gross revenue (0 when gross revenue is 0).
    pub vertical_percent: Decimal,
}

/// Every metric of one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Metrics in statement order.
    pub metrics: Vec<MetricValue>,
}

impl MetricSummary {
    /// Value of one metric.
    #[must_use]
    pub fn get(&self, metric: MetricKind) -> Option<&MetricValue> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    /// Year total of one metric; zero if absent.
    #[must_use]
    pub fn total(&self, metric: MetricKind) -> Decimal {
        self.get(metric).map_or(Decimal::ZERO, |m| m.total)
    }

    /// Vertical percent of one metric; zero if absent.
    #[must_use]
    pub fn vertical_percent(&self, metric: MetricKind) -> Decimal {
        self.get(metric).map_or(Decimal::ZERO, |m| m.vertical_percent)
    }
}

/// Monthly series of one metric, for charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSeries {
    /// Metric.
    pub metric: MetricKind,
    /// Account code it was read from.
    pub code: String,
    /// January..December.
    pub values: MonthlyValues,
}

/// Roll-up of one cost center inside a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterSummary {
    /// Cost center ID.
    pub cost_center_id: CostCenterId,
    /// Cost center name.
    pub name: String,
    /// Metrics over the cost center's entries.
    pub metrics: MetricSummary,
}

/// Roll-up of one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    /// Company ID.
    pub company_id: CompanyId,
    /// Company name.
    pub name: String,
    /// Metrics over the company's effective entries.
    pub metrics: MetricSummary,
    /// Active cost centers, in master-data order.
    pub cost_centers: Vec<CostCenterSummary>,
}

/// One row of a breakdown along a single dimension.
///
/// `id` is `None` for the bucket of entries without a (known) value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow<Id> {
    /// Dimension value.
    pub id: Option<Id>,
    /// Display name.
    pub name: String,
    /// Metrics over the bucket's entries.
    pub metrics: MetricSummary,
}

/// Breakdown row by department.
pub type DepartmentSummary = BreakdownRow<DepartmentId>;

/// Breakdown row by client.
pub type ClientSummary = BreakdownRow<ClientId>;

/// Everything a summary dashboard shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Metrics over all entries.
    pub grand_total: MetricSummary,
    /// Monthly metric series over all entries.
    pub series: Vec<MetricSeries>,
    /// Resolution outcome of the grand-total statement.
    pub outcome: ResolutionOutcome,
    /// Company roll-ups with nested cost centers.
    pub companies: Vec<CompanySummary>,
    /// Department breakdown.
    pub departments: Vec<DepartmentSummary>,
    /// Client breakdown.
    pub clients: Vec<ClientSummary>,
}
