//! Roll-ups by business unit.
//!
//! Every roll-up follows the same pattern: select the entries a unit owns,
//! recompute the full statement over that subset, and read the summary
//! metrics off it. Scopes share nothing but the prepared chart, so they run
//! in parallel.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use budgetry_shared::AppConfig;
use budgetry_shared::types::{CompanyId, CostCenterId};
use rayon::prelude::*;
use tracing::debug;

use super::error::ReportError;
use super::metrics::MetricExtractor;
use super::service::{PreparedChart, StatementService};
use super::types::{
    BreakdownRow, ClientSummary, CompanySummary, CostCenterSummary, DashboardSummary,
    DepartmentSummary, MetricSummary, Statement,
};
use crate::chart::Account;
use crate::dimension::{BusinessUnits, EntryScope, OwnershipMap};
use crate::ledger::LedgerEntry;

/// Name of the bucket holding entries without a known dimension value.
pub const UNASSIGNED: &str = "Unassigned";

/// Snapshot of one tenant's data for a year and version.
#[derive(Debug)]
pub struct Snapshot<'a> {
    chart: PreparedChart,
    entries: &'a [LedgerEntry],
    units: &'a BusinessUnits,
    ownership: OwnershipMap,
}

impl<'a> Snapshot<'a> {
    /// Prepares the chart and ownership lookups once.
    #[must_use]
    pub fn new(
        accounts: &[Account],
        entries: &'a [LedgerEntry],
        units: &'a BusinessUnits,
    ) -> Self {
        Self {
            chart: PreparedChart::new(accounts),
            entries,
            units,
            ownership: OwnershipMap::new(units),
        }
    }

    /// Entries whose effective company is `company`.
    fn company_entries(&self, company: CompanyId) -> Vec<&'a LedgerEntry> {
        EntryScope::new()
            .company(company)
            .select(self.entries, Some(&self.ownership))
    }
}

/// Computes statements and metric summaries per business unit.
#[derive(Debug, Clone, Default)]
pub struct DimensionalAggregator {
    service: StatementService,
    metrics: MetricExtractor,
}

impl DimensionalAggregator {
    /// Creates an aggregator from configuration.
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            service: StatementService::new(&config.engine),
            metrics: MetricExtractor::new(config.metrics.clone(), &config.report),
        }
    }

    /// Statement over every entry of the snapshot.
    #[must_use]
    pub fn grand_total(&self, snapshot: &Snapshot<'_>) -> Statement {
        self.service.compute(&snapshot.chart, snapshot.entries)
    }

    /// Statement over an arbitrary scope, matched with ownership precedence.
    #[must_use]
    pub fn scoped(&self, snapshot: &Snapshot<'_>, scope: &EntryScope) -> Statement {
        let entries = scope.select(snapshot.entries, Some(&snapshot.ownership));
        self.service.compute(&snapshot.chart, entries)
    }

    /// Statement of one company's effective entries.
    pub fn company_statement(
        &self,
        snapshot: &Snapshot<'_>,
        company: CompanyId,
    ) -> Result<Statement, ReportError> {
        if !snapshot.units.companies.iter().any(|c| c.id == company) {
            return Err(ReportError::CompanyNotFound(company));
        }
        Ok(self
            .service
            .compute(&snapshot.chart, snapshot.company_entries(company)))
    }

    /// Statement of one cost center within a company.
    pub fn cost_center_statement(
        &self,
        snapshot: &Snapshot<'_>,
        company: CompanyId,
        cost_center: CostCenterId,
    ) -> Result<Statement, ReportError> {
        if !snapshot.units.companies.iter().any(|c| c.id == company) {
            return Err(ReportError::CompanyNotFound(company));
        }
        if !snapshot.units.cost_centers.iter().any(|c| c.id == cost_center) {
            return Err(ReportError::CostCenterNotFound(cost_center));
        }
        if let Some(owner) = snapshot.ownership.company_of_cost_center(cost_center)
            && owner != company
        {
            return Err(ReportError::CostCenterOutsideCompany {
                company,
                cost_center,
            });
        }
        let entries = snapshot
            .company_entries(company)
            .into_iter()
            .filter(|e| e.cost_center_id == Some(cost_center));
        Ok(self.service.compute(&snapshot.chart, entries))
    }

    /// Roll-up of every company with its active cost centers.
    #[must_use]
    pub fn company_summaries(&self, snapshot: &Snapshot<'_>) -> Vec<CompanySummary> {
        snapshot
            .units
            .companies
            .par_iter()
            .map(|company| {
                let entries = snapshot.company_entries(company.id);
                debug!(
                    company = %company.id,
                    entries = entries.len(),
                    "Computing company roll-up"
                );
                let metrics = self.summarize(&snapshot.chart, entries.iter().copied());
                let cost_centers = self.cost_center_summaries(snapshot, &entries);
                CompanySummary {
                    company_id: company.id,
                    name: company.name.clone(),
                    metrics,
                    cost_centers,
                }
            })
            .collect()
    }

    /// Roll-up of every known cost center that has entries among
    /// `company_entries`, in master-data order.
    fn cost_center_summaries(
        &self,
        snapshot: &Snapshot<'_>,
        company_entries: &[&LedgerEntry],
    ) -> Vec<CostCenterSummary> {
        let active: HashSet<CostCenterId> = company_entries
            .iter()
            .filter_map(|e| e.cost_center_id)
            .collect();

        snapshot
            .units
            .cost_centers
            .par_iter()
            .filter(|cc| active.contains(&cc.id))
            .map(|cc| {
                let entries = company_entries
                    .iter()
                    .copied()
                    .filter(|e| e.cost_center_id == Some(cc.id));
                CostCenterSummary {
                    cost_center_id: cc.id,
                    name: cc.name.clone(),
                    metrics: self.summarize(&snapshot.chart, entries),
                }
            })
            .collect()
    }

    /// Breakdown by effective department, plus an unassigned bucket.
    #[must_use]
    pub fn department_breakdown(&self, snapshot: &Snapshot<'_>) -> Vec<DepartmentSummary> {
        let known: Vec<_> = snapshot
            .units
            .departments
            .iter()
            .map(|d| (d.id, d.name.as_str()))
            .collect();
        self.breakdown(snapshot, &known, |e| snapshot.ownership.effective_department(e))
    }

    /// Breakdown by client, plus an unassigned bucket.
    #[must_use]
    pub fn client_breakdown(&self, snapshot: &Snapshot<'_>) -> Vec<ClientSummary> {
        let known: Vec<_> = snapshot
            .units
            .clients
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();
        self.breakdown(snapshot, &known, |e| e.client_id)
    }

    /// Everything a summary dashboard shows.
    #[must_use]
    pub fn dashboard(&self, snapshot: &Snapshot<'_>) -> DashboardSummary {
        let (total, (companies, (departments, clients))) = rayon::join(
            || self.grand_total(snapshot),
            || {
                rayon::join(
                    || self.company_summaries(snapshot),
                    || {
                        rayon::join(
                            || self.department_breakdown(snapshot),
                            || self.client_breakdown(snapshot),
                        )
                    },
                )
            },
        );

        DashboardSummary {
            grand_total: self.metrics.summarize(&total),
            series: self.metrics.series(&total),
            outcome: total.outcome,
            companies,
            departments,
            clients,
        }
    }

    fn summarize<'e, I>(&self, chart: &PreparedChart, entries: I) -> MetricSummary
    where
        I: IntoIterator<Item = &'e LedgerEntry>,
    {
        self.metrics.summarize(&self.service.compute(chart, entries))
    }

    /// Groups entries by `key`, treating ids outside `known` as unassigned,
    /// and summarizes each non-empty group. Known groups come first in
    /// `known` order, the unassigned bucket last.
    fn breakdown<Id, F>(
        &self,
        snapshot: &Snapshot<'_>,
        known: &[(Id, &str)],
        key: F,
    ) -> Vec<BreakdownRow<Id>>
    where
        Id: Copy + Eq + Hash + Send + Sync,
        F: Fn(&LedgerEntry) -> Option<Id>,
    {
        let names: HashMap<Id, &str> = known.iter().copied().collect();
        let mut groups: HashMap<Option<Id>, Vec<&LedgerEntry>> = HashMap::new();
        for entry in snapshot.entries {
            let id = key(entry).filter(|id| names.contains_key(id));
            groups.entry(id).or_default().push(entry);
        }

        let mut buckets: Vec<(Option<Id>, &str, Vec<&LedgerEntry>)> = Vec::new();
        for &(id, name) in known {
            if let Some(entries) = groups.remove(&Some(id)) {
                buckets.push((Some(id), name, entries));
            }
        }
        if let Some(entries) = groups.remove(&None) {
            buckets.push((None, UNASSIGNED, entries));
        }

        buckets
            .into_par_iter()
            .map(|(id, name, entries)| BreakdownRow {
                id,
                name: name.to_string(),
                metrics: self.summarize(&snapshot.chart, entries),
            })
            .collect()
    }
}
