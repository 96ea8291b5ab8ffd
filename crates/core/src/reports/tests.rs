//! Scenario and property-based tests for reports module.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aggregator::{DimensionalAggregator, Snapshot, UNASSIGNED};
use super::error::ReportError;
use super::types::MetricKind;
use crate::chart::Account;
use crate::dimension::{BusinessUnits, Client, Company, CostCenter, Department, EntryScope};
use crate::ledger::LedgerEntry;
use budgetry_shared::types::{ClientId, CompanyId, CostCenterId, DepartmentId};

struct Fixture {
    accounts: Vec<Account>,
    units: BusinessUnits,
    company_a: CompanyId,
    company_b: CompanyId,
    department_b: DepartmentId,
    cost_center_b: CostCenterId,
    loose_cost_center: CostCenterId,
    client: ClientId,
}

impl Fixture {
    /// Two companies; a department and cost center owned by B; a cost center
    /// without a department tagged with A; one client.
    fn new() -> Self {
        let revenue = Account::derived("1", "Gross revenue");
        let sales = Account::input("1.1", "Sales").with_parent(revenue.id);
        let accounts = vec![
            revenue,
            sales,
            Account::derived("2", "Deductions").with_percentage_of("1", dec!(-10)),
            Account::derived("3", "Net revenue").with_formula("@1 + @2"),
        ];

        let company_a = CompanyId::new();
        let company_b = CompanyId::new();
        let department_b = DepartmentId::new();
        let cost_center_b = CostCenterId::new();
        let loose_cost_center = CostCenterId::new();
        let client = ClientId::new();

        let units = BusinessUnits {
            companies: vec![
                Company { id: company_a, name: "Alpha".to_string() },
                Company { id: company_b, name: "Beta".to_string() },
            ],
            departments: vec![Department {
                id: department_b,
                name: "Sales".to_string(),
                company_id: Some(company_b),
            }],
            cost_centers: vec![
                CostCenter {
                    id: cost_center_b,
                    name: "Field sales".to_string(),
                    department_id: Some(department_b),
                    company_id: None,
                },
                CostCenter {
                    id: loose_cost_center,
                    name: "Shared services".to_string(),
                    department_id: None,
                    company_id: Some(company_a),
                },
            ],
            clients: vec![Client { id: client, name: "Acme".to_string() }],
        };

        Self {
            accounts,
            units,
            company_a,
            company_b,
            department_b,
            cost_center_b,
            loose_cost_center,
            client,
        }
    }

    fn sales(&self) -> &Account {
        &self.accounts[1]
    }

    fn entry(&self, company: CompanyId, month: u32, amount: Decimal) -> LedgerEntry {
        LedgerEntry::new(self.sales().id, company, 2025, month, amount)
    }
}

fn gross(summary: &super::types::MetricSummary) -> Decimal {
    summary.total(MetricKind::GrossRevenue)
}

#[test]
fn test_company_filters_and_grand_total() {
    let f = Fixture::new();
    let entries = vec![
        f.entry(f.company_a, 1, dec!(1000)),
        f.entry(f.company_b, 1, dec!(2000)),
    ];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);
    let aggregator = DimensionalAggregator::default();

    let a = aggregator.company_statement(&snapshot, f.company_a).unwrap();
    let b = aggregator.company_statement(&snapshot, f.company_b).unwrap();
    let total = aggregator.grand_total(&snapshot);

    assert_eq!(a.values_of("1").unwrap()[0], dec!(1000));
    assert_eq!(b.values_of("1").unwrap()[0], dec!(2000));
    assert_eq!(total.values_of("1").unwrap()[0], dec!(3000));
    assert_eq!(total.values_of("3").unwrap()[0], dec!(2700));
}

#[test]
fn test_cost_center_lineage_beats_company_tag() {
    let f = Fixture::new();
    let entries = vec![f.entry(f.company_a, 3, dec!(500)).with_cost_center(f.cost_center_b)];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let companies = DimensionalAggregator::default().company_summaries(&snapshot);

    assert_eq!(companies[0].company_id, f.company_a);
    assert_eq!(gross(&companies[0].metrics), dec!(0));
    assert!(companies[0].cost_centers.is_empty());
    assert_eq!(companies[1].company_id, f.company_b);
    assert_eq!(gross(&companies[1].metrics), dec!(500));
    assert_eq!(companies[1].cost_centers.len(), 1);
    assert_eq!(companies[1].cost_centers[0].cost_center_id, f.cost_center_b);
    assert_eq!(gross(&companies[1].cost_centers[0].metrics), dec!(500));
}

#[test]
fn test_department_lineage_beats_company_tag() {
    let f = Fixture::new();
    let entries = vec![f.entry(f.company_a, 2, dec!(80)).with_department(f.department_b)];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);
    let aggregator = DimensionalAggregator::default();

    let b = aggregator.company_statement(&snapshot, f.company_b).unwrap();
    let a = aggregator.company_statement(&snapshot, f.company_a).unwrap();

    assert_eq!(b.year_total("1"), dec!(80));
    assert_eq!(a.year_total("1"), dec!(0));
}

#[test]
fn test_cost_center_without_department_uses_its_company_tag() {
    let f = Fixture::new();
    let entries = vec![f.entry(f.company_b, 1, dec!(40)).with_cost_center(f.loose_cost_center)];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let companies = DimensionalAggregator::default().company_summaries(&snapshot);

    assert_eq!(gross(&companies[0].metrics), dec!(40));
    assert_eq!(companies[0].cost_centers[0].name, "Shared services");
    assert_eq!(gross(&companies[1].metrics), dec!(0));
}

#[test]
fn test_unknown_cost_center_falls_back_to_entry_company() {
    let f = Fixture::new();
    let entries = vec![f.entry(f.company_b, 1, dec!(15)).with_cost_center(CostCenterId::new())];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let companies = DimensionalAggregator::default().company_summaries(&snapshot);

    assert_eq!(gross(&companies[1].metrics), dec!(15));
    // unknown cost centers are not listed
    assert!(companies[1].cost_centers.is_empty());
}

#[test]
fn test_vertical_percent_per_company() {
    let f = Fixture::new();
    let entries = vec![f.entry(f.company_a, 1, dec!(1000))];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let companies = DimensionalAggregator::default().company_summaries(&snapshot);

    let alpha = &companies[0].metrics;
    assert_eq!(alpha.vertical_percent(MetricKind::GrossRevenue), dec!(100));
    assert_eq!(alpha.vertical_percent(MetricKind::Deductions), dec!(-10));
    assert_eq!(alpha.vertical_percent(MetricKind::NetRevenue), dec!(90));
    // no gross revenue, no percentages
    assert_eq!(companies[1].metrics.vertical_percent(MetricKind::NetRevenue), dec!(0));
}

#[test]
fn test_cost_center_statement_drill_down() {
    let f = Fixture::new();
    let entries = vec![
        f.entry(f.company_b, 1, dec!(100)).with_cost_center(f.cost_center_b),
        f.entry(f.company_b, 1, dec!(7)),
    ];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);
    let aggregator = DimensionalAggregator::default();

    let statement = aggregator
        .cost_center_statement(&snapshot, f.company_b, f.cost_center_b)
        .unwrap();

    assert_eq!(statement.year_total("1"), dec!(100));
    assert_eq!(statement.aggregation.applied, 1);
}

#[test]
fn test_drill_down_errors() {
    let f = Fixture::new();
    let snapshot = Snapshot::new(&f.accounts, &[], &f.units);
    let aggregator = DimensionalAggregator::default();
    let stranger = CompanyId::new();
    let unknown_cc = CostCenterId::new();

    assert_eq!(
        aggregator.company_statement(&snapshot, stranger).unwrap_err(),
        ReportError::CompanyNotFound(stranger)
    );
    assert_eq!(
        aggregator
            .cost_center_statement(&snapshot, f.company_a, unknown_cc)
            .unwrap_err(),
        ReportError::CostCenterNotFound(unknown_cc)
    );
    assert_eq!(
        aggregator
            .cost_center_statement(&snapshot, f.company_a, f.cost_center_b)
            .unwrap_err(),
        ReportError::CostCenterOutsideCompany {
            company: f.company_a,
            cost_center: f.cost_center_b,
        }
    );
}

#[test]
fn test_department_breakdown_uses_effective_department() {
    let f = Fixture::new();
    let entries = vec![
        f.entry(f.company_a, 1, dec!(10)).with_cost_center(f.cost_center_b),
        f.entry(f.company_a, 1, dec!(20)),
        f.entry(f.company_a, 1, dec!(30)).with_department(DepartmentId::new()),
    ];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let departments = DimensionalAggregator::default().department_breakdown(&snapshot);

    assert_eq!(departments.len(), 2);
    assert_eq!(departments[0].id, Some(f.department_b));
    assert_eq!(gross(&departments[0].metrics), dec!(10));
    assert_eq!(departments[1].id, None);
    assert_eq!(departments[1].name, UNASSIGNED);
    assert_eq!(gross(&departments[1].metrics), dec!(50));
}

#[test]
fn test_client_breakdown_skips_empty_buckets() {
    let f = Fixture::new();
    let entries = vec![f.entry(f.company_a, 1, dec!(10)).with_client(f.client)];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let clients = DimensionalAggregator::default().client_breakdown(&snapshot);

    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Acme");
}

#[test]
fn test_dashboard() {
    let f = Fixture::new();
    let entries = vec![
        f.entry(f.company_a, 1, dec!(1000)),
        f.entry(f.company_b, 6, dec!(2000)).with_client(f.client),
    ];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let dashboard = DimensionalAggregator::default().dashboard(&snapshot);

    assert_eq!(gross(&dashboard.grand_total), dec!(3000));
    assert_eq!(dashboard.grand_total.total(MetricKind::NetRevenue), dec!(2700));
    assert_eq!(dashboard.series[0].values[0], dec!(1000));
    assert_eq!(dashboard.series[0].values[5], dec!(2000));
    assert!(dashboard.outcome.stable);
    assert_eq!(dashboard.companies.len(), 2);
    assert_eq!(dashboard.departments.len(), 1);
    assert_eq!(dashboard.clients.len(), 2);
}

#[test]
fn test_scoped_statement_by_year() {
    let f = Fixture::new();
    let entries = vec![
        f.entry(f.company_a, 1, dec!(5)),
        LedgerEntry::new(f.sales().id, f.company_a, 2024, 1, dec!(9)),
    ];
    let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

    let statement = DimensionalAggregator::default()
        .scoped(&snapshot, &EntryScope::new().company(f.company_a).year(2025));

    assert_eq!(statement.year_total("1"), dec!(5));
}

// ============================================================================
// Roll-ups reconcile with the grand total
// ============================================================================

/// Which master data an entry points at: 0 = none, 1 = known, 2 = unknown.
fn tag_strategy() -> impl Strategy<Value = u8> {
    0u8..3
}

fn entry_strategy() -> impl Strategy<Value = (bool, u8, u8, u8, u32, i64)> {
    (
        any::<bool>(),
        tag_strategy(),
        tag_strategy(),
        tag_strategy(),
        1u32..=12,
        -100_000i64..100_000i64,
    )
}

fn build_entries(f: &Fixture, specs: &[(bool, u8, u8, u8, u32, i64)]) -> Vec<LedgerEntry> {
    specs
        .iter()
        .map(|&(in_a, cost_center, department, client, month, cents)| {
            let company = if in_a { f.company_a } else { f.company_b };
            let mut entry = f.entry(company, month, Decimal::new(cents, 2));
            match cost_center {
                1 => entry = entry.with_cost_center(f.cost_center_b),
                2 => entry = entry.with_cost_center(CostCenterId::new()),
                _ => {}
            }
            match department {
                1 => entry = entry.with_department(f.department_b),
                2 => entry = entry.with_department(DepartmentId::new()),
                _ => {}
            }
            match client {
                1 => entry = entry.with_client(f.client),
                2 => entry = entry.with_client(ClientId::new()),
                _ => {}
            }
            entry
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every entry lands in exactly one company, one department bucket and
    /// one client bucket, so each family of roll-ups sums to the grand total.
    #[test]
    fn prop_breakdowns_reconcile_with_grand_total(
        specs in prop::collection::vec(entry_strategy(), 0..40),
    ) {
        let f = Fixture::new();
        let entries = build_entries(&f, &specs);
        let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

        let dashboard = DimensionalAggregator::default().dashboard(&snapshot);
        let total = gross(&dashboard.grand_total);

        let companies: Decimal = dashboard.companies.iter().map(|c| gross(&c.metrics)).sum();
        let departments: Decimal = dashboard.departments.iter().map(|d| gross(&d.metrics)).sum();
        let clients: Decimal = dashboard.clients.iter().map(|c| gross(&c.metrics)).sum();

        prop_assert_eq!(companies, total);
        prop_assert_eq!(departments, total);
        prop_assert_eq!(clients, total);
    }

    /// A company's cost center rows never exceed the company's own entries.
    #[test]
    fn prop_cost_centers_nest_inside_company(
        specs in prop::collection::vec(entry_strategy(), 0..40),
    ) {
        let f = Fixture::new();
        let entries = build_entries(&f, &specs);
        let snapshot = Snapshot::new(&f.accounts, &entries, &f.units);

        let companies = DimensionalAggregator::default().company_summaries(&snapshot);

        let alpha = &companies[0];
        prop_assert!(alpha.cost_centers.iter().all(|cc| cc.cost_center_id != f.cost_center_b));

        let beta = &companies[1];
        let field_sales: Decimal = entries
            .iter()
            .filter(|e| e.cost_center_id == Some(f.cost_center_b))
            .map(|e| e.amount)
            .sum();
        let nested: Decimal = beta.cost_centers.iter().map(|cc| gross(&cc.metrics)).sum();
        prop_assert_eq!(nested, field_sales);
    }
}
