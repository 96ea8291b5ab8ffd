//! Statement computation service.

use budgetry_shared::EngineConfig;
use tracing::debug;

use super::types::{Statement, StatementLine};
use crate::chart::{Account, ChartTree};
use crate::ledger::{InputAggregator, LedgerEntry};
use crate::resolution::{ResolutionEngine, ResolutionPlan};

/// A chart built and planned once, reusable across scopes.
///
/// Every computation clones the zeroed tree, so scopes never share values.
#[derive(Debug, Clone)]
pub struct PreparedChart {
    tree: ChartTree,
    plan: ResolutionPlan,
}

impl PreparedChart {
    /// Builds the account tree and compiles resolution strategies.
    #[must_use]
    pub fn new(accounts: &[Account]) -> Self {
        let tree = ChartTree::build(accounts);
        let plan = ResolutionPlan::compile(&tree);
        Self { tree, plan }
    }

    /// The zeroed account tree.
    #[must_use]
    pub const fn tree(&self) -> &ChartTree {
        &self.tree
    }
}

/// Turns a chart and a set of ledger entries into a resolved statement.
#[derive(Debug, Clone, Default)]
pub struct StatementService {
    engine: ResolutionEngine,
}

impl StatementService {
    /// Creates a service from engine configuration.
    #[must_use]
    pub const fn new(config: &EngineConfig) -> Self {
        Self {
            engine: ResolutionEngine::new(config),
        }
    }

    /// Computes a statement over exactly the given entries.
    pub fn compute<'a, I>(&self, chart: &PreparedChart, entries: I) -> Statement
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut tree = chart.tree.clone();
        let aggregation = InputAggregator::apply(&mut tree, entries);
        let outcome = self.engine.resolve(&mut tree, &chart.plan);

        let lines = tree
            .depth_first()
            .into_iter()
            .map(|index| tree.row(index))
            .map(|row| StatementLine {
                account_id: row.account.id,
                code: row.account.code.clone(),
                name: row.account.name.clone(),
                kind: row.account.kind,
                level: row.level,
                values: row.values,
                total: row.values.total(),
            })
            .collect();

        debug!(
            rows = tree.len(),
            entries = aggregation.applied,
            passes = outcome.passes,
            "Computed statement"
        );

        Statement {
            rows: tree.to_forest(),
            lines,
            outcome,
            aggregation,
        }
    }

    /// Builds the chart and computes one statement in a single call.
    #[must_use]
    pub fn statement(&self, accounts: &[Account], entries: &[LedgerEntry]) -> Statement {
        self.compute(&PreparedChart::new(accounts), entries)
    }
}
