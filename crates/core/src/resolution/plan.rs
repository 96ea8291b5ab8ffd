//! Per-row resolution strategies, compiled once per chart.

use rust_decimal::Decimal;

use crate::chart::{AccountKind, ChartTree};
use crate::formula::{Formula, FormulaError};

/// How one row gets its values.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// INPUT row: values come from ledger entries and are never touched.
    Fixed,
    /// Evaluate a formula per month. A formula that failed to parse
    /// resolves to zero in every month.
    Formula(Result<Formula, FormulaError>),
    /// `base * percentage / 100` per month. A missing base counts as zero.
    Percentage {
        /// Row index of the base account.
        base: Option<usize>,
        /// Percent of the base.
        percentage: Decimal,
    },
    /// Sum of direct children per month.
    SumOfChildren,
}

/// Strategies for every row of a chart, in row order.
#[derive(Debug, Clone)]
pub struct ResolutionPlan {
    strategies: Vec<Strategy>,
}

impl ResolutionPlan {
    /// Chooses each row's strategy: formula, then percentage of base, then
    /// sum of children.
    #[must_use]
    pub fn compile(tree: &ChartTree) -> Self {
        let strategies = tree
            .rows()
            .iter()
            .map(|row| {
                let account = &row.account;
                if account.kind == AccountKind::Input {
                    return Strategy::Fixed;
                }
                if let Some(formula) = account.active_formula() {
                    return Strategy::Formula(Formula::parse(formula));
                }
                if let Some((base_code, percentage)) = account.percentage_rule() {
                    return Strategy::Percentage {
                        base: tree.index_of_code(base_code),
                        percentage,
                    };
                }
                Strategy::SumOfChildren
            })
            .collect();

        Self { strategies }
    }

    /// Strategy of the row at an index.
    #[must_use]
    pub fn strategy(&self, index: usize) -> &Strategy {
        &self.strategies[index]
    }

    /// Number of rows covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if the plan covers no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Number of rows the engine recomputes on each pass.
    #[must_use]
    pub fn derived_rows(&self) -> usize {
        self.strategies
            .iter()
            .filter(|s| !matches!(s, Strategy::Fixed))
            .count()
    }
}
