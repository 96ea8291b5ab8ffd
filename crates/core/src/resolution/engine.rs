//! Value resolution engine.
//!
//! DERIVED rows may reference other DERIVED rows in any order, so values are
//! found by repeated full passes over the row list. Each pass recomputes every
//! DERIVED row from the current values of all rows, including rows already
//! updated earlier in the same pass. The pass budget bounds the work for any
//! chart, cyclic or not.

use budgetry_shared::EngineConfig;
use budgetry_shared::types::{MONTHS_PER_YEAR, MonthlyValues};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::plan::{ResolutionPlan, Strategy};
use crate::chart::ChartTree;
use crate::formula::Formula;

/// What a resolution run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    /// Full passes executed.
    pub passes: usize,
    /// Whether the last pass left every value unchanged.
    pub stable: bool,
}

/// Computes the monthly values of every DERIVED row.
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    max_passes: usize,
    stop_when_stable: bool,
}

impl ResolutionEngine {
    /// Creates an engine from configuration.
    #[must_use]
    pub const fn new(config: &EngineConfig) -> Self {
        Self {
            max_passes: config.max_passes,
            stop_when_stable: config.stop_when_stable,
        }
    }

    /// Creates an engine that always runs exactly `passes` passes.
    #[must_use]
    pub const fn with_fixed_passes(passes: usize) -> Self {
        Self {
            max_passes: passes,
            stop_when_stable: false,
        }
    }

    /// Resolves all DERIVED rows of `tree` in place.
    ///
    /// INPUT rows are read but never written.
    pub fn resolve(&self, tree: &mut ChartTree, plan: &ResolutionPlan) -> ResolutionOutcome {
        debug_assert_eq!(tree.len(), plan.len());

        let mut passes = 0;
        let mut stable = plan.derived_rows() == 0;

        while passes < self.max_passes {
            passes += 1;
            let mut changed = false;

            for index in 0..tree.len() {
                let next = match plan.strategy(index) {
                    Strategy::Fixed => continue,
                    Strategy::Formula(Ok(formula)) => evaluate_formula(tree, index, formula),
                    Strategy::Formula(Err(err)) => {
                        trace!(code = %tree.row(index).account.code, error = %err, "Unparsable formula resolves to zero");
                        MonthlyValues::zero()
                    }
                    Strategy::Percentage { base, percentage } => {
                        percentage_of(tree, *base, *percentage)
                    }
                    Strategy::SumOfChildren => sum_of_children(tree, index),
                };

                if *tree.values(index) != next {
                    *tree.values_mut(index) = next;
                    changed = true;
                }
            }

            stable = !changed;
            if stable && self.stop_when_stable {
                break;
            }
        }

        if stable {
            debug!(passes, rows = tree.len(), "Resolved derived accounts");
        } else {
            warn!(
                passes,
                rows = tree.len(),
                "Derived account values still changing after the last pass"
            );
        }

        ResolutionOutcome { passes, stable }
    }
}

impl Default for ResolutionEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn evaluate_formula(tree: &ChartTree, index: usize, formula: &Formula) -> MonthlyValues {
    let mut values = MonthlyValues::zero();
    for month in 0..MONTHS_PER_YEAR {
        let lookup = |code: &str| tree.values_of_code(code).map(|v| v[month]);
        values[month] = match formula.evaluate(lookup) {
            Ok(value) => value,
            Err(err) => {
                trace!(
                    code = %tree.row(index).account.code,
                    month = month + 1,
                    error = %err,
                    "Formula failed, month resolves to zero"
                );
                Decimal::ZERO
            }
        };
    }
    values
}

fn percentage_of(tree: &ChartTree, base: Option<usize>, percentage: Decimal) -> MonthlyValues {
    let mut values = MonthlyValues::zero();
    let Some(base) = base else {
        return values;
    };
    let base_values = *tree.values(base);
    for month in 0..MONTHS_PER_YEAR {
        values[month] = base_values[month]
            .checked_mul(percentage)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);
    }
    values
}

fn sum_of_children(tree: &ChartTree, index: usize) -> MonthlyValues {
    let mut values = MonthlyValues::zero();
    let children = &tree.row(index).children;
    for month in 0..MONTHS_PER_YEAR {
        values[month] = children
            .iter()
            .try_fold(Decimal::ZERO, |acc, &child| {
                acc.checked_add(tree.values(child)[month])
            })
            .unwrap_or(Decimal::ZERO);
    }
    values
}
