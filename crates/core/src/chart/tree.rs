//! Account tree construction.
//!
//! Rows live in a flat arena sorted by code; parent/child links are indices
//! into it. The arena order is the "row list" every later stage iterates.

use std::collections::HashMap;

use budgetry_shared::types::{AccountId, MonthlyValues};
use tracing::debug;

use super::code::{code_level, compare_codes};
use super::types::{Account, AccountKind, ResolvedRow};

/// One row of the arena.
#[derive(Debug, Clone)]
pub struct ChartRow {
    /// Source account.
    pub account: Account,
    /// Display depth derived from the code.
    pub level: usize,
    /// Current monthly values.
    pub values: MonthlyValues,
    /// Child indices, ordered by code.
    pub children: Vec<usize>,
}

/// Arena-backed account forest for one computation.
#[derive(Debug, Clone, Default)]
pub struct ChartTree {
    rows: Vec<ChartRow>,
    roots: Vec<usize>,
    by_id: HashMap<AccountId, usize>,
    by_code: HashMap<String, usize>,
}

impl ChartTree {
    /// Builds the tree from a flat list of accounts.
    ///
    /// Accounts whose parent is unknown (or themselves) become roots. Rows
    /// that only hang off a parent cycle are promoted to roots too, so every
    /// row ends up in the forest exactly once. All values start at zero.
    #[must_use]
    pub fn build(accounts: &[Account]) -> Self {
        let mut sorted: Vec<&Account> = accounts.iter().collect();
        sorted.sort_by(|a, b| compare_codes(&a.code, &b.code));

        let mut rows: Vec<ChartRow> = sorted
            .into_iter()
            .map(|account| ChartRow {
                level: code_level(&account.code),
                account: account.clone(),
                values: MonthlyValues::zero(),
                children: Vec::new(),
            })
            .collect();

        let mut by_id = HashMap::with_capacity(rows.len());
        let mut by_code = HashMap::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            by_id.entry(row.account.id).or_insert(index);
            by_code.entry(row.account.code.clone()).or_insert(index);
        }

        let mut parents: Vec<Option<usize>> = vec![None; rows.len()];
        let mut roots = Vec::new();
        for index in 0..rows.len() {
            let parent = rows[index]
                .account
                .parent_id
                .and_then(|id| by_id.get(&id).copied())
                .filter(|&parent| parent != index);
            match parent {
                Some(parent) => {
                    rows[parent].children.push(index);
                    parents[index] = Some(parent);
                }
                None => roots.push(index),
            }
        }

        let promoted = break_cycles(&mut rows, &mut roots, &parents);
        if promoted > 0 {
            debug!(promoted, "Promoted rows on a parent cycle to roots");
        }

        Self {
            rows,
            roots,
            by_id,
            by_code,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the chart has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in code order.
    #[must_use]
    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    /// Root indices in code order.
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Row at an index.
    #[must_use]
    pub fn row(&self, index: usize) -> &ChartRow {
        &self.rows[index]
    }

    /// Index of an account by ID.
    #[must_use]
    pub fn index_of(&self, id: AccountId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Index of the first row (in code order) carrying a code.
    #[must_use]
    pub fn index_of_code(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    /// Kind of the row at an index.
    #[must_use]
    pub fn kind(&self, index: usize) -> AccountKind {
        self.rows[index].account.kind
    }

    /// Current values of the row at an index.
    #[must_use]
    pub fn values(&self, index: usize) -> &MonthlyValues {
        &self.rows[index].values
    }

    /// Mutable values of the row at an index.
    pub fn values_mut(&mut self, index: usize) -> &mut MonthlyValues {
        &mut self.rows[index].values
    }

    /// Current values of the row carrying a code.
    #[must_use]
    pub fn values_of_code(&self, code: &str) -> Option<&MonthlyValues> {
        self.index_of_code(code).map(|index| self.values(index))
    }

    /// Row indices in depth-first pre-order, following the forest.
    #[must_use]
    pub fn depth_first(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.rows.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.rows[index].children.iter().rev());
        }
        order
    }

    /// Materializes the nested forest of resolved rows.
    #[must_use]
    pub fn to_forest(&self) -> Vec<ResolvedRow> {
        self.roots.iter().map(|&root| self.materialize(root)).collect()
    }

    fn materialize(&self, index: usize) -> ResolvedRow {
        let row = &self.rows[index];
        ResolvedRow {
            account_id: row.account.id,
            code: row.account.code.clone(),
            name: row.account.name.clone(),
            kind: row.account.kind,
            level: row.level,
            values: row.values,
            children: row
                .children
                .iter()
                .map(|&child| self.materialize(child))
                .collect(),
        }
    }
}

/// Detaches rows unreachable from any root and makes them roots.
///
/// Returns the number of promoted rows.
fn break_cycles(rows: &mut [ChartRow], roots: &mut Vec<usize>, parents: &[Option<usize>]) -> usize {
    let mut reachable = vec![false; rows.len()];
    let mut stack: Vec<usize> = roots.clone();
    mark_reachable(rows, &mut reachable, &mut stack);

    let mut promoted = 0;
    for index in 0..rows.len() {
        if reachable[index] {
            continue;
        }
        if let Some(parent) = parents[index] {
            rows[parent].children.retain(|&child| child != index);
        }
        roots.push(index);
        promoted += 1;
        stack.push(index);
        mark_reachable(rows, &mut reachable, &mut stack);
    }

    if promoted > 0 {
        roots.sort_unstable();
    }
    promoted
}

fn mark_reachable(rows: &[ChartRow], reachable: &mut [bool], stack: &mut Vec<usize>) {
    while let Some(index) = stack.pop() {
        if reachable[index] {
            continue;
        }
        reachable[index] = true;
        stack.extend(rows[index].children.iter().copied());
    }
}
