//! Chart of accounts data types.

use budgetry_shared::types::{AccountId, MonthlyValues};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an account gets its monthly values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    /// Values come straight from ledger entries.
    Input,
    /// Values are computed from other accounts.
    Derived,
}

/// One line of a tenant's chart of accounts.
///
/// A DERIVED account is resolved by the first rule that applies:
/// a non-empty `formula`, then a non-empty `base_code` with a `percentage`,
/// then the sum of its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Dot-delimited hierarchical code, unique per tenant.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Input or derived.
    pub kind: AccountKind,
    /// Arithmetic expression over `@code` references.
    #[serde(default)]
    pub formula: Option<String>,
    /// Code of the account a percentage rule applies to.
    #[serde(default)]
    pub base_code: Option<String>,
    /// Percent of the base account's value.
    #[serde(default)]
    pub percentage: Option<Decimal>,
    /// Parent account, if any.
    #[serde(default)]
    pub parent_id: Option<AccountId>,
}

impl Account {
    /// Creates an INPUT account with no parent.
    #[must_use]
    pub fn input(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(code, name, AccountKind::Input)
    }

    /// Creates a DERIVED account that sums its children.
    #[must_use]
    pub fn derived(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(code, name, AccountKind::Derived)
    }

    fn new(code: impl Into<String>, name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            name: name.into(),
            kind,
            formula: None,
            base_code: None,
            percentage: None,
            parent_id: None,
        }
    }

    /// Sets the parent account.
    #[must_use]
    pub fn with_parent(mut self, parent: AccountId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Sets the formula.
    #[must_use]
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Sets a percentage-of-base rule.
    #[must_use]
    pub fn with_percentage_of(mut self, base_code: impl Into<String>, percentage: Decimal) -> Self {
        self.base_code = Some(base_code.into());
        self.percentage = Some(percentage);
        self
    }

    /// The formula, if one is set and non-empty.
    #[must_use]
    pub fn active_formula(&self) -> Option<&str> {
        self.formula.as_deref().filter(|f| !f.is_empty())
    }

    /// The percentage rule, if both halves are set and the base code is
    /// non-empty.
    #[must_use]
    pub fn percentage_rule(&self) -> Option<(&str, Decimal)> {
        match (
            self.base_code.as_deref().filter(|b| !b.is_empty()),
            self.percentage,
        ) {
            (Some(base), Some(percentage)) => Some((base, percentage)),
            _ => None,
        }
    }
}

/// An account with its twelve resolved monthly values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRow {
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
    /// Child rows, ordered by code.
    pub children: Vec<ResolvedRow>,
}

impl ResolvedRow {
    /// Year total of this row.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.values.total()
    }

    /// Finds a row by code in this subtree, depth first.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Self> {
        if self.code == code {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(code))
    }
}
