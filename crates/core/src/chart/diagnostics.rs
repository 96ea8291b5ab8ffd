//! Read-only lint over a chart of accounts.
//!
//! The engine tolerates every problem reported here with a default (root
//! promotion, zero substitution). Diagnostics only name them so the people
//! curating the chart can fix them; they never change computed values.

use std::collections::{HashMap, HashSet};

use budgetry_shared::types::AccountId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::{Account, AccountKind};
use crate::formula::Formula;

/// One problem found in a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ChartIssue {
    /// Two or more accounts share a code; lookups use the first in code order.
    DuplicateCode {
        /// The shared code.
        code: String,
    },
    /// Parent reference to an account that does not exist.
    OrphanedParent {
        /// Account code.
        code: String,
        /// Missing parent.
        parent_id: AccountId,
    },
    /// Account on a parent cycle, or below one with no way up to a root.
    /// Tree building cuts each such group loose at its lowest code.
    ParentCycle {
        /// Account code.
        code: String,
    },
    /// INPUT account with a formula or percentage rule, which is ignored.
    InputWithRule {
        /// Account code.
        code: String,
    },
    /// DERIVED account with both a formula and a percentage rule; the
    /// formula wins.
    FormulaAndPercentage {
        /// Account code.
        code: String,
    },
    /// Only one of base code and percentage is set; the account sums its
    /// children instead.
    IncompletePercentage {
        /// Account code.
        code: String,
    },
    /// Percentage rule pointing at an unknown code.
    UnknownBase {
        /// Account code.
        code: String,
        /// Missing base code.
        base_code: String,
    },
    /// Formula referencing an unknown code.
    UnknownReference {
        /// Account code.
        code: String,
        /// Missing referenced code.
        reference: String,
    },
    /// Formula that does not parse; every month resolves to zero.
    InvalidFormula {
        /// Account code.
        code: String,
        /// Parser message.
        error: String,
    },
}

/// Chart linting.
pub struct ChartDiagnostics;

impl ChartDiagnostics {
    /// Lists every issue in a chart, grouped by kind of check.
    #[must_use]
    pub fn inspect(accounts: &[Account]) -> Vec<ChartIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for account in accounts {
            if !seen.insert(account.code.as_str()) && reported.insert(account.code.as_str()) {
                issues.push(ChartIssue::DuplicateCode {
                    code: account.code.clone(),
                });
            }
        }

        let by_id: HashMap<AccountId, &Account> = accounts.iter().map(|a| (a.id, a)).collect();
        for account in accounts {
            let Some(parent_id) = account.parent_id else {
                continue;
            };
            if !by_id.contains_key(&parent_id) {
                issues.push(ChartIssue::OrphanedParent {
                    code: account.code.clone(),
                    parent_id,
                });
            } else if hangs_off_cycle(account, &by_id) {
                issues.push(ChartIssue::ParentCycle {
                    code: account.code.clone(),
                });
            }
        }

        for account in accounts {
            Self::inspect_rule(account, &seen, &mut issues);
        }

        issues
    }

    /// Runs [`ChartDiagnostics::inspect`] and logs every issue.
    pub fn log(accounts: &[Account]) -> Vec<ChartIssue> {
        let issues = Self::inspect(accounts);
        for issue in &issues {
            warn!(?issue, "Chart of accounts issue");
        }
        issues
    }

    fn inspect_rule(account: &Account, codes: &HashSet<&str>, issues: &mut Vec<ChartIssue>) {
        let code = || account.code.clone();
        let has_formula = account.active_formula().is_some();
        let has_base = account.base_code.as_deref().is_some_and(|b| !b.is_empty());
        let has_percentage = account.percentage.is_some();

        if account.kind == AccountKind::Input {
            if has_formula || has_base || has_percentage {
                issues.push(ChartIssue::InputWithRule { code: code() });
            }
            return;
        }

        if has_formula && (has_base || has_percentage) {
            issues.push(ChartIssue::FormulaAndPercentage { code: code() });
        }

        if let Some(formula) = account.active_formula() {
            match Formula::parse(formula) {
                Ok(parsed) => {
                    let mut missing = HashSet::new();
                    for reference in parsed.references() {
                        if !codes.contains(reference) && missing.insert(reference) {
                            issues.push(ChartIssue::UnknownReference {
                                code: code(),
                                reference: reference.to_string(),
                            });
                        }
                    }
                }
                Err(err) => issues.push(ChartIssue::InvalidFormula {
                    code: code(),
                    error: err.to_string(),
                }),
            }
            return;
        }

        match account.percentage_rule() {
            Some((base_code, _)) if !codes.contains(base_code) => {
                issues.push(ChartIssue::UnknownBase {
                    code: code(),
                    base_code: base_code.to_string(),
                });
            }
            Some(_) => {}
            None if has_base || has_percentage => {
                issues.push(ChartIssue::IncompletePercentage { code: code() });
            }
            None => {}
        }
    }
}

/// Follows parent links from `account`; true if they never reach a root.
///
/// Roots are accounts without a parent, with an unknown parent, or parented
/// to themselves. A self-parented account counts as a cycle only for itself.
fn hangs_off_cycle(account: &Account, by_id: &HashMap<AccountId, &Account>) -> bool {
    let mut visited = HashSet::from([account.id]);
    let mut current = account;
    loop {
        let Some(parent_id) = current.parent_id else {
            return false;
        };
        if parent_id == current.id {
            return current.id == account.id;
        }
        let Some(parent) = by_id.get(&parent_id) else {
            return false;
        };
        if !visited.insert(parent_id) {
            return true;
        }
        current = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_clean_chart_has_no_issues() {
        let revenue = Account::derived("1", "Revenue");
        let sales = Account::input("1.1", "Sales").with_parent(revenue.id);
        let tax = Account::derived("2", "Tax").with_percentage_of("1", dec!(10));
        let net = Account::derived("3", "Net").with_formula("@1 - @2");
        assert!(ChartDiagnostics::inspect(&[revenue, sales, tax, net]).is_empty());
    }

    #[test]
    fn test_reports_structural_problems() {
        let mut a = Account::derived("1", "A");
        let mut b = Account::derived("2", "B");
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let orphan_parent = AccountId::new();
        let orphan = Account::input("3", "Orphan").with_parent(orphan_parent);
        let dup = Account::input("3", "Dup");

        let issues = ChartDiagnostics::inspect(&[a, b, orphan, dup]);

        assert!(issues.contains(&ChartIssue::DuplicateCode {
            code: "3".to_string()
        }));
        assert!(issues.contains(&ChartIssue::OrphanedParent {
            code: "3".to_string(),
            parent_id: orphan_parent,
        }));
        assert!(issues.contains(&ChartIssue::ParentCycle {
            code: "1".to_string()
        }));
        assert!(issues.contains(&ChartIssue::ParentCycle {
            code: "2".to_string()
        }));
    }

    #[test]
    fn test_reports_accounts_below_a_cycle() {
        let mut a = Account::derived("1", "A");
        let mut b = Account::derived("2", "B");
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let below = Account::input("2.1", "Below").with_parent(b.id);
        let deeper = Account::input("2.1.1", "Deeper").with_parent(below.id);
        let mut own = Account::derived("3", "Own parent");
        own.parent_id = Some(own.id);
        let under_own = Account::input("3.1", "Under own").with_parent(own.id);

        let issues = ChartDiagnostics::inspect(&[a, b, below, deeper, own, under_own]);

        let cycles: Vec<&str> = issues
            .iter()
            .filter_map(|issue| match issue {
                ChartIssue::ParentCycle { code } => Some(code.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(cycles, vec!["1", "2", "2.1", "2.1.1", "3"]);
    }

    #[test]
    fn test_empty_base_code_is_incomplete() {
        let blank = Account::derived("1", "Blank").with_percentage_of("", dec!(10));
        let mut unset = Account::derived("2", "Unset");
        unset.base_code = Some(String::new());

        let issues = ChartDiagnostics::inspect(&[blank, unset]);

        assert_eq!(
            issues,
            vec![ChartIssue::IncompletePercentage {
                code: "1".to_string()
            }]
        );
    }

    #[test]
    fn test_reports_rule_problems() {
        let input = Account::input("1", "Input").with_formula("@2");
        let both = Account::derived("2", "Both")
            .with_formula("@1 + @9")
            .with_percentage_of("1", dec!(5));
        let mut half = Account::derived("3", "Half");
        half.percentage = Some(dec!(20));
        let lost = Account::derived("4", "Lost").with_percentage_of("77", dec!(20));
        let broken = Account::derived("5", "Broken").with_formula("@1 +");

        let issues = ChartDiagnostics::inspect(&[input, both, half, lost, broken]);

        assert_eq!(
            issues,
            vec![
                ChartIssue::InputWithRule {
                    code: "1".to_string()
                },
                ChartIssue::FormulaAndPercentage {
                    code: "2".to_string()
                },
                ChartIssue::UnknownReference {
                    code: "2".to_string(),
                    reference: "9".to_string()
                },
                ChartIssue::IncompletePercentage {
                    code: "3".to_string()
                },
                ChartIssue::UnknownBase {
                    code: "4".to_string(),
                    base_code: "77".to_string()
                },
                ChartIssue::InvalidFormula {
                    code: "5".to_string(),
                    error: "Unexpected end of formula".to_string()
                },
            ]
        );
    }
}
