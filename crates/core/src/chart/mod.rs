//! Chart of accounts: account records, code ordering, and the account tree.

pub mod code;
pub mod diagnostics;
pub mod tree;
pub mod types;

pub use code::{code_level, compare_codes};
pub use diagnostics::{ChartDiagnostics, ChartIssue};
pub use tree::{ChartRow, ChartTree};
pub use types::{Account, AccountKind, ResolvedRow};
