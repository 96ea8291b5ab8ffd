//! Formula evaluation for derived accounts.
//!
//! Formulas are plain arithmetic (`+ - * /`, parentheses, decimal literals)
//! over `@code` references to other accounts. The grammar is closed: there is
//! no way to call functions or reach anything but arithmetic.

pub mod error;
pub mod expression;
pub mod lexer;

pub use error::FormulaError;
pub use expression::{BinaryOp, Expr, Formula};
