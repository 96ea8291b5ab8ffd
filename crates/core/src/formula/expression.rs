//! Arithmetic expression parsing and evaluation.
//!
//! Grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '@' CODE | '(' expr ')'
//! ```
//!
//! Nothing else is accepted. Account references are resolved at evaluation
//! time through a lookup closure, so a parsed formula can be evaluated for
//! every month and every pass without re-parsing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FormulaError;
use super::lexer::{Spanned, Token, tokenize};

/// Maximum nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 128;

/// Maximum number of tokens in one formula.
pub const MAX_TOKENS: usize = 4096;

/// Binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division.
    Div,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Numeric literal.
    Number(Decimal),
    /// Reference to another account's value by code.
    Reference(String),
    /// Unary minus.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Evaluates the expression.
    ///
    /// `lookup` returns the current value of a code for the month being
    /// evaluated; unknown codes (`None`) count as zero.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` or `Overflow`.
    pub fn evaluate<F>(&self, lookup: &F) -> Result<Decimal, FormulaError>
    where
        F: Fn(&str) -> Option<Decimal>,
    {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Reference(code) => Ok(lookup(code).unwrap_or(Decimal::ZERO)),
            Self::Neg(inner) => Ok(-inner.evaluate(lookup)?),
            Self::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(lookup)?;
                let rhs = rhs.evaluate(lookup)?;
                match op {
                    BinaryOp::Add => lhs.checked_add(rhs).ok_or(FormulaError::Overflow),
                    BinaryOp::Sub => lhs.checked_sub(rhs).ok_or(FormulaError::Overflow),
                    BinaryOp::Mul => lhs.checked_mul(rhs).ok_or(FormulaError::Overflow),
                    BinaryOp::Div => {
                        if rhs.is_zero() {
                            Err(FormulaError::DivisionByZero)
                        } else {
                            lhs.checked_div(rhs).ok_or(FormulaError::Overflow)
                        }
                    }
                }
            }
        }
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Number(_) => {}
            Self::Reference(code) => out.push(code),
            Self::Neg(inner) => inner.collect_references(out),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_references(out);
                rhs.collect_references(out);
            }
        }
    }
}

/// A parsed formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parses a formula string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a well-formed arithmetic
    /// expression over numbers and `@code` references.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let tokens = tokenize(source)?;
        if tokens.len() > MAX_TOKENS {
            return Err(FormulaError::TooLong(MAX_TOKENS));
        }
        let mut parser = Parser {
            tokens: &tokens,
            cursor: 0,
            depth: 0,
        };
        let expr = parser.expr()?;
        if let Some(extra) = parser.peek() {
            return Err(FormulaError::UnexpectedToken {
                found: extra.token.describe(),
                position: extra.position,
            });
        }
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// The original formula text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed expression.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Codes referenced by the formula, in order of appearance.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.expr.collect_references(&mut out);
        out
    }

    /// Evaluates the formula against a code lookup.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` or `Overflow`.
    pub fn evaluate<F>(&self, lookup: F) -> Result<Decimal, FormulaError>
    where
        F: Fn(&str) -> Option<Decimal>,
    {
        self.expr.evaluate(&lookup)
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    cursor: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&Spanned> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.cursor += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        match self.peek().map(|s| &s.token) {
            Some(Token::Minus) => {
                self.cursor += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.cursor += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let Some(spanned) = self.advance().cloned() else {
            return Err(FormulaError::UnexpectedEnd);
        };
        match spanned.token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Reference(code) => Ok(Expr::Reference(code)),
            Token::LeftParen => {
                self.descend()?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RightParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(FormulaError::UnexpectedToken {
                        found: other.token.describe(),
                        position: other.position,
                    }),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            other => Err(FormulaError::UnexpectedToken {
                found: other.describe(),
                position: spanned.position,
            }),
        }
    }
}
