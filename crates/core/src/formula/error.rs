//! Formula error types.

use thiserror::Error;

/// Errors raised while lexing, parsing, or evaluating a formula.
///
/// The resolution engine never surfaces these: any error turns the affected
/// cell into zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// A character outside the arithmetic grammar.
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// Offending character.
        character: char,
        /// Byte offset in the formula.
        position: usize,
    },

    /// `@` not followed by a code.
    #[error("Empty account reference at position {0}")]
    EmptyReference(usize),

    /// A numeric literal that does not fit a decimal.
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),

    /// A token in a place the grammar does not allow.
    #[error("Unexpected token {found} at position {position}")]
    UnexpectedToken {
        /// Description of the token.
        found: String,
        /// Byte offset in the formula.
        position: usize,
    },

    /// The formula ended where an operand or `)` was required.
    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    /// Parentheses or unary signs nested beyond the parser limit.
    #[error("Formula nested deeper than {0} levels")]
    TooDeep(usize),

    /// More tokens than the parser accepts.
    #[error("Formula longer than {0} tokens")]
    TooLong(usize),

    /// Division by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Result out of decimal range.
    #[error("Arithmetic overflow")]
    Overflow,
}
