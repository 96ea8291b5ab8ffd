//! Formula tokenizer.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::FormulaError;

/// A formula token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Numeric literal.
    Number(Decimal),
    /// `@code` reference, without the `@`.
    Reference(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl Token {
    /// Short description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(value) => format!("number {value}"),
            Self::Reference(code) => format!("reference @{code}"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::LeftParen => "'('".to_string(),
            Self::RightParen => "')'".to_string(),
        }
    }
}

/// A token with its byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte offset of its first character.
    pub position: usize,
}

/// Characters allowed in a reference code: ASCII word characters and dots.
fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Splits a formula into tokens.
///
/// # Errors
///
/// Returns an error for characters outside the arithmetic grammar, a bare
/// `@`, or a literal that does not fit a decimal.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '@' => {
                chars.next();
                let start = position + 1;
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if !is_code_char(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                if end == start {
                    return Err(FormulaError::EmptyReference(position));
                }
                tokens.push(Spanned {
                    token: Token::Reference(source[start..end].to_string()),
                    position,
                });
                continue;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = position;
                let mut seen_dot = false;
                while let Some(&(i, c)) = chars.peek() {
                    if c == '.' && !seen_dot {
                        seen_dot = true;
                    } else if !c.is_ascii_digit() {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                let token = parse_number(&source[position..end])?;
                tokens.push(Spanned { token, position });
                continue;
            }
            other => {
                return Err(FormulaError::UnexpectedCharacter {
                    character: other,
                    position,
                });
            }
        };
        chars.next();
        tokens.push(Spanned { token, position });
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<Token, FormulaError> {
    let trimmed = literal.strip_suffix('.').unwrap_or(literal);
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return Err(FormulaError::InvalidNumber(literal.to_string()));
    }
    let normalized = if trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    };
    Decimal::from_str(&normalized)
        .map(Token::Number)
        .map_err(|_| FormulaError::InvalidNumber(literal.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_tokenizes_references_and_operators() {
        assert_eq!(
            kinds("(@1 - @2.1) * 0.5"),
            vec![
                Token::LeftParen,
                Token::Reference("1".to_string()),
                Token::Minus,
                Token::Reference("2.1".to_string()),
                Token::RightParen,
                Token::Star,
                Token::Number(dec!(0.5)),
            ]
        );
    }

    #[test]
    fn test_reference_accepts_word_characters() {
        assert_eq!(
            kinds("@REV_total.2"),
            vec![Token::Reference("REV_total.2".to_string())]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(kinds(".5"), vec![Token::Number(dec!(0.5))]);
        assert_eq!(kinds("12."), vec![Token::Number(dec!(12))]);
        assert_eq!(kinds("100"), vec![Token::Number(dec!(100))]);
    }

    #[test]
    fn test_rejects_foreign_characters() {
        assert_eq!(
            tokenize("@1 ^ 2"),
            Err(FormulaError::UnexpectedCharacter {
                character: '^',
                position: 3
            })
        );
        assert!(tokenize("alert(1)").is_err());
    }

    #[test]
    fn test_rejects_bare_at() {
        assert_eq!(tokenize("1 + @"), Err(FormulaError::EmptyReference(4)));
    }

    #[test]
    fn test_rejects_lonely_dot() {
        assert!(matches!(tokenize("."), Err(FormulaError::InvalidNumber(_))));
    }
}
