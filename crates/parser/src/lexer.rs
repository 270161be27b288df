use std::fmt;

use logos::Logos;
use thiserror::Error;

/// Lexing failures surfaced as diagnostics on the line.
#[derive(Debug, Error, Default, Clone, Copy, PartialEq, Eq)]
pub enum LexingError {
    #[error("number literal does not fit in 64 bits")]
    NumberTooLarge,
    #[default]
    #[error("unrecognized token")]
    UnrecognizedToken,
}

/// One token of a calculator line. The end of the line is represented by
/// the end of the token stream; the driver feeds the lexer one line at a
/// time.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[\t\n\r ]+")] // Skip whitespace, including carriage return
#[logos(error = LexingError)]
pub enum TokenType {
    // Literals
    #[regex(r"[0-9]+", |lex| {
        lex.slice().parse::<u64>().map_err(|_| LexingError::NumberTooLarge)
    })]
    Number(u64),
    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Mul,
    #[token("/")]
    Div,
    #[token("^")]
    Pow,
    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Pow => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lexer() {
        let input = "3 + 4 * -(25) / 2 ^ (1/3)";
        let lexer = TokenType::lexer(input);

        let mut tokens = vec![];
        let mut errors = vec![];
        for (token, span) in lexer.spanned() {
            match token {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    errors.push((span, e));
                }
            }
        }

        if !errors.is_empty() {
            panic!("lexer errors: {errors:?}");
        }

        let expected = vec![
            TokenType::Number(3),
            TokenType::Plus,
            TokenType::Number(4),
            TokenType::Mul,
            TokenType::Minus,
            TokenType::LParen,
            TokenType::Number(25),
            TokenType::RParen,
            TokenType::Div,
            TokenType::Number(2),
            TokenType::Pow,
            TokenType::LParen,
            TokenType::Number(1),
            TokenType::Div,
            TokenType::Number(3),
            TokenType::RParen,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_should_err_on_number_too_large() {
        // One digit past u64::MAX.
        let input = "1 + 184467440737095516160";
        let tokens = TokenType::lexer(input).spanned().collect::<Vec<_>>();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0, Ok(TokenType::Number(1)));
        assert_eq!(tokens[1].0, Ok(TokenType::Plus));
        assert_eq!(tokens[2].0, Err(LexingError::NumberTooLarge));
    }

    #[test]
    fn test_should_err_on_stray_character() {
        let tokens = TokenType::lexer("2 % 3").spanned().collect::<Vec<_>>();
        assert_eq!(tokens[1].0, Err(LexingError::UnrecognizedToken));
    }
}
