//! # Expression Parser
//!
//! Chumsky parser for one calculator line. The grammar has two mirrored
//! levels: base-field expressions (values mod P) and exponent-field
//! expressions (values mod P−1), the latter reachable only on the right
//! side of `^`. Precedence, lowest to highest binding: `+ -` (left) <
//! `* /` (left) < unary negation < `^` (non-associative).
//!
//! Two consequences of the precedence table are encoded structurally:
//!
//! - `^` is non-associative, so a pow rung takes at most one exponent;
//!   `a ^ b ^ c` fails to parse.
//! - Any binary operator following an exponent binds the whole `^` first
//!   (`2 ^ 3 + 1` is `(2^3) + 1`), so the operand of `^` is a single
//!   exponent-level unit; the full exponent grammar applies only inside
//!   parentheses.

use chumsky::input::Stream;
use chumsky::{input::ValueInput, prelude::*};
use logos::Logos;

use crate::ast::{BinOp, Expr, Spanned};
use crate::lexer::TokenType;

/// A syntax problem found while lexing or parsing a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub message: String,
    pub span: SimpleSpan<usize>,
}

/// Result of parsing one line: an expression, or the diagnostics that
/// prevented one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub expr: Option<Spanned<Expr>>,
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Lexes and parses a single input line.
///
/// Lexer errors short-circuit parsing; either way all diagnostics for the
/// line are collected and the rest of the line is discarded, so the caller
/// starts the next line from a clean slate.
pub fn parse_line(source: &str) -> ParsedLine {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    for (result, span) in TokenType::lexer(source).spanned() {
        match result {
            Ok(token) => tokens.push((token, SimpleSpan::from(span))),
            Err(error) => diagnostics.push(ParseDiagnostic {
                message: error.to_string(),
                span: span.into(),
            }),
        }
    }

    if !diagnostics.is_empty() {
        return ParsedLine {
            expr: None,
            diagnostics,
        };
    }

    tracing::debug!(tokens = tokens.len(), "parsing line");

    let token_stream =
        Stream::from_iter(tokens).map((0..source.len()).into(), |(t, s): (_, _)| (t, s));

    match expression_parser()
        .then_ignore(end())
        .parse(token_stream)
        .into_result()
    {
        Ok(expr) => ParsedLine {
            expr: Some(expr),
            diagnostics,
        },
        Err(errors) => {
            for error in errors {
                diagnostics.push(ParseDiagnostic {
                    message: error.to_string(),
                    span: error.span().into_range().into(),
                });
            }
            ParsedLine {
                expr: None,
                diagnostics,
            }
        }
    }
}

/// Creates a parser for a literal with its sign chain
/// (`number := NUM | SUB number`). The sign folds into the literal; no
/// negation node is built for this form.
fn literal_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, TokenType>>> + Clone
where
    I: ValueInput<'tokens, Token = TokenType, Span = SimpleSpan>,
{
    just(TokenType::Minus)
        .repeated()
        .collect::<Vec<_>>()
        .then(select! { TokenType::Number(n) => n })
        .map_with(|(signs, n), extra| {
            let magnitude = n as i128;
            let value = if signs.len() % 2 == 0 {
                magnitude
            } else {
                -magnitude
            };
            Spanned::new(Expr::Literal(value), extra.span())
        })
}

/// Folds one binary operator application into a spanned AST node.
fn fold_binary(lhs: Spanned<Expr>, (op, rhs): (BinOp, Spanned<Expr>)) -> Spanned<Expr> {
    let span = SimpleSpan::from(lhs.span().start..rhs.span().end);
    Spanned::new(
        Expr::BinaryOp {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
        },
        span,
    )
}

/// Stacks the two left-associative precedence levels (`* /` then `+ -`)
/// on top of a primary parser. Shared by both grammar levels.
fn sum_ladder<'tokens, I, P>(
    term: P,
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, TokenType>>> + Clone
where
    I: ValueInput<'tokens, Token = TokenType, Span = SimpleSpan>,
    P: Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, TokenType>>> + Clone,
{
    // Helper to create binary operator parsers
    let op = |token, op: BinOp| just(token).to(op);

    // Multiplicative operators: *, / (left-associative)
    let product = term.clone().foldl(
        choice((
            op(TokenType::Mul, BinOp::Mul),
            op(TokenType::Div, BinOp::Div),
        ))
        .then(term)
        .repeated(),
        fold_binary,
    );

    // Additive operators: +, - (left-associative, lowest precedence)
    product.clone().foldl(
        choice((
            op(TokenType::Plus, BinOp::Add),
            op(TokenType::Minus, BinOp::Sub),
        ))
        .then(product)
        .repeated(),
        fold_binary,
    )
}

/// Creates the base-field expression parser (the whole-line grammar).
fn expression_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, TokenType>>> + Clone
where
    I: ValueInput<'tokens, Token = TokenType, Span = SimpleSpan>,
{
    let exponent_unit = exponent_operand_parser();

    recursive(|expr| {
        // Parenthesized expression: pass-through, no AST node of its own
        let paren = expr
            .clone()
            .delimited_by(just(TokenType::LParen), just(TokenType::RParen))
            .map_with(|inner: Spanned<Expr>, extra| {
                Spanned::new(inner.into_parts().0, extra.span())
            });

        // Unary negation of a parenthesized expression: - ( expr )
        let negated_paren = just(TokenType::Minus)
            .ignore_then(expr.delimited_by(just(TokenType::LParen), just(TokenType::RParen)))
            .map_with(|inner, extra| Spanned::new(Expr::Negate(Box::new(inner)), extra.span()));

        let primary = choice((literal_parser(), negated_paren, paren));

        // Exponentiation: at most one `^`, with an exponent-field operand
        let pow = primary
            .then(
                just(TokenType::Pow)
                    .ignore_then(exponent_unit)
                    .or_not(),
            )
            .map_with(|(base, exponent), extra| match exponent {
                Some(exponent) => Spanned::new(
                    Expr::Pow {
                        base: Box::new(base),
                        exponent: Box::new(exponent),
                    },
                    extra.span(),
                ),
                None => base,
            });

        sum_ladder(pow)
    })
}

/// Creates the full exponent-field expression parser. Mirrors the base
/// grammar without a pow production; only reachable inside parentheses.
fn exponent_expression_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, TokenType>>> + Clone
where
    I: ValueInput<'tokens, Token = TokenType, Span = SimpleSpan>,
{
    recursive(|expr| {
        let paren = expr
            .clone()
            .delimited_by(just(TokenType::LParen), just(TokenType::RParen))
            .map_with(|inner: Spanned<Expr>, extra| {
                Spanned::new(inner.into_parts().0, extra.span())
            });

        let negated_paren = just(TokenType::Minus)
            .ignore_then(expr.delimited_by(just(TokenType::LParen), just(TokenType::RParen)))
            .map_with(|inner, extra| Spanned::new(Expr::Negate(Box::new(inner)), extra.span()));

        let primary = choice((literal_parser(), negated_paren, paren));

        sum_ladder(primary)
    })
}

/// Creates the parser for what directly follows a `^`: a single
/// exponent-level unit (literal, parenthesized exponent expression, or a
/// negated parenthesized one).
fn exponent_operand_parser<'tokens, I>(
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, TokenType>>> + Clone
where
    I: ValueInput<'tokens, Token = TokenType, Span = SimpleSpan>,
{
    let expr = exponent_expression_parser();

    let paren = expr
        .clone()
        .delimited_by(just(TokenType::LParen), just(TokenType::RParen))
        .map_with(|inner: Spanned<Expr>, extra| Spanned::new(inner.into_parts().0, extra.span()));

    let negated_paren = just(TokenType::Minus)
        .ignore_then(expr.delimited_by(just(TokenType::LParen), just(TokenType::RParen)))
        .map_with(|inner, extra| Spanned::new(Expr::Negate(Box::new(inner)), extra.span()));

    choice((literal_parser(), negated_paren, paren))
}
