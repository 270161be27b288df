//! # Line Evaluation
//!
//! Walks the parsed expression tree and computes its value under the base
//! field (mod P), switching to the exponent field (mod P−1) for the right
//! side of `^`. Exponents reduced mod P−1 make `a^b` well defined for any
//! integer `b` by Fermat's little theorem, including negative ones when
//! the reduced exponent denominator is invertible.
//!
//! Both operands of a node are always walked before an error propagates,
//! so the trace is fully emitted even for failing lines; only the first
//! error in evaluation order is reported.

use modp_common::{Field, FieldError};
use modp_parser::{parse_line, BinOp, Expr, Spanned};

use crate::context::EvalContext;
use crate::report::LineReport;

/// Evaluator for a fixed prime modulus, reusable across lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    base: Field,
    exponent: Field,
}

impl Evaluator {
    /// Builds the field pair for a prime `p`: values mod `p`, exponents
    /// mod `p - 1`.
    pub const fn new(prime: u64) -> Self {
        Self {
            base: Field::prime(prime),
            exponent: Field::composite(prime - 1),
        }
    }

    pub const fn prime(&self) -> u64 {
        self.base.modulus()
    }

    /// Parses and evaluates one line, producing its terminal outcome.
    pub fn evaluate(&self, line: &str) -> LineReport {
        let parsed = parse_line(line);
        let Some(expr) = parsed.expr else {
            tracing::debug!(count = parsed.diagnostics.len(), "line failed to parse");
            return LineReport::Syntax {
                diagnostics: parsed.diagnostics,
            };
        };

        let mut ctx = EvalContext::new();
        match self.eval_expr(&expr, self.base, &mut ctx) {
            Ok(value) => LineReport::Value {
                trace: ctx.to_string(),
                value,
            },
            Err(error) => LineReport::Semantic {
                trace: ctx.to_string(),
                error,
            },
        }
    }

    fn eval_expr(
        &self,
        expr: &Spanned<Expr>,
        field: Field,
        ctx: &mut EvalContext,
    ) -> Result<u64, FieldError> {
        match expr.value() {
            Expr::Literal(n) => {
                let value = field.reduce(*n);
                ctx.push_value(value);
                Ok(value)
            }
            Expr::Negate(inner) => {
                let inner = self.eval_expr(inner, field, ctx);
                ctx.push_symbol("n");
                Ok(field.neg(inner?))
            }
            Expr::BinaryOp { op, left, right } => {
                let left = self.eval_expr(left, field, ctx);
                let right = self.eval_expr(right, field, ctx);
                ctx.push_symbol(op.symbol());
                let (a, b) = (left?, right?);
                match op {
                    BinOp::Add => Ok(field.add(a, b)),
                    BinOp::Sub => Ok(field.sub(a, b)),
                    BinOp::Mul => Ok(field.mul(a, b)),
                    BinOp::Div => field.div(a, b),
                }
            }
            Expr::Pow { base, exponent } => {
                // The grammar confines Pow to the base level, so `field`
                // is the base field here.
                let base = self.eval_expr(base, field, ctx);
                let exponent = self.eval_expr(exponent, self.exponent, ctx);
                ctx.push_symbol("^");
                Ok(self.base.pow(base?, exponent?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EV: Evaluator = Evaluator::new(17);

    #[track_caller]
    fn value_of(line: &str) -> (String, u64) {
        match EV.evaluate(line) {
            LineReport::Value { trace, value } => (trace, value),
            other => panic!("expected {line:?} to evaluate, got {other:?}"),
        }
    }

    #[track_caller]
    fn error_of(line: &str) -> (String, FieldError) {
        match EV.evaluate(line) {
            LineReport::Semantic { trace, error } => (trace, error),
            other => panic!("expected {line:?} to fail semantically, got {other:?}"),
        }
    }

    #[test]
    fn literal_round_trip() {
        assert_eq!(value_of("0"), ("0 ".into(), 0));
        assert_eq!(value_of("16"), ("16 ".into(), 16));
        assert_eq!(value_of("17"), ("0 ".into(), 0));
        assert_eq!(value_of("35"), ("1 ".into(), 1));
    }

    #[test]
    fn negative_literal_folds_into_the_residue() {
        // No `n` fragment for a signed literal.
        assert_eq!(value_of("-5"), ("12 ".into(), 12));
        assert_eq!(value_of("- - 5"), ("5 ".into(), 5));
    }

    #[test]
    fn paren_negation_emits_n() {
        assert_eq!(value_of("-(5)"), ("5 n ".into(), 12));
        assert_eq!(value_of("-(1 + 2)"), ("1 2 + n ".into(), 14));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(value_of("3 + 4"), ("3 4 + ".into(), 7));
        assert_eq!(value_of("2 - 5"), ("2 5 - ".into(), 14));
        assert_eq!(value_of("3 * (4 + 5)"), ("3 4 5 + * ".into(), 10));
        assert_eq!(value_of("10 / 2"), ("10 2 / ".into(), 5));
        assert_eq!(value_of("1 / 2"), ("1 2 / ".into(), 9));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(
            error_of("5 / 0"),
            ("5 0 / ".into(), FieldError::DivisionByZero)
        );
        // A divisor congruent to zero counts as zero.
        assert_eq!(
            error_of("5 / 17"),
            ("5 0 / ".into(), FieldError::DivisionByZero)
        );
    }

    #[test]
    fn pow_reduces_the_exponent_mod_p_minus_1() {
        assert_eq!(value_of("2 ^ 3"), ("2 3 ^ ".into(), 8));
        // 20 mod 16 == 4.
        assert_eq!(value_of("2 ^ 20"), ("2 4 ^ ".into(), 16));
        // Fermat: exponent 16 reduces to 0.
        assert_eq!(value_of("3 ^ 16"), ("3 0 ^ ".into(), 1));
        // Negative exponent: -1 mod 16 == 15, and 2^15 == 1/2 mod 17.
        assert_eq!(value_of("2 ^ -1"), ("2 15 ^ ".into(), 9));
        assert_eq!(value_of("2 ^ -(1)"), ("2 1 n ^ ".into(), 9));
    }

    #[test]
    fn fractional_exponent_via_inverse() {
        // 1/3 mod 16 == 11; 2^11 == 8, the cube root of 2 mod 17.
        assert_eq!(value_of("2 ^ (1/3)"), ("2 1 3 / ^ ".into(), 8));
        assert_eq!(value_of("8 ^ 3"), ("8 3 ^ ".into(), 2));
    }

    #[test]
    fn non_invertible_exponent_denominator() {
        assert_eq!(
            error_of("2 ^ (1/4)"),
            ("2 1 4 / ^ ".into(), FieldError::NotInvertible(16))
        );
        // Shares a factor with 16 without dividing it.
        assert_eq!(
            error_of("2 ^ (1/6)"),
            ("2 1 6 / ^ ".into(), FieldError::NotInvertible(16))
        );
    }

    #[test]
    fn fraction_reduces_before_the_invertibility_check() {
        // 8/4 reduces to 2/1; the lone denominator 4 would not invert.
        assert_eq!(value_of("2 ^ (8/4)"), ("2 8 4 / ^ ".into(), 4));
        // 2/4 reduces to 1/2, still sharing a factor with 16.
        assert_eq!(
            error_of("2 ^ (2/4)"),
            ("2 2 4 / ^ ".into(), FieldError::NotInvertible(16))
        );
    }

    #[test]
    fn exponent_division_by_zero() {
        assert_eq!(
            error_of("2 ^ (1/0)"),
            ("2 1 0 / ^ ".into(), FieldError::DivisionByZero)
        );
        // 16 reduces to zero in the exponent field.
        assert_eq!(
            error_of("2 ^ (1/16)"),
            ("2 1 0 / ^ ".into(), FieldError::DivisionByZero)
        );
    }

    #[test]
    fn first_error_wins_and_trace_continues() {
        let (trace, error) = error_of("1/0 + 2 ^ (1/4)");
        assert_eq!(trace, "1 0 / 2 1 4 / ^ + ");
        assert_eq!(error, FieldError::DivisionByZero);

        let (trace, error) = error_of("2 ^ (1/4) + 1/0");
        assert_eq!(trace, "2 1 4 / ^ 1 0 / + ");
        assert_eq!(error, FieldError::NotInvertible(16));
    }

    #[test]
    fn pow_precedence_in_context() {
        assert_eq!(value_of("2 ^ 3 + 1"), ("2 3 ^ 1 + ".into(), 9));
        assert_eq!(value_of("2 ^ 3 * 2"), ("2 3 ^ 2 * ".into(), 16));
        assert_eq!(value_of("-(2) ^ 2"), ("2 n 2 ^ ".into(), 4));
    }

    #[test]
    fn syntax_errors_leave_no_partial_state() {
        assert!(matches!(EV.evaluate("* 3"), LineReport::Syntax { .. }));
        assert!(matches!(EV.evaluate("2 ^ 3 ^ 4"), LineReport::Syntax { .. }));
        // The evaluator is reusable after a failed line.
        assert_eq!(value_of("3 + 4"), ("3 4 + ".into(), 7));
    }
}
