use std::fmt;

use chumsky::span::SimpleSpan;

/// A value paired with the source span it was parsed from.
#[derive(Debug, PartialEq, Clone, Hash, Eq)]
pub struct Spanned<T>(T, SimpleSpan<usize>);

impl<T> Spanned<T> {
    pub const fn new(value: T, span: SimpleSpan<usize>) -> Self {
        Self(value, span)
    }

    pub const fn value(&self) -> &T {
        &self.0
    }

    pub const fn span(&self) -> SimpleSpan<usize> {
        self.1
    }

    /// Splits into the inner value and its span.
    pub fn into_parts(self) -> (T, SimpleSpan<usize>) {
        (self.0, self.1)
    }
}

/// Binary operators shared by the base-field and exponent-field grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition operator `+`
    Add,
    /// Subtraction operator `-`
    Sub,
    /// Multiplication operator `*`
    Mul,
    /// Division operator `/`
    Div,
}

impl BinOp {
    /// The symbol recorded in the postfix trace.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An expression of one calculator line.
///
/// Which modulus an expression is evaluated under is not part of the tree:
/// the evaluator switches to the exponent field when it descends into the
/// right side of [`Expr::Pow`]. The grammar guarantees no `Pow` node ever
/// appears inside an exponent subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Integer literal, with any leading sign chain (`number := SUB number`)
    /// already folded in. Negative values normalize when reduced into a
    /// field.
    Literal(i128),
    /// Unary negation of a parenthesized expression (`- ( expr )`). Emits
    /// an `n` fragment in the trace, unlike a signed literal.
    Negate(Box<Spanned<Expr>>),
    /// Binary operation (e.g. `a + b`, `a / b`)
    BinaryOp {
        op: BinOp,
        left: Box<Spanned<Expr>>,
        right: Box<Spanned<Expr>>,
    },
    /// Exponentiation. Non-associative: the grammar rejects `a ^ b ^ c`.
    /// The exponent subtree is evaluated mod P−1.
    Pow {
        base: Box<Spanned<Expr>>,
        exponent: Box<Spanned<Expr>>,
    },
}
