use std::fmt;

/// The per-line evaluation context: the postfix (RPN) trace accumulated
/// while the expression tree is walked.
///
/// Appending is a pure side channel, independent of whether evaluation
/// has already failed; erroneous lines still carry a full trace. A
/// context is created at line start, consumed by line completion, and
/// never shared across lines.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EvalContext {
    fragments: Vec<String>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a normalized operand residue.
    pub fn push_value(&mut self, value: u64) {
        self.fragments.push(value.to_string());
    }

    /// Records an operator symbol (`+ - * / ^ n`).
    pub fn push_symbol(&mut self, symbol: &str) {
        self.fragments.push(symbol.to_string());
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// Each fragment is followed by a single space, matching the incremental
/// rendering of the trace.
impl fmt::Display for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{fragment} ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fragments_with_trailing_spaces() {
        let mut ctx = EvalContext::new();
        ctx.push_value(3);
        ctx.push_value(4);
        ctx.push_symbol("+");
        assert_eq!(ctx.to_string(), "3 4 + ");
    }

    #[test]
    fn empty_context_renders_empty() {
        assert_eq!(EvalContext::new().to_string(), "");
    }
}
