use std::fmt;

use modp_common::FieldError;
use modp_parser::ParseDiagnostic;

/// Terminal outcome of one input line. Exactly one is produced per line,
/// even when the input is malformed midway through.
///
/// `Display` renders the canonical report:
///
/// - success: the `rpn:` trace line, then `result = <value>`;
/// - semantic failure in a structurally valid line: the `rpn:` trace
///   line, then the specific error;
/// - structural parse failure: only `Error: invalid syntax` — no partial
///   trace or value is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineReport {
    Value {
        trace: String,
        value: u64,
    },
    Semantic {
        trace: String,
        error: FieldError,
    },
    Syntax {
        /// Lexer and parser diagnostics, kept for verbose reporting.
        diagnostics: Vec<ParseDiagnostic>,
    },
}

impl LineReport {
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Value { .. })
    }

    /// The computed residue, when the line succeeded.
    pub const fn value(&self) -> Option<u64> {
        match self {
            Self::Value { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The syntax diagnostics, when the line failed to parse.
    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        match self {
            Self::Syntax { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value { trace, value } => {
                writeln!(f, "rpn: {trace}")?;
                write!(f, "result = {value}")
            }
            Self::Semantic { trace, error } => {
                writeln!(f, "rpn: {trace}")?;
                write!(f, "Error: {error}")
            }
            Self::Syntax { .. } => write!(f, "Error: invalid syntax"),
        }
    }
}
