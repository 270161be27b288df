//! # Error Reporting Utilities for Parser
//!
//! Renders [`ParseDiagnostic`]s as human-readable reports pointing into
//! the offending line. Only the verbose driver path uses this; the
//! canonical per-line output is the plain `Error: invalid syntax`
//! classification.

use ariadne::{Label, Report, ReportKind, Source};

use crate::parser::ParseDiagnostic;

/// Renders one diagnostic against its source line.
pub fn build_parse_diagnostic_message(
    source: &str,
    diagnostic: &ParseDiagnostic,
    with_color: bool,
) -> String {
    let range = diagnostic.span.into_range();
    let config = ariadne::Config::new()
        .with_index_type(ariadne::IndexType::Byte)
        .with_color(with_color);

    let mut rendered = Vec::new();
    Report::build(ReportKind::Error, ((), range.clone()))
        .with_config(config)
        .with_message(&diagnostic.message)
        .with_label(Label::new(((), range)).with_message(&diagnostic.message))
        .finish()
        .write(Source::from(source), &mut rendered)
        // Writing into a Vec cannot fail.
        .unwrap();
    String::from_utf8_lossy(&rendered).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    #[test]
    fn renders_the_offending_span() {
        let source = "* 3";
        let parsed = parse_line(source);
        assert!(parsed.expr.is_none());
        let message = build_parse_diagnostic_message(source, &parsed.diagnostics[0], false);
        assert!(message.contains("Error"));
    }
}
