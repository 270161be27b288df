pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{BinOp, Expr, Spanned};
pub use lexer::{LexingError, TokenType};
pub use parser::{parse_line, ParseDiagnostic, ParsedLine};
