pub mod context;
pub mod eval;
pub mod report;

pub use context::EvalContext;
pub use eval::Evaluator;
pub use report::LineReport;
