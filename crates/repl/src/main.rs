use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueHint};
use modp_common::{is_prime, DEFAULT_PRIME};
use modp_evaluator::Evaluator;
use modp_parser::error::build_parse_diagnostic_message;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "modp - evaluate modular-arithmetic expressions line by line",
    long_about = None
)]
struct Args {
    /// Input file with one expression per line (reads stdin when omitted)
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Prime modulus for base-field arithmetic; exponents reduce mod P-1
    #[arg(short, long, default_value_t = DEFAULT_PRIME)]
    prime: u64,

    /// Render full syntax-error reports on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if !is_prime(args.prime) {
        bail!("modulus {} is not prime", args.prime);
    }

    let evaluator = Evaluator::new(args.prime);
    tracing::debug!(prime = evaluator.prime(), "evaluator ready");

    match args.input {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Error reading file '{}'", path.display()))?;
            for line in content.lines() {
                run_line(&evaluator, line, args.verbose);
            }
        }
        None => {
            for line in io::stdin().lock().lines() {
                let line = line.context("Error reading stdin")?;
                run_line(&evaluator, &line, args.verbose);
            }
        }
    }

    Ok(())
}

fn run_line(evaluator: &Evaluator, line: &str, verbose: bool) {
    if line.trim().is_empty() {
        return;
    }
    let report = evaluator.evaluate(line);
    if verbose {
        for diagnostic in report.diagnostics() {
            eprintln!("{}", build_parse_diagnostic_message(line, diagnostic, true));
        }
    }
    println!("{report}");
}
