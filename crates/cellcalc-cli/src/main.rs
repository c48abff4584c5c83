//! cellcalc CLI - evaluate pre-split cell formulas

use anyhow::{bail, Context, Result};
use cellcalc_core::{CellAddress, CellError, CellStore};
use cellcalc_formula::{
    evaluate, evaluate_cell, is_cell_reference, is_number, EvaluationOutcome,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Parser)]
#[command(name = "cellcalc")]
#[command(author, version, about = "Evaluate spreadsheet cell formulas")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula given as separate tokens
    #[command(alias = "e")]
    Eval {
        /// Define a cell before evaluating, e.g. `A1=3 + 4` (repeatable, evaluated in order)
        #[arg(short, long = "cell", value_name = "LABEL=TOKENS")]
        cells: Vec<String>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Formula tokens, e.g. `A1 + 5`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Show how each token would be classified
    Check {
        /// Tokens to classify
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            cells,
            json,
            tokens,
        } => eval(&cells, &tokens, json),
        Commands::Check { tokens } => check(&tokens),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn)
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn eval(cells: &[String], tokens: &[String], json: bool) -> Result<()> {
    let mut store = CellStore::new();

    for definition in cells {
        let (label, formula) = parse_cell_definition(definition)?;
        store
            .set_formula(&label, formula)
            .with_context(|| format!("Failed to define cell '{}'", label))?;
        let outcome = evaluate_cell(&mut store, &label)?;
        tracing::debug!(
            "{label} = {} {}",
            outcome.result,
            outcome.error_message()
        );
    }

    let outcome = evaluate(tokens, &store);

    let mut stdout = io::stdout();
    if json {
        let report = Report::from(&outcome);
        serde_json::to_writer(&mut stdout, &report).context("Failed to write JSON")?;
        writeln!(stdout).context("Failed to write to stdout")?;
    } else {
        writeln!(
            stdout,
            "{}\t{}",
            format_number(outcome.result),
            outcome.error_message()
        )
        .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn check(tokens: &[String]) -> Result<()> {
    let mut stdout = io::stdout();

    for token in tokens {
        writeln!(stdout, "{}\t{}", token, token_kind(token))
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn token_kind(token: &str) -> &'static str {
    if is_number(token) {
        "number"
    } else if is_cell_reference(token) {
        "cell"
    } else {
        "symbol"
    }
}

/// Split `LABEL=TOKENS` into a label and whitespace-separated tokens
fn parse_cell_definition(definition: &str) -> Result<(String, Vec<String>)> {
    let Some((label, formula)) = definition.split_once('=') else {
        bail!("Cell definition '{}' must look like LABEL=TOKENS", definition);
    };

    let label = label.trim();
    CellAddress::parse(label).with_context(|| format!("Invalid cell label '{}'", label))?;

    let formula = formula.split_whitespace().map(str::to_string).collect();
    Ok((label.to_string(), formula))
}

/// Format a result without a trailing `.0` for whole numbers
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// JSON shape of an outcome
#[derive(Serialize)]
struct Report {
    /// `None` when the result is not finite
    result: Option<f64>,
    error: Option<CellError>,
    message: &'static str,
}

impl From<&EvaluationOutcome> for Report {
    fn from(outcome: &EvaluationOutcome) -> Self {
        Self {
            result: Some(outcome.result).filter(|n| n.is_finite()),
            error: outcome.error,
            message: outcome.error_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind() {
        assert_eq!(token_kind("2.5"), "number");
        assert_eq!(token_kind("B12"), "cell");
        assert_eq!(token_kind("b12"), "symbol");
        assert_eq!(token_kind("*"), "symbol");
    }

    #[test]
    fn test_parse_cell_definition() {
        let (label, formula) = parse_cell_definition("A1=3 + 4").unwrap();
        assert_eq!(label, "A1");
        assert_eq!(formula, vec!["3", "+", "4"]);

        let (label, formula) = parse_cell_definition(" B2 =").unwrap();
        assert_eq!(label, "B2");
        assert!(formula.is_empty());

        assert!(parse_cell_definition("A1").is_err());
        assert!(parse_cell_definition("a1=1").is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(11.0), "11");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }

    #[test]
    fn test_report() {
        let outcome = evaluate(&["8", "/", "0"], &CellStore::new());
        let json = serde_json::to_string(&Report::from(&outcome)).unwrap();
        assert_eq!(
            json,
            r##"{"result":null,"error":"DivideByZero","message":"#DIV/0!"}"##
        );

        let outcome = evaluate(&["1", "+", "1"], &CellStore::new());
        let json = serde_json::to_string(&Report::from(&outcome)).unwrap();
        assert_eq!(json, r#"{"result":2.0,"error":null,"message":""}"#);
    }

    #[test]
    fn test_cli_parses_operator_tokens() {
        let cli = Cli::try_parse_from(["cellcalc", "eval", "-c", "A1=2", "A1", "*", "-", "3"])
            .unwrap();
        match cli.command {
            Commands::Eval { cells, tokens, .. } => {
                assert_eq!(cells, vec!["A1=2"]);
                assert_eq!(tokens, vec!["A1", "*", "-", "3"]);
            }
            Commands::Check { .. } => panic!("expected eval"),
        }
    }
}
