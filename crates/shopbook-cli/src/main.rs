//! Shopbook CLI - evaluate custom column formulas from the shell

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shopbook::prelude::*;
use shopbook::references;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shopbook")]
#[command(author, version, about = "Custom column formula tool")]
struct Cli {
    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a formula against one order line
    Eval {
        /// Formula text, e.g. "{quantity} * {Custom Rate}"
        formula: String,

        /// Line quantity
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: f64,

        /// Line rate
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        rate: f64,

        /// Custom field value (repeatable)
        #[arg(short, long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Fail instead of printing 0 when the formula cannot be evaluated
        #[arg(short, long)]
        strict: bool,
    },

    /// List the keys a formula references
    Refs {
        /// Formula text
        formula: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Eval {
            formula,
            quantity,
            rate,
            fields,
            strict,
        } => eval(&formula, quantity, rate, fields, strict),
        Commands::Refs { formula } => list_references(&formula),
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn eval(
    formula: &str,
    quantity: f64,
    rate: f64,
    fields: Vec<(String, String)>,
    strict: bool,
) -> Result<()> {
    let mut item = OrderItem::default().with_quantity(quantity).with_rate(rate);
    for (name, value) in fields {
        item.set_custom_field(name, value);
    }
    tracing::debug!(formula, fields = item.custom_fields.len(), "evaluating");

    let value = if strict {
        try_evaluate(formula, &item)
            .with_context(|| format!("Failed to evaluate '{}'", formula))?
    } else {
        evaluate(formula, &item)
    };

    println!("{}", FieldValue::from(value));
    Ok(())
}

fn list_references(formula: &str) -> Result<()> {
    for key in references(formula) {
        println!("{}", key);
    }
    Ok(())
}

/// Parse `NAME=VALUE`; the name is trimmed, the value kept as typed
fn parse_field(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("Custom Rate=2.5"),
            Ok(("Custom Rate".to_string(), "2.5".to_string()))
        );
        assert_eq!(
            parse_field(" Size =12cm"),
            Ok(("Size".to_string(), "12cm".to_string()))
        );
        assert_eq!(parse_field("a=b=c"), Ok(("a".to_string(), "b=c".to_string())));
        assert!(parse_field("Size").is_err());
        assert!(parse_field("=5").is_err());
    }

    #[test]
    fn test_parse_eval_args() {
        let cli = Cli::parse_from([
            "shopbook",
            "eval",
            "{quantity} * {Width}",
            "--quantity",
            "3",
            "--field",
            "Width=2",
            "--strict",
        ]);
        match cli.command {
            Commands::Eval {
                quantity,
                fields,
                strict,
                ..
            } => {
                assert_eq!(quantity, 3.0);
                assert_eq!(fields, vec![("Width".to_string(), "2".to_string())]);
                assert!(strict);
            }
            Commands::Refs { .. } => panic!("expected eval"),
        }
    }
}
