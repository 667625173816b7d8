//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "stockscan", version, about = "Barcode-driven inventory lookup and registration")]
pub struct Cli {
    /// Config file (default: stockscan.toml in the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ledger CSV file, overrides the config file
    #[arg(short, long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Output format for non-interactive commands
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive scanning session (default)
    Run,
    /// Print one item and exit; exits non-zero when it is missing
    Lookup {
        /// Barcode to look up
        barcode: String,
    },
    /// Print ledger totals
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_interactive() {
        let cli = Cli::try_parse_from(["stockscan"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.output, OutputFormat::Table);
    }

    #[test]
    fn test_lookup_with_flags() {
        let cli = Cli::try_parse_from([
            "stockscan",
            "lookup",
            "5449000000996",
            "--output",
            "json",
            "--ledger",
            "/tmp/stock.csv",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::Lookup {
                barcode: "5449000000996".to_string()
            })
        );
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.ledger, Some(PathBuf::from("/tmp/stock.csv")));
    }
}
