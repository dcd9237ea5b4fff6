//! Broker Export Parser CLI
//!
//! Command-line interface for converting brokerage CSV exports into one
//! normalized, time-sorted transaction CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- export.csv > transactions.csv
//! cargo run -- from_2022-01-01_to_2022-12-31_main.csv from_2023-01-01_to_2023-12-31_main.csv > transactions.csv
//! cargo run -- --strategy async --max-concurrent 4 from_*.csv > transactions.csv
//! cargo run -- --delimiter ';' --log-level info --summary-only export.csv
//! ```
//!
//! A single input file is parsed as-is. Two or more files are treated as a
//! yearly set: their names must follow `from_<date>_to_<date>_<tag>.csv` with
//! at most one file per year.
//!
//! # Exit Codes
//!
//! - 0: Success (rows or files may still have been skipped, see the log)
//! - 1: Fatal error (bad header, empty input, bad file names, output failure)

use broker_export_parser::cli;
use broker_export_parser::core::BatchParser;
use broker_export_parser::io::write_transactions_csv;
use broker_export_parser::strategy;
use broker_export_parser::types::Action;
use std::io::{stdout, BufWriter};
use std::process;
use tracing::{error, info};

fn main() {
    let args = cli::parse_args();
    cli::setup_logging(args.log_level);

    let outcome = if let [input] = args.inputs.as_slice() {
        BatchParser::new(args.to_parser_config()).parse_file(input)
    } else {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), args.to_parser_config(), config)
            .process(&args.inputs)
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            error!("Import failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let summary = &result.summary;
    let count = |matches: fn(&Action) -> bool| {
        result
            .transactions
            .iter()
            .filter(|t| matches(&t.action))
            .count()
    };
    let (first, last) = summary
        .date_range
        .as_ref()
        .map(|range| (range.start.to_string(), range.end.to_string()))
        .unwrap_or_default();
    info!(
        transactions = summary.transaction_count,
        tickers = summary.unique_tickers,
        first = %first,
        last = %last,
        buys = count(Action::is_buy),
        sells = count(Action::is_sell),
        dividends = count(Action::is_dividend),
        skipped_rows = result.stats.rows_skipped,
        skipped_files = result.stats.files_skipped.len(),
        "Import complete"
    );

    if args.summary_only {
        return;
    }

    let mut output = BufWriter::new(stdout().lock());
    if let Err(e) = write_transactions_csv(&result.transactions, &mut output) {
        error!("Failed to write output: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
