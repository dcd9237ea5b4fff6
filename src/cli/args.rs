use crate::core::ParserConfig;
use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Convert brokerage CSV exports into a normalized transaction stream
#[derive(Parser, Debug)]
#[command(name = "broker-export-parser")]
#[command(about = "Convert brokerage CSV exports into a normalized transaction stream", long_about = None)]
pub struct CliArgs {
    /// Export files; two or more must follow the yearly naming convention
    #[arg(
        value_name = "FILES",
        required = true,
        num_args = 1..,
        help = "Export CSV files (one per year, named from_<date>_to_<date>_<tag>.csv)"
    )]
    pub inputs: Vec<PathBuf>,

    /// How a file set is processed
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' parses files one by one, 'async' in parallel"
    )]
    pub strategy: StrategyType,

    /// Field delimiter of the input files
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_delimiter,
        help = "Single ASCII character separating fields"
    )]
    pub delimiter: u8,

    /// Maximum number of files parsed in parallel (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of files parsed concurrently (default: CPU cores)"
    )]
    pub max_concurrent_files: Option<usize>,

    /// Log verbosity on stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "One of off, error, warn, info, debug, trace"
    )]
    pub log_level: LevelFilter,

    /// Only log the summary, do not write transactions to stdout
    #[arg(long = "summary-only")]
    pub summary_only: bool,
}

/// Available strategies for processing a file set
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Parser configuration from CLI arguments
    pub fn to_parser_config(&self) -> ParserConfig {
        ParserConfig {
            delimiter: self.delimiter,
            ..ParserConfig::default()
        }
    }

    /// BatchConfig from CLI arguments, defaults where not given
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.max_concurrent_files {
            Some(count) => BatchConfig::new(count),
            None => BatchConfig::default(),
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            value
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "a.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "a.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "a.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[test]
    fn test_multiple_inputs() {
        let parsed = CliArgs::try_parse_from(["program", "a.csv", "b.csv", "c.csv"]).unwrap();
        assert_eq!(
            parsed.inputs,
            [PathBuf::from("a.csv"), PathBuf::from("b.csv"), PathBuf::from("c.csv")]
        );
        assert!(!parsed.summary_only);
    }

    #[rstest]
    #[case::default(&["program", "a.csv"], b',')]
    #[case::semicolon(&["program", "--delimiter", ";", "a.csv"], b';')]
    #[case::pipe(&["program", "--delimiter", "|", "a.csv"], b'|')]
    fn test_delimiter(#[case] args: &[&str], #[case] expected: u8) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_parser_config().delimiter, expected);
        assert_eq!(parsed.to_parser_config().max_reported_errors, 10);
    }

    #[rstest]
    #[case::default(&["program", "a.csv"], LevelFilter::WARN)]
    #[case::debug(&["program", "--log-level", "debug", "a.csv"], LevelFilter::DEBUG)]
    #[case::off(&["program", "--log-level", "off", "a.csv"], LevelFilter::OFF)]
    fn test_log_level(#[case] args: &[&str], #[case] expected: LevelFilter) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.log_level, expected);
    }

    #[rstest]
    #[case::all_defaults(&["program", "a.csv"], num_cpus::get())]
    #[case::custom(&["program", "--max-concurrent", "8", "a.csv"], 8)]
    #[case::zero_falls_back(&["program", "--max-concurrent", "0", "a.csv"], num_cpus::get())]
    fn test_batch_config_conversion(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_batch_config().max_concurrent_files, expected);
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "a.csv"])]
    #[case::long_delimiter(&["program", "--delimiter", ";;", "a.csv"])]
    #[case::non_ascii_delimiter(&["program", "--delimiter", "§", "a.csv"])]
    #[case::invalid_log_level(&["program", "--log-level", "loud", "a.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
