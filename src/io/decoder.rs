//! Row to transaction decoding
//!
//! Runs one raw row through normalization and field extraction and produces a
//! complete [`TransactionRecord`]. Any failure rejects the whole row; partially
//! filled records are never returned.

use crate::io::fields::{columns, FieldMap};
use crate::io::normalizer::{normalize_row, RawRow};
use crate::io::schema::Header;
use crate::types::{Action, ImportError, TransactionRecord};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Accepted time formats, tried in order
pub const TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a transaction time; the brokerage reports times in UTC
pub fn parse_time(raw: &str) -> Result<DateTime<Utc>, ImportError> {
    let value = raw.trim();

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ImportError::time_parse(value))
}

/// Decode one data row against a validated header
///
/// `line` is the row's physical line number and is attached to any error.
///
/// # Errors
///
/// `ImportError::Row` wrapping one of:
/// - `SevereMismatch` if the field count is beyond repair
/// - `RequiredFieldMissing` if `Action` or `Time` is empty
/// - `TimeParse` if `Time` matches no accepted format
/// - `FieldParse` if an optional numeric cell is not a number
pub fn decode_row(header: &Header, row: RawRow, line: u64) -> Result<TransactionRecord, ImportError> {
    decode(header, row).map_err(|e| e.at_line(line))
}

fn decode(header: &Header, row: RawRow) -> Result<TransactionRecord, ImportError> {
    let row = normalize_row(header.len(), row)?;
    let fields = FieldMap::new(header.columns(), &row);

    let time = parse_time(fields.required_text(columns::TIME)?)?;
    let action = Action::new(fields.required_text(columns::ACTION)?);

    let mut record = TransactionRecord::new(action, time);
    fields.apply_optional_fields(&mut record)?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::test_support::{buy_row, header_22, header_23, header_27, row};
    use chrono::TimeZone;
    use rstest::rstest;

    fn header(columns: Vec<String>) -> Header {
        Header::parse(&columns).unwrap()
    }

    #[rstest]
    #[case::space("2024-01-15 10:30:00")]
    #[case::iso("2024-01-15T10:30:00")]
    #[case::padded("  2024-01-15 10:30:00 ")]
    fn test_parse_time_formats(#[case] raw: &str) {
        assert_eq!(
            parse_time(raw),
            Ok(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
        );
    }

    #[rstest]
    #[case::date_only("2024-01-15")]
    #[case::slashes("15/01/2024 10:30:00")]
    #[case::invalid_day("2024-02-30 10:30:00")]
    #[case::words("yesterday")]
    fn test_parse_time_rejects(#[case] raw: &str) {
        assert_eq!(parse_time(raw), Err(ImportError::time_parse(raw)));
    }

    #[rstest]
    #[case::v22(header_22())]
    #[case::v23(header_23())]
    #[case::v27(header_27())]
    fn test_decodes_buy_in_every_layout(#[case] columns: Vec<String>) {
        let header = header(columns);
        let record = decode_row(&header, buy_row(header.columns(), "2024-01-15 10:30:00"), 2).unwrap();

        assert_eq!(record.action.as_str(), "Market buy");
        assert_eq!(record.time, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
        assert_eq!(record.isin.as_deref(), Some("US0378331005"));
        assert_eq!(record.ticker.as_deref(), Some("AAPL"));
        assert_eq!(record.name.as_deref(), Some("Apple Inc."));
        assert_eq!(record.shares, Some(2.0));
        assert_eq!(record.price_per_share, Some(150.5));
        assert_eq!(record.total, Some(301.0));
        assert_eq!(record.total_currency.as_deref(), Some("USD"));
        assert_eq!(record.notes, None);
        assert_eq!(record.exchange_rate, None);
        assert_eq!(record.result, None);
    }

    #[test]
    fn test_result_not_available_is_absent() {
        let header = header(header_27());
        let cells = row(
            header.columns(),
            &[
                (columns::ACTION, "Market sell"),
                (columns::TIME, "2024-03-01 09:00:00"),
                (columns::TICKER, "AAPL"),
                (columns::RESULT, "Not available"),
            ],
        );

        let record = decode_row(&header, cells, 2).unwrap();
        assert_eq!(record.result, None);
    }

    #[test]
    fn test_result_read_when_present() {
        let header = header(header_27());
        let cells = row(
            header.columns(),
            &[
                (columns::ACTION, "Market sell"),
                (columns::TIME, "2024-03-01 09:00:00"),
                (columns::RESULT, "12.34"),
                (columns::RESULT_CURRENCY, "EUR"),
                (columns::CONVERSION_FROM_AMOUNT, "100"),
                (columns::CONVERSION_FROM_CURRENCY, "EUR"),
                (columns::CONVERSION_TO_AMOUNT, "108.5"),
                (columns::CONVERSION_TO_CURRENCY, "USD"),
            ],
        );

        let record = decode_row(&header, cells, 2).unwrap();
        assert_eq!(record.result, Some(12.34));
        assert_eq!(record.result_currency.as_deref(), Some("EUR"));
        assert_eq!(record.conversion_from_amount, Some(100.0));
        assert_eq!(record.conversion_to_amount, Some(108.5));
        assert_eq!(record.conversion_to_currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_short_row_is_repaired() {
        let header = header(header_27());
        let mut cells = buy_row(header.columns(), "2024-01-15 10:30:00");
        cells.truncate(21);

        let record = decode_row(&header, cells, 2).unwrap();
        assert_eq!(record.ticker.as_deref(), Some("AAPL"));
        assert_eq!(record.result, None);
    }

    #[test]
    fn test_zero_total_is_absent() {
        let header = header(header_22());
        let cells = row(
            header.columns(),
            &[
                (columns::ACTION, "Deposit"),
                (columns::TIME, "2024-01-02 08:00:00"),
                (columns::TOTAL, "0"),
                (columns::DEPOSIT_FEE, "0.00"),
            ],
        );

        let record = decode_row(&header, cells, 2).unwrap();
        assert_eq!(record.total, None);
        assert_eq!(record.deposit_fee, Some(0.0));
    }

    #[rstest]
    #[case::missing_action(
        &[(columns::TIME, "2024-01-15 10:30:00")],
        ImportError::required_field_missing("Action")
    )]
    #[case::missing_time(
        &[(columns::ACTION, "Deposit")],
        ImportError::required_field_missing("Time")
    )]
    #[case::bad_time(
        &[(columns::ACTION, "Deposit"), (columns::TIME, "15.01.2024")],
        ImportError::time_parse("15.01.2024")
    )]
    #[case::bad_number(
        &[(columns::ACTION, "Deposit"), (columns::TIME, "2024-01-15 10:30:00"), (columns::TOTAL, "ten")],
        ImportError::field_parse("Total", "ten")
    )]
    fn test_row_errors(#[case] cells: &[(&str, &str)], #[case] expected: ImportError) {
        let header = header(header_23());
        let cells = row(header.columns(), cells);

        assert_eq!(decode_row(&header, cells, 9), Err(expected.at_line(9)));
    }

    #[test]
    fn test_severe_mismatch_carries_line() {
        let header = header(header_23());
        let cells = vec!["Deposit".to_string(), "2024-01-15 10:30:00".to_string()];

        let error = decode_row(&header, cells, 4).unwrap_err();
        assert_eq!(
            error,
            ImportError::SevereMismatch {
                expected: 23,
                actual: 2
            }
            .at_line(4)
        );
    }
}
