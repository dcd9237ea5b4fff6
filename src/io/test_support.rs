//! Export layouts, row builders and log capture shared by unit tests

use crate::io::fields::columns;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::Level;

const BASE_COLUMNS: [&str; 21] = [
    columns::ACTION,
    columns::TIME,
    columns::ISIN,
    columns::TICKER,
    columns::NAME,
    columns::NOTES,
    columns::ID,
    columns::SHARES,
    columns::PRICE_PER_SHARE,
    columns::PRICE_CURRENCY,
    columns::EXCHANGE_RATE,
    columns::TOTAL,
    columns::TOTAL_CURRENCY,
    columns::WITHHOLDING_TAX,
    columns::WITHHOLDING_TAX_CURRENCY,
    columns::CONVERSION_FEE,
    columns::CONVERSION_FEE_CURRENCY,
    columns::CHARGE_AMOUNT,
    columns::CHARGE_AMOUNT_CURRENCY,
    columns::DEPOSIT_FEE,
    columns::DEPOSIT_FEE_CURRENCY,
];

fn layout(extra: &[&str]) -> Vec<String> {
    BASE_COLUMNS
        .iter()
        .chain(extra)
        .map(|c| c.to_string())
        .collect()
}

pub fn header_22() -> Vec<String> {
    layout(&["Stamp duty reserve tax"])
}

pub fn header_23() -> Vec<String> {
    layout(&["Stamp duty reserve tax", columns::RESULT])
}

pub fn header_27() -> Vec<String> {
    layout(&[
        columns::RESULT,
        columns::RESULT_CURRENCY,
        columns::CONVERSION_FROM_AMOUNT,
        columns::CONVERSION_FROM_CURRENCY,
        columns::CONVERSION_TO_AMOUNT,
        columns::CONVERSION_TO_CURRENCY,
    ])
}

/// A row matching `header`, with the named cells set and the rest empty
pub fn row(header: &[String], cells: &[(&str, &str)]) -> Vec<String> {
    header
        .iter()
        .map(|column| {
            cells
                .iter()
                .find(|(name, _)| *name == column.as_str())
                .map(|(_, value)| value.to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// A market buy of AAPL at the given time
pub fn buy_row(header: &[String], time: &str) -> Vec<String> {
    row(
        header,
        &[
            (columns::ACTION, "Market buy"),
            (columns::TIME, time),
            (columns::ISIN, "US0378331005"),
            (columns::TICKER, "AAPL"),
            (columns::NAME, "Apple Inc."),
            (columns::SHARES, "2"),
            (columns::PRICE_PER_SHARE, "150.5"),
            (columns::PRICE_CURRENCY, "USD"),
            (columns::TOTAL, "301"),
            (columns::TOTAL_CURRENCY, "USD"),
        ],
    )
}

/// Join rows into CSV text
pub fn csv_text(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|r| r.join(","))
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return its warning lines
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(Level::WARN)
        .finish();

    let value = tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.0.lock().expect("log buffer poisoned").clone();
    let lines = String::from_utf8_lossy(&bytes)
        .lines()
        .filter(|line| line.contains("WARN"))
        .map(str::to_string)
        .collect();

    (value, lines)
}
