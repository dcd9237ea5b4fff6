//! CSV export of the normalized transaction stream
//!
//! Writes decoded transactions back out in a single, version-independent
//! layout. Absent values become empty cells. All functions are pure (no file
//! handling) for easy testing.

use crate::types::TransactionRecord;
use csv::WriterBuilder;
use std::io::Write;

/// Header of the normalized export, in `TransactionRecord` field order
pub const TRANSACTION_CSV_HEADER: [&str; 27] = [
    "action",
    "time",
    "isin",
    "ticker",
    "name",
    "notes",
    "id",
    "shares",
    "price_per_share",
    "price_currency",
    "exchange_rate",
    "result",
    "result_currency",
    "total",
    "total_currency",
    "withholding_tax",
    "withholding_tax_currency",
    "charge_amount",
    "charge_amount_currency",
    "deposit_fee",
    "deposit_fee_currency",
    "conversion_from_amount",
    "conversion_from_currency",
    "conversion_to_amount",
    "conversion_to_currency",
    "conversion_fee",
    "conversion_fee_currency",
];

/// Write transactions as CSV, in the order given
///
/// The header is always written, even for an empty slice.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_transactions_csv(
    transactions: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer
        .write_record(TRANSACTION_CSV_HEADER)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for transaction in transactions {
        writer
            .serialize(transaction)
            .map_err(|e| format!("Failed to write transaction record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
