//! Field extraction from a normalized row
//!
//! A [`FieldMap`] pairs the header's column names with one row's cells, both
//! trimmed. Typed values are then pulled out with one of three strategies:
//!
//! - **required text** (`Action`, `Time`): an empty value is an error
//! - **optional text** (identity and currency-code columns): empty means absent
//! - **optional number** (amounts, rates, fees): empty, `"0"` and
//!   `"Not available"` mean absent, anything else must parse as `f64`
//!
//! Optional columns are driven by the [`TEXT_FIELDS`] and [`NUMERIC_FIELDS`]
//! tables rather than per-field code.
//!
//! The `"0"` rule is deliberate: the brokerage writes blank and zero
//! interchangeably for "not applicable", so a literal zero is reported as
//! absent. Only the exact token `"0"` is treated this way; `"0.0"` parses to
//! `Some(0.0)`.

use crate::types::{ImportError, NumericTarget, TextTarget, TransactionRecord};
use std::collections::HashMap;

/// Column names used by the brokerage exports
pub mod columns {
    pub const ACTION: &str = "Action";
    pub const TIME: &str = "Time";
    pub const ISIN: &str = "ISIN";
    pub const TICKER: &str = "Ticker";
    pub const NAME: &str = "Name";
    pub const NOTES: &str = "Notes";
    pub const ID: &str = "ID";
    pub const SHARES: &str = "No. of shares";
    pub const PRICE_PER_SHARE: &str = "Price / share";
    pub const PRICE_CURRENCY: &str = "Currency (Price / share)";
    pub const EXCHANGE_RATE: &str = "Exchange rate";
    pub const RESULT: &str = "Result";
    pub const RESULT_CURRENCY: &str = "Currency (Result)";
    pub const TOTAL: &str = "Total";
    pub const TOTAL_CURRENCY: &str = "Currency (Total)";
    pub const WITHHOLDING_TAX: &str = "Withholding tax";
    pub const WITHHOLDING_TAX_CURRENCY: &str = "Currency (Withholding tax)";
    pub const CHARGE_AMOUNT: &str = "Charge amount";
    pub const CHARGE_AMOUNT_CURRENCY: &str = "Currency (Charge amount)";
    pub const DEPOSIT_FEE: &str = "Deposit fee";
    pub const DEPOSIT_FEE_CURRENCY: &str = "Currency (Deposit fee)";
    pub const CONVERSION_FROM_AMOUNT: &str = "Currency conversion from amount";
    pub const CONVERSION_FROM_CURRENCY: &str = "Currency (Currency conversion from amount)";
    pub const CONVERSION_TO_AMOUNT: &str = "Currency conversion to amount";
    pub const CONVERSION_TO_CURRENCY: &str = "Currency (Currency conversion to amount)";
    pub const CONVERSION_FEE: &str = "Currency conversion fee";
    pub const CONVERSION_FEE_CURRENCY: &str = "Currency (Currency conversion fee)";
}

/// Cell text the brokerage uses when a value could not be computed
pub const NOT_AVAILABLE: &str = "Not available";

/// Cell text treated as "no value" in numeric columns
const ZERO: &str = "0";

/// An optional text column and the record attribute it fills
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub column: &'static str,
    pub target: TextTarget,
}

/// An optional numeric column and the record attribute it fills
#[derive(Debug, Clone, Copy)]
pub struct NumericField {
    pub column: &'static str,
    pub target: NumericTarget,

    /// Only looked up when the header has the column at all. Older export
    /// formats lack these columns entirely.
    pub conditional: bool,
}

const fn text(column: &'static str, target: TextTarget) -> TextField {
    TextField { column, target }
}

const fn numeric(column: &'static str, target: NumericTarget) -> NumericField {
    NumericField {
        column,
        target,
        conditional: false,
    }
}

const fn conditional(column: &'static str, target: NumericTarget) -> NumericField {
    NumericField {
        column,
        target,
        conditional: true,
    }
}

/// Optional text columns, identity fields first, then currency codes
pub const TEXT_FIELDS: &[TextField] = &[
    text(columns::ISIN, TextTarget::Isin),
    text(columns::TICKER, TextTarget::Ticker),
    text(columns::NAME, TextTarget::Name),
    text(columns::NOTES, TextTarget::Notes),
    text(columns::ID, TextTarget::Id),
    text(columns::PRICE_CURRENCY, TextTarget::PriceCurrency),
    text(columns::RESULT_CURRENCY, TextTarget::ResultCurrency),
    text(columns::TOTAL_CURRENCY, TextTarget::TotalCurrency),
    text(columns::WITHHOLDING_TAX_CURRENCY, TextTarget::WithholdingTaxCurrency),
    text(columns::CHARGE_AMOUNT_CURRENCY, TextTarget::ChargeAmountCurrency),
    text(columns::DEPOSIT_FEE_CURRENCY, TextTarget::DepositFeeCurrency),
    text(columns::CONVERSION_FROM_CURRENCY, TextTarget::ConversionFromCurrency),
    text(columns::CONVERSION_TO_CURRENCY, TextTarget::ConversionToCurrency),
    text(columns::CONVERSION_FEE_CURRENCY, TextTarget::ConversionFeeCurrency),
];

/// Optional numeric columns
pub const NUMERIC_FIELDS: &[NumericField] = &[
    numeric(columns::SHARES, NumericTarget::Shares),
    numeric(columns::PRICE_PER_SHARE, NumericTarget::PricePerShare),
    numeric(columns::EXCHANGE_RATE, NumericTarget::ExchangeRate),
    conditional(columns::RESULT, NumericTarget::Result),
    numeric(columns::TOTAL, NumericTarget::Total),
    numeric(columns::WITHHOLDING_TAX, NumericTarget::WithholdingTax),
    numeric(columns::CHARGE_AMOUNT, NumericTarget::ChargeAmount),
    numeric(columns::DEPOSIT_FEE, NumericTarget::DepositFee),
    conditional(columns::CONVERSION_FROM_AMOUNT, NumericTarget::ConversionFromAmount),
    conditional(columns::CONVERSION_TO_AMOUNT, NumericTarget::ConversionToAmount),
    numeric(columns::CONVERSION_FEE, NumericTarget::ConversionFee),
];

/// Column name to cell value mapping for a single row
///
/// Keys and values are trimmed. When a column name repeats, the last
/// occurrence wins.
#[derive(Debug)]
pub struct FieldMap<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> FieldMap<'a> {
    /// Pair header names with row cells
    ///
    /// The row is expected to be normalized to the header's length; extra
    /// cells on either side are ignored.
    pub fn new(header: &'a [String], row: &'a [String]) -> Self {
        let values = header
            .iter()
            .zip(row)
            .map(|(column, value)| (column.trim(), value.trim()))
            .collect();

        Self { values }
    }

    /// Whether the header has this column
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Raw trimmed value of a column, `None` if the header lacks it
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.values.get(column).copied()
    }

    /// Value of a column that must be present and non-empty
    pub fn required_text(&self, column: &str) -> Result<&'a str, ImportError> {
        match self.get(column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ImportError::required_field_missing(column)),
        }
    }

    /// Value of an optional text column; empty maps to `None`
    pub fn optional_text(&self, column: &str) -> Option<String> {
        self.get(column)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Value of an optional numeric column
    pub fn optional_number(&self, column: &str) -> Result<Option<f64>, ImportError> {
        match self.get(column) {
            Some(value) => parse_optional_number(column, value),
            None => Ok(None),
        }
    }

    /// Fill every optional attribute of `record` from the field tables
    ///
    /// Stops at the first unparseable numeric value; the caller discards the
    /// record in that case.
    pub fn apply_optional_fields(&self, record: &mut TransactionRecord) -> Result<(), ImportError> {
        for field in TEXT_FIELDS {
            *record.text_slot(field.target) = self.optional_text(field.column);
        }

        for field in NUMERIC_FIELDS {
            if field.conditional && !self.contains(field.column) {
                continue;
            }
            *record.numeric_slot(field.target) = self.optional_number(field.column)?;
        }

        Ok(())
    }
}

/// Parse a numeric cell, mapping the absence sentinels to `None`
pub fn parse_optional_number(column: &str, raw: &str) -> Result<Option<f64>, ImportError> {
    let value = raw.trim();
    if value.is_empty() || value == ZERO || value == NOT_AVAILABLE {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(Some(number)),
        _ => Err(ImportError::field_parse(column, value)),
    }
}
