//! Transaction-related types for the brokerage export parser
//!
//! This module defines the canonical record produced for every accepted CSV
//! row, plus the open-ended action tag it carries.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Textual format used when a transaction time is written back out
pub const TIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Category of a transaction as reported by the brokerage
///
/// Stored as an opaque tag rather than an enum: the brokerage adds new action
/// names over time and an unknown action must not reject the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Action(String);

impl Action {
    pub const MARKET_BUY: &'static str = "Market buy";
    pub const DEPOSIT: &'static str = "Deposit";
    pub const WITHDRAWAL: &'static str = "Withdrawal";

    pub fn new(tag: impl Into<String>) -> Self {
        Action(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Any buy order type (market, limit, stop...)
    pub fn is_buy(&self) -> bool {
        self.0.ends_with(" buy")
    }

    /// Any sell order type (market, limit, stop...)
    pub fn is_sell(&self) -> bool {
        self.0.ends_with(" sell")
    }

    /// Dividend payments of any kind, e.g. `Dividend (Ordinary)`
    pub fn is_dividend(&self) -> bool {
        self.0.starts_with("Dividend")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One normalized transaction decoded from a brokerage export row
///
/// `action` and `time` are always present. Every other field is independently
/// optional: `None` means the export carried no value, which is distinct from
/// a parsed `Some(0.0)`.
///
/// Field order matches the CSV export header in `io::csv_format`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub action: Action,

    #[serde(serialize_with = "serialize_time")]
    pub time: DateTime<Utc>,

    // Identity
    pub isin: Option<String>,
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub notes: Option<String>,
    pub id: Option<String>,

    // Position
    pub shares: Option<f64>,
    pub price_per_share: Option<f64>,
    pub price_currency: Option<String>,
    pub exchange_rate: Option<f64>,

    /// Realized gain or loss, only reported by newer export formats
    pub result: Option<f64>,
    pub result_currency: Option<String>,

    pub total: Option<f64>,
    pub total_currency: Option<String>,

    pub withholding_tax: Option<f64>,
    pub withholding_tax_currency: Option<String>,

    pub charge_amount: Option<f64>,
    pub charge_amount_currency: Option<String>,

    pub deposit_fee: Option<f64>,
    pub deposit_fee_currency: Option<String>,

    // Currency conversion
    pub conversion_from_amount: Option<f64>,
    pub conversion_from_currency: Option<String>,
    pub conversion_to_amount: Option<f64>,
    pub conversion_to_currency: Option<String>,
    pub conversion_fee: Option<f64>,
    pub conversion_fee_currency: Option<String>,
}

impl TransactionRecord {
    /// Create a record with only the mandatory fields set
    pub fn new(action: Action, time: DateTime<Utc>) -> Self {
        TransactionRecord {
            action,
            time,
            isin: None,
            ticker: None,
            name: None,
            notes: None,
            id: None,
            shares: None,
            price_per_share: None,
            price_currency: None,
            exchange_rate: None,
            result: None,
            result_currency: None,
            total: None,
            total_currency: None,
            withholding_tax: None,
            withholding_tax_currency: None,
            charge_amount: None,
            charge_amount_currency: None,
            deposit_fee: None,
            deposit_fee_currency: None,
            conversion_from_amount: None,
            conversion_from_currency: None,
            conversion_to_amount: None,
            conversion_to_currency: None,
            conversion_fee: None,
            conversion_fee_currency: None,
        }
    }

    /// Mutable slot for an optional text attribute
    pub fn text_slot(&mut self, target: TextTarget) -> &mut Option<String> {
        match target {
            TextTarget::Isin => &mut self.isin,
            TextTarget::Ticker => &mut self.ticker,
            TextTarget::Name => &mut self.name,
            TextTarget::Notes => &mut self.notes,
            TextTarget::Id => &mut self.id,
            TextTarget::PriceCurrency => &mut self.price_currency,
            TextTarget::ResultCurrency => &mut self.result_currency,
            TextTarget::TotalCurrency => &mut self.total_currency,
            TextTarget::WithholdingTaxCurrency => &mut self.withholding_tax_currency,
            TextTarget::ChargeAmountCurrency => &mut self.charge_amount_currency,
            TextTarget::DepositFeeCurrency => &mut self.deposit_fee_currency,
            TextTarget::ConversionFromCurrency => &mut self.conversion_from_currency,
            TextTarget::ConversionToCurrency => &mut self.conversion_to_currency,
            TextTarget::ConversionFeeCurrency => &mut self.conversion_fee_currency,
        }
    }

    /// Mutable slot for an optional numeric attribute
    pub fn numeric_slot(&mut self, target: NumericTarget) -> &mut Option<f64> {
        match target {
            NumericTarget::Shares => &mut self.shares,
            NumericTarget::PricePerShare => &mut self.price_per_share,
            NumericTarget::ExchangeRate => &mut self.exchange_rate,
            NumericTarget::Result => &mut self.result,
            NumericTarget::Total => &mut self.total,
            NumericTarget::WithholdingTax => &mut self.withholding_tax,
            NumericTarget::ChargeAmount => &mut self.charge_amount,
            NumericTarget::DepositFee => &mut self.deposit_fee,
            NumericTarget::ConversionFromAmount => &mut self.conversion_from_amount,
            NumericTarget::ConversionToAmount => &mut self.conversion_to_amount,
            NumericTarget::ConversionFee => &mut self.conversion_fee,
        }
    }
}

/// Optional text attributes of a [`TransactionRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Isin,
    Ticker,
    Name,
    Notes,
    Id,
    PriceCurrency,
    ResultCurrency,
    TotalCurrency,
    WithholdingTaxCurrency,
    ChargeAmountCurrency,
    DepositFeeCurrency,
    ConversionFromCurrency,
    ConversionToCurrency,
    ConversionFeeCurrency,
}

/// Optional numeric attributes of a [`TransactionRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericTarget {
    Shares,
    PricePerShare,
    ExchangeRate,
    Result,
    Total,
    WithholdingTax,
    ChargeAmount,
    DepositFee,
    ConversionFromAmount,
    ConversionToAmount,
    ConversionFee,
}

fn serialize_time<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(TIME_OUTPUT_FORMAT))
}
