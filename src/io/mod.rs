//! I/O module
//!
//! Turns brokerage CSV text into typed transactions, one row at a time.
//!
//! # Components
//!
//! - `reader` - Whole-file reading and CSV tokenisation
//! - `schema` - Header validation and format version detection
//! - `normalizer` - Field-count repair for data rows
//! - `fields` - Column lookup and typed extraction via declarative tables
//! - `decoder` - Row to `TransactionRecord` decoding
//! - `csv_format` - CSV export of the normalized stream

pub mod csv_format;
pub mod decoder;
pub mod fields;
pub mod normalizer;
pub mod reader;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use csv_format::write_transactions_csv;
pub use decoder::{decode_row, parse_time};
pub use fields::FieldMap;
pub use normalizer::{normalize_row, RawRow};
pub use reader::{read_file, read_rows, SourceRow};
pub use schema::{FormatVersion, Header};
