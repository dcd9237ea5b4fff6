//! Field-count repair for data rows
//!
//! Some export variants omit trailing optional cells or append stray ones.
//! Rows close to the header's length are padded or truncated; rows far off are
//! rejected because they almost certainly belong to different data.

use crate::types::ImportError;
use tracing::debug;

/// One CSV line as read, before any typing
pub type RawRow = Vec<String>;

/// Bring `row` to exactly `header_len` fields
///
/// A row is repairable when its length `r` satisfies `header_len / 2 < r <
/// 2 * header_len`. Short rows are right-padded with empty cells, long rows
/// lose their trailing cells.
///
/// # Errors
///
/// `SevereMismatch` when the row is outside the repairable window.
pub fn normalize_row(header_len: usize, mut row: RawRow) -> Result<RawRow, ImportError> {
    let actual = row.len();
    if actual == header_len {
        return Ok(row);
    }

    if 2 * actual <= header_len || actual >= 2 * header_len {
        return Err(ImportError::SevereMismatch {
            expected: header_len,
            actual,
        });
    }

    debug!(expected = header_len, actual, "Repairing row field count");
    row.resize(header_len, String::new());
    Ok(row)
}
