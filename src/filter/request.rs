//! Request-number membership filtering
//!
//! Admits rows whose request number belongs to a reference set. This is a
//! membership test, not a join: no columns are brought over from the table
//! the set was derived from.
//!
//! Request numbers are compared in normalised form (see
//! [`normalize_request_number`]), so `"100"`, `" 100"` and `"0100"` name the
//! same request everywhere in the pipeline.

use std::collections::HashSet;

use arrow::array::{BooleanArray, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::utils::arrow::string_column;

/// Canonical form of a request number
///
/// Surrounding whitespace is removed and integer identifiers are rewritten
/// in canonical decimal form (no plus sign, no leading zeros). Other identifiers
/// are kept as trimmed text. Blank values are no identifier at all.
#[must_use]
pub fn normalize_request_number(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .parse::<i64>()
            .map_or_else(|_| trimmed.to_string(), |n| n.to_string()),
    )
}

/// Normalised request number of every row, `None` for missing values
pub fn normalized_request_numbers(batch: &RecordBatch, column: &str) -> Result<Vec<Option<String>>> {
    let ids = string_column(batch, column)?;
    Ok(ids
        .iter()
        .map(|value| value.and_then(normalize_request_number))
        .collect())
}

/// Collect the distinct request numbers of a table in normalised form
pub fn request_id_set(batch: &RecordBatch, column: &str) -> Result<HashSet<String>> {
    Ok(normalized_request_numbers(batch, column)?
        .into_iter()
        .flatten()
        .collect())
}

fn membership_mask(ids: &StringArray, request_ids: &HashSet<String>) -> BooleanArray {
    ids.iter()
        .map(|value| {
            Some(
                value
                    .and_then(normalize_request_number)
                    .is_some_and(|id| request_ids.contains(&id)),
            )
        })
        .collect()
}

/// A filter that includes only rows with a request number in a given set
#[derive(Debug, Clone)]
pub struct RequestFilter {
    /// Normalised request numbers to include
    request_ids: HashSet<String>,

    /// The name of the request number column
    column: String,
}

impl RequestFilter {
    /// Build a filter from the request numbers present in `reference`
    pub fn from_reference(reference: &RecordBatch, column: &str) -> Result<Self> {
        Ok(Self {
            request_ids: request_id_set(reference, column)?,
            column: column.to_string(),
        })
    }

    /// Number of request numbers admitted by this filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.request_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.request_ids.is_empty()
    }
}

impl BatchFilter for RequestFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let ids = string_column(batch, &self.column)?;
        let mask = membership_mask(&ids, &self.request_ids);
        filter_record_batch(batch, &mask)
    }
}
