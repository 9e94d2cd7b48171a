//! Request-number uniqueness checks
//!
//! Pairing by request number assumes that within one measurement a request
//! number identifies a single record. When it does not, records from
//! unrelated samples could end up aligned with each other.

use std::collections::HashMap;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use log::warn;

use crate::error::{PipelineError, Result};
use crate::filter::normalized_request_numbers;
use crate::schema::REQUEST_NUMBER;

/// Request numbers that occur more than once, with their counts
///
/// Identifiers are compared in normalised form, so `"7"` and `"007"` collide.
/// Sorted by normalised request number. Missing request numbers are ignored.
pub fn find_duplicate_requests(batch: &RecordBatch) -> Result<Vec<(String, usize)>> {
    let ids = normalized_request_numbers(batch, REQUEST_NUMBER)?;

    let mut counts: HashMap<String, usize> = HashMap::with_capacity(batch.num_rows());
    for id in ids.into_iter().flatten() {
        *counts.entry(id).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .sorted()
        .collect())
}

/// Check that no request number repeats within a measurement table
///
/// With `strict` set the first duplicate is returned as an error; otherwise
/// every duplicate is logged and the check passes.
pub fn check_unique_requests(batch: &RecordBatch, measurement: &str, strict: bool) -> Result<()> {
    let duplicates = find_duplicate_requests(batch)?;
    let Some((request_number, count)) = duplicates.first() else {
        return Ok(());
    };

    if strict {
        return Err(PipelineError::DuplicateRequestNumber {
            measurement: measurement.to_string(),
            request_number: request_number.clone(),
            count: *count,
        });
    }

    warn!(
        "{} request numbers occur more than once in {measurement} records; pairing may be ambiguous",
        duplicates.len()
    );
    for (id, count) in &duplicates {
        warn!("  {measurement} request number '{id}' occurs {count} times");
    }
    Ok(())
}
