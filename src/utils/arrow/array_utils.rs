//! Utilities for working with Arrow arrays.
//!
//! This module provides utility functions for safely extracting columns from
//! record batches with descriptive errors.

use arrow::array::{Array, ArrayRef, StringArray};
use arrow::record_batch::RecordBatch;

use crate::error::{PipelineError, Result};

/// Downcast a column to a specific array type with clear error messages
///
/// # Arguments
///
/// * `array` - The array reference to downcast
/// * `column_name` - The name of the column (for error messages)
/// * `expected_type_name` - A human-readable name of the expected type (for error messages)
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| PipelineError::column_type(column_name, expected_type_name))
}

/// Get a column by name from a record batch
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(column_name)
        .map_err(|_| PipelineError::column_not_found(column_name))?;
    Ok(batch.column(idx).clone())
}

/// Get a text column by name
///
/// The returned array is owned, so it can outlive the borrow of `batch`.
pub fn string_column(batch: &RecordBatch, column_name: &str) -> Result<StringArray> {
    let column = get_column_by_name(batch, column_name)?;
    Ok(downcast_array::<StringArray>(&column, column_name, "string")?.clone())
}
