//! Numeric coercion of result columns
//!
//! Laboratory results arrive as text and may contain sentinels such as
//! `"<0.01"` or `"see comment"`. Coercion turns every value that parses as a
//! finite number into `f64` and every other value into null; it never fails
//! because of the content of a column.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{PipelineError, Result};
use crate::utils::arrow::array_utils::get_column_by_name;

/// Coerce an array to `Float64`, turning unparseable values into nulls
///
/// Text is trimmed before parsing. NaN and infinities count as missing.
/// Applying the coercion to its own output returns an identical array.
pub fn coerce_numeric(array: &ArrayRef) -> Result<Float64Array> {
    match array.data_type() {
        DataType::Float64 => {
            let floats = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| PipelineError::Schema("Failed to downcast Float64 array".into()))?;
            Ok(finite_only(floats.iter()))
        }
        DataType::Utf8 => {
            let text = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| PipelineError::Schema("Failed to downcast string array".into()))?;
            Ok(finite_only(
                text.iter()
                    .map(|value| value.and_then(|s| s.trim().parse::<f64>().ok())),
            ))
        }
        DataType::Null => Ok(Float64Array::new_null(array.len())),
        dt if dt.is_numeric() => {
            let converted = cast(array, &DataType::Float64)?;
            coerce_numeric(&converted)
        }
        other => Err(PipelineError::Schema(format!(
            "Cannot coerce a {other} column to numbers"
        ))),
    }
}

fn finite_only(values: impl Iterator<Item = Option<f64>>) -> Float64Array {
    values
        .map(|v| v.filter(|x| x.is_finite()))
        .collect::<Float64Array>()
}

/// Numeric values of one column with the count of rows that had none
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericColumn {
    /// Values in row order, missing and unparseable entries removed
    pub values: Vec<f64>,
    /// Rows whose value was missing or not numeric
    pub dropped: usize,
}

/// Coerce a named column and keep only its numeric values
pub fn numeric_values(batch: &RecordBatch, column_name: &str) -> Result<NumericColumn> {
    let column = get_column_by_name(batch, column_name)?;
    let coerced = coerce_numeric(&column)?;
    let values: Vec<f64> = coerced.iter().flatten().collect();
    let dropped = coerced.len() - values.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} non-numeric values from column '{column_name}'");
    }
    Ok(NumericColumn { values, dropped })
}
