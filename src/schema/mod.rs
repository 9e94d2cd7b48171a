//! Column layout of the laboratory exports
//!
//! Ingested tables are kept as nullable text columns; this module names the
//! columns the pipeline relies on and provides the helpers that bring an
//! arbitrary source schema into that shape.

use std::sync::Arc;

use arrow::array::{ArrayRef, new_null_array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::{PipelineError, Result};

/// Identifier shared by all tests ordered for one clinical request
pub const REQUEST_NUMBER: &str = "RequestNumber";
/// Name of the laboratory test
pub const TEST_NAME: &str = "TestName";
/// Sex of the patient
pub const GENDER: &str = "Gender";
/// Test result as reported by the laboratory (text, may hold sentinels)
pub const RESULT: &str = "Result";
/// Numeric TSH value used for clinical classification
pub const TSH_RESULT: &str = "TSH_result";

/// Columns every consolidated table carries
pub const REQUIRED_COLUMNS: [&str; 5] = [REQUEST_NUMBER, TEST_NAME, GENDER, RESULT, TSH_RESULT];

/// Schema holding only the required columns, all nullable text
#[must_use]
pub fn required_schema() -> SchemaRef {
    text_schema(REQUIRED_COLUMNS.iter().copied())
}

/// Build a schema of nullable `Utf8` fields with the given names
pub fn text_schema<'a>(names: impl IntoIterator<Item = &'a str>) -> SchemaRef {
    let fields: Vec<Field> = names
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Cast every column of a batch to nullable text
///
/// Parquet sources may carry typed columns; converting them keeps the
/// consolidated table uniform regardless of where a row came from.
pub fn to_text_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let already_text = schema
        .fields()
        .iter()
        .all(|f| f.data_type() == &DataType::Utf8 && f.is_nullable());
    if already_text {
        return Ok(batch.clone());
    }

    let columns: Vec<ArrayRef> = batch
        .columns()
        .iter()
        .map(|col| match col.data_type() {
            DataType::Utf8 => Ok(col.clone()),
            DataType::Null => Ok(new_null_array(&DataType::Utf8, col.len())),
            _ => cast(col, &DataType::Utf8),
        })
        .collect::<std::result::Result<_, _>>()?;

    let text = text_schema(schema.fields().iter().map(|f| f.name().as_str()));
    Ok(RecordBatch::try_new(text, columns)?)
}

/// Project a batch onto a wider schema, filling absent columns with nulls
///
/// Columns are matched by name. Every field of `target` must be nullable
/// text; the batch must already be text (see [`to_text_batch`]).
pub fn align_to_schema(batch: &RecordBatch, target: &SchemaRef) -> Result<RecordBatch> {
    let columns: Vec<ArrayRef> = target
        .fields()
        .iter()
        .map(|field| match batch.schema().index_of(field.name()) {
            Ok(idx) => batch.column(idx).clone(),
            Err(_) => new_null_array(field.data_type(), batch.num_rows()),
        })
        .collect();

    Ok(RecordBatch::try_new(target.clone(), columns)?)
}

/// Fail with a schema error unless every named column is present
pub fn ensure_columns(batch: &RecordBatch, columns: &[&str]) -> Result<()> {
    let schema = batch.schema();
    for column in columns {
        if schema.index_of(column).is_err() {
            return Err(PipelineError::column_not_found(column));
        }
    }
    Ok(())
}
