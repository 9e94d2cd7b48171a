//! CSV reading and writing
//!
//! Input files are read with every column as nullable text; the header line
//! provides the column names. Output files always carry a header and never an
//! index column.

use std::path::Path;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::csv::reader::Format;
use arrow::csv::{ReaderBuilder, WriterBuilder};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::error::util::{safe_create_file, safe_open_file};
use crate::schema::text_schema;
use crate::utils::io::DEFAULT_BATCH_SIZE;
use crate::utils::logging::{log_rows, log_step_start};

/// Read a CSV file into a single record batch of text columns
///
/// Rows with fewer fields than the header are padded with nulls.
pub fn read_csv_file(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    log_step_start("Reading CSV sheet", path);

    // Only the header is needed; column types are fixed to text below.
    let header_file = safe_open_file(path, "CSV header")?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(header_file, Some(1))?;
    let schema = text_schema(inferred.fields().iter().map(|f| f.name().as_str()));

    let file = safe_open_file(path, "CSV records")?;
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_truncated_rows(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    log_rows("read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}

/// Write a record batch to a CSV file with a header row
///
/// # Arguments
/// * `path` - Destination file; created or truncated
/// * `batch` - Table to write
/// * `purpose` - Name of the table, used in error messages
pub fn write_csv_file(path: &Path, batch: &RecordBatch, purpose: &str) -> Result<()> {
    let file = safe_create_file(path, purpose)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;

    log_rows("wrote", path, batch.num_rows(), None);
    Ok(())
}
