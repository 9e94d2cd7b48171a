//! Parquet input

use std::path::Path;
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::schema::to_text_batch;
use crate::utils::io::DEFAULT_BATCH_SIZE;
use crate::utils::logging::{log_rows, log_step_start};

/// Read a Parquet file into a single record batch of text columns
///
/// Typed columns are cast to text so Parquet exports consolidate with CSV
/// exports of the same sheet.
pub fn read_parquet_file(path: &Path) -> Result<RecordBatch> {
    let start = Instant::now();
    log_step_start("Reading parquet sheet", path);

    let file = safe_open_file(path, "Parquet records")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(DEFAULT_BATCH_SIZE).build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;
    let batch = to_text_batch(&batch)?;

    log_rows("read", path, batch.num_rows(), Some(start.elapsed()));
    Ok(batch)
}
