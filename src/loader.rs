//! Ingestion and consolidation of the per-sheet exports
//!
//! Every table file in the input directory is read as text columns and the
//! results are concatenated row-wise into one consolidated table. Sources
//! with differing columns produce a superset schema in which absent columns
//! are null for that source's rows.

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::config::IngestConfig;
use crate::error::Result;
use crate::error::util::input_directory_available;
use crate::schema::{REQUIRED_COLUMNS, align_to_schema, required_schema, text_schema};
use crate::utils::io::{find_table_files, read_table_file};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_rows, log_warning,
};

/// Outcome of the ingestion stage
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Row-wise concatenation of every source
    pub table: RecordBatch,
    /// Files that were loaded, in consolidation order
    pub sources: Vec<PathBuf>,
}

impl IngestResult {
    fn empty() -> Self {
        Self {
            table: RecordBatch::new_empty(required_schema()),
            sources: Vec::new(),
        }
    }
}

/// Load every table file from the configured directory and consolidate them
///
/// A missing directory, or one without table files, yields an empty table
/// with the required columns and a warning rather than an error. A file that
/// is listed but cannot be read aborts the stage.
pub fn ingest_directory(config: &IngestConfig) -> Result<IngestResult> {
    let dir = config.input_dir.as_path();
    let start = Instant::now();

    if !input_directory_available(dir)? {
        log_warning("Input directory not found, continuing with an empty table", Some(dir));
        return Ok(IngestResult::empty());
    }

    let files = find_table_files(dir, &config.extensions)?;
    if files.is_empty() {
        return Ok(IngestResult::empty());
    }

    let batches = load_sources(&files)?;
    let table = consolidate(&batches)?;

    log_rows("consolidated", dir, table.num_rows(), Some(start.elapsed()));
    Ok(IngestResult {
        table,
        sources: files,
    })
}

/// Read each file in order, tracking progress
pub fn load_sources(files: &[PathBuf]) -> Result<Vec<RecordBatch>> {
    let pb = create_main_progress_bar(files.len() as u64, Some("Loading sheets"));

    let mut batches = Vec::with_capacity(files.len());
    for path in files {
        pb.set_message(file_label(path));
        batches.push(read_table_file(path)?);
        pb.inc(1);
    }

    finish_progress_bar(&pb, Some("Sheets loaded"));
    Ok(batches)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Concatenate text batches row-wise into a single table
///
/// The output schema lists every column in order of first appearance across
/// the inputs. Required columns that no input carries are appended as null
/// columns so that later stages can run and simply find no matching rows.
/// No deduplication is performed and row order is preserved.
pub fn consolidate(batches: &[RecordBatch]) -> Result<RecordBatch> {
    let mut names: Vec<String> = batches
        .iter()
        .flat_map(|batch| {
            batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect_vec()
        })
        .unique()
        .collect();

    for required in REQUIRED_COLUMNS {
        if !names.iter().any(|n| n == required) {
            log_warning(
                &format!("Column '{required}' not present in any source, filling with nulls"),
                None,
            );
            names.push(required.to_string());
        }
    }

    let schema = text_schema(names.iter().map(String::as_str));
    let aligned = batches
        .iter()
        .map(|batch| align_to_schema(batch, &schema))
        .collect::<Result<Vec<_>>>()?;

    Ok(concat_batches(&schema, &aligned)?)
}
