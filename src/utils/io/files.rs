//! Discovery of input tables on disk

use std::fs;
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use itertools::Itertools;

use crate::error::{PipelineError, Result};
use crate::utils::logging::{log_step_start, log_warning};

/// Tabular formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Detect the format of a file from its extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "parquet" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Find all files in a directory whose extension is one of `extensions`
///
/// The comparison is case-insensitive. Subdirectories are not searched.
/// Files are returned sorted by file name so that consolidation order does
/// not depend on the platform's directory listing order.
pub fn find_table_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    log_step_start("Searching for sheets", dir);

    let wanted: Vec<String> = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();

    let entries = fs::read_dir(dir)
        .map_err(|e| PipelineError::io(dir, "Failed to read input directory", e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| PipelineError::io(dir, "Failed to read directory entry", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| wanted.contains(&ext.to_ascii_lowercase()));
        if matches {
            files.push(path);
        }
    }

    let files = files
        .into_iter()
        .sorted_by(|a, b| a.file_name().cmp(&b.file_name()))
        .collect_vec();

    if files.is_empty() {
        log_warning("No table files found in directory", Some(dir));
    } else {
        log::info!("Found {} sheets in {}", files.len(), dir.display());
    }

    Ok(files)
}

/// Read one table file as text columns, dispatching on its extension
pub fn read_table_file(path: &Path) -> Result<RecordBatch> {
    match TableFormat::from_path(path) {
        Some(TableFormat::Csv) => super::read_csv_file(path),
        Some(TableFormat::Parquet) => super::read_parquet_file(path),
        None => Err(PipelineError::Config(format!(
            "Unsupported table file extension: {}",
            path.display()
        ))),
    }
}
