use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use arrow::array::{Array, StringArray};
use arrow::record_batch::RecordBatch;
use tempfile::TempDir;
use tft_pipeline::PipelineConfig;
use tft_pipeline::schema::REQUIRED_COLUMNS;

/// Header shared by every fixture sheet
pub const HEADER: &str = "RequestNumber,TestName,Gender,Result,TSH_result";

/// One laboratory row: request, test, gender, result, TSH result
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str);

/// Write a CSV sheet with the standard header
pub fn write_sheet(dir: &Path, file_name: &str, rows: &[Row<'_>]) -> PathBuf {
    let mut content = format!("{HEADER}\n");
    for (request, test, gender, result, tsh) in rows {
        content.push_str(&format!("{request},{test},{gender},{result},{tsh}\n"));
    }
    let path = dir.join(file_name);
    fs::write(&path, content).expect("failed to write fixture sheet");
    path
}

/// Temporary input and output directories with a matching configuration
pub struct Workspace {
    pub root: TempDir,
    pub config: PipelineConfig,
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("failed to create temp dir");
        let input = root.path().join("raw_tft_files");
        fs::create_dir_all(&input).expect("failed to create input dir");

        let mut config = PipelineConfig::default();
        config.ingest.input_dir = input;
        config.output.output_dir = root.path().join("out");
        Self { root, config }
    }

    #[must_use]
    pub fn input_dir(&self) -> &Path {
        &self.config.ingest.input_dir
    }

    #[must_use]
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.config.output.output_dir.join(name)
    }

    /// Workspace with two sheets covering TSH, FT4 and FT3
    #[must_use]
    pub fn with_sample_sheets() -> Self {
        let ws = Self::new();
        write_sheet(ws.input_dir(), "sheet1.csv", SHEET_ONE);
        write_sheet(ws.input_dir(), "sheet2.csv", SHEET_TWO);
        ws
    }
}

pub const SHEET_ONE: &[Row<'static>] = &[
    ("100", "TSH", "M", "5.0", "5.0"),
    ("100", "FT4", "M", "1.1", ""),
    ("200", "TSH", "F", "2.0", "2.0"),
    ("300", "TSH", "F", "0.3", "0.3"),
    ("300", "FT4", "F", "1.9", ""),
    ("300", "FT3 - THYROXINE FREE (T3)", "F", "4.1", ""),
    ("40", "TSH", "M", "4.78", "4.78"),
    ("40", "FT4", "M", "1.0", ""),
];

pub const SHEET_TWO: &[Row<'static>] = &[
    ("500", "TSH", "F", "1.2", "1.2"),
    ("500", "FT4", "F", "<0.5", ""),
    ("600", "TSH", "M", "0.55", "0.55"),
    ("600", "FT3 - THYROXINE FREE (T3)", "M", "5.2", ""),
    ("700", "FT4", "F", "1.4", ""),
    ("800", "TSH", "U", "3.1", "3.1"),
    ("800", "FT4", "U", "1.2", ""),
    ("900", "TSH", "M", "2.5", "2.5"),
    ("900", "FT4", "M", "1.3", ""),
    ("1000", "TSH", "F", "6.0", "6.0"),
    ("1000", "FT4", "F", "0.7", ""),
    ("1000", "FT3 - THYROXINE FREE (T3)", "F", "3.9", ""),
];

/// Value of every column of a row joined into one string, used to compare
/// rows across tables with possibly different column orders
#[must_use]
pub fn row_fingerprints(batch: &RecordBatch) -> Vec<String> {
    let columns: Vec<&StringArray> = REQUIRED_COLUMNS
        .iter()
        .map(|name| {
            batch
                .column_by_name(name)
                .and_then(|c| c.as_any().downcast_ref::<StringArray>())
                .expect("required text column")
        })
        .collect();

    (0..batch.num_rows())
        .map(|row| {
            columns
                .iter()
                .map(|c| if c.is_null(row) { "<null>" } else { c.value(row) })
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect()
}

/// Row fingerprints as a set
#[must_use]
pub fn fingerprint_set(batch: &RecordBatch) -> HashSet<String> {
    row_fingerprints(batch).into_iter().collect()
}

/// Text values of one column
#[must_use]
pub fn column_values(batch: &RecordBatch, name: &str) -> Vec<Option<String>> {
    let array = batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .expect("text column");
    array.iter().map(|v| v.map(str::to_string)).collect()
}
