//! The four pipeline stages composed into one run
//!
//! Each stage takes the output of the previous one and returns new tables;
//! nothing is shared between stages except through these values. Files are
//! written as soon as the stage producing them has finished.

use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;

use crate::algorithm::NamedTable;
use crate::algorithm::extraction::{CrossFiltered, cross_filter};
use crate::algorithm::statistics::{StatisticsReport, summarize};
use crate::algorithm::stratification::{StratifiedTable, stratify};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::error::util::{ensure_output_directory, safe_create_file};
use crate::loader::ingest_directory;
use crate::models::Sex;
use crate::utils::io::write_csv_file;
use crate::utils::logging::{log_step_start, log_table_summary};

/// Everything a pipeline run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Consolidated table of all sources
    pub consolidated: RecordBatch,
    /// Files the consolidated table was built from
    pub sources: Vec<PathBuf>,
    pub cross_filtered: CrossFiltered,
    /// Filtered tables sorted and split by sex, in output order
    pub stratified: Vec<StratifiedTable>,
    pub report: StatisticsReport,
    /// Every file written, in order
    pub written: Vec<PathBuf>,
}

/// Run ingestion, cross-filtering, stratification and statistics
///
/// The run aborts on the first failure; files written up to that point are
/// left in place.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;
    let start = Instant::now();
    let out_dir = config.output.output_dir.as_path();
    ensure_output_directory(out_dir)?;

    let mut written = Vec::new();

    // Stage 1: ingestion
    log_step_start("Ingesting sheets", &config.ingest.input_dir);
    let ingested = ingest_directory(&config.ingest)?;
    log_table_summary("consolidated", &ingested.table);
    written.push(persist(
        out_dir,
        &config.output.consolidated_file,
        &ingested.table,
    )?);

    // Stage 2: cross-filtering
    let cross_filtered = cross_filter(
        &ingested.table,
        &config.reference,
        &config.paired,
        config.validate_unique_requests,
    )?;
    for table in cross_filtered.tables() {
        written.push(persist_table(out_dir, table, "extracted")?);
    }

    // Stage 3: stratification
    let stratified = cross_filtered
        .tables()
        .into_iter()
        .map(|table| stratify(table, &config.male_code, &config.female_code))
        .collect::<Result<Vec<_>>>()?;
    for table in &stratified {
        for sex in Sex::ALL {
            written.push(persist(
                out_dir,
                &format!("{}.csv", table.stratum_name(sex)),
                table.strata.get(sex),
            )?);
        }
    }

    // Stage 4: statistics
    let report = summarize(&stratified, config)?;
    written.push(write_report(
        &out_dir.join(&config.output.report_file),
        &report,
    )?);

    info!(
        "Pipeline finished in {:?}, {} files written to {}",
        start.elapsed(),
        written.len(),
        out_dir.display()
    );

    Ok(PipelineOutput {
        consolidated: ingested.table,
        sources: ingested.sources,
        cross_filtered,
        stratified,
        report,
        written,
    })
}

fn persist(dir: &Path, file_name: &str, batch: &RecordBatch) -> Result<PathBuf> {
    let path = dir.join(file_name);
    write_csv_file(&path, batch, file_name)?;
    Ok(path)
}

fn persist_table(dir: &Path, table: &NamedTable, suffix: &str) -> Result<PathBuf> {
    persist(dir, &format!("{}_{suffix}.csv", table.name), &table.batch)
}

/// Write the statistics report as pretty-printed JSON
pub fn write_report(path: &Path, report: &StatisticsReport) -> Result<PathBuf> {
    let file = safe_create_file(path, "statistics report")?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(path.to_path_buf())
}
