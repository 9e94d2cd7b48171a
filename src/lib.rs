//! Thyroid function test (TSH, FT4, FT3) analysis pipeline.
//!
//! Laboratory exports are consolidated into one table, reference and paired
//! measurements are filtered to the requests that carry both, the filtered
//! tables are sorted and split by sex, and descriptive statistics, a clinical
//! classification of TSH values and male versus female t-tests are computed.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{BoundaryPolicy, MeasurementSpec, PipelineConfig, TTestVariant};
pub use error::{PipelineError, Result};
pub use models::{Sex, ThyroidStatus};
pub use pipeline::{PipelineOutput, run};

// Stage entry points
pub use algorithm::extraction::{CrossFiltered, cross_filter, extract_measurement};
pub use algorithm::statistics::{
    DescriptiveStats, StatisticsReport, TTestResult, ThyroidClassification, classify,
    summarize, two_sample_ttest,
};
pub use algorithm::stratification::{StratifiedTable, sort_by_request, split_by_sex, stratify};
pub use loader::{consolidate, ingest_directory};

// Arrow types
pub use arrow::record_batch::RecordBatch;
