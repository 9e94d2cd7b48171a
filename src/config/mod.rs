//! Configuration for the TFT pipeline.
//!
//! Every constant of the analysis (paths, test names, thresholds, gender
//! codes) lives here so that a run can be reproduced from a single JSON file.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::error::util::safe_read_to_string;

/// Test name of the reference measurement in the laboratory export
pub const TSH_TEST_NAME: &str = "TSH";
/// Test name of free thyroxine
pub const FT4_TEST_NAME: &str = "FT4";
/// Test name of free triiodothyronine as spelled in the laboratory export
pub const FT3_TEST_NAME: &str = "FT3 - THYROXINE FREE (T3)";

/// Upper TSH reference limit in mIU/L
pub const DEFAULT_UPPER_THRESHOLD: f64 = 4.78;
/// Lower TSH reference limit in mIU/L
pub const DEFAULT_LOWER_THRESHOLD: f64 = 0.55;

/// A measurement as it appears in the `TestName` column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementSpec {
    /// Short label used in output file names and reports
    pub label: String,
    /// Exact value of the `TestName` column
    pub test_name: String,
}

impl MeasurementSpec {
    #[must_use]
    pub fn new(label: impl Into<String>, test_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            test_name: test_name.into(),
        }
    }

    #[must_use]
    pub fn tsh() -> Self {
        Self::new("TSH", TSH_TEST_NAME)
    }

    #[must_use]
    pub fn ft4() -> Self {
        Self::new("FT4", FT4_TEST_NAME)
    }

    #[must_use]
    pub fn ft3() -> Self {
        Self::new("FT3", FT3_TEST_NAME)
    }
}

/// How TSH values lying exactly on a threshold are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// Strict comparisons everywhere; values on a threshold are unclassified
    #[default]
    Exclusive,
    /// Threshold values count as euthyroid (`lower <= v <= upper`)
    EuthyroidInclusive,
    /// Threshold values count as abnormal (`v >= upper`, `v <= lower`)
    AbnormalInclusive,
}

/// Which two-sample t-test to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TTestVariant {
    /// Pooled-variance Student's t-test
    #[default]
    Student,
    /// Welch's unequal-variance t-test
    Welch,
}

/// Configuration for the ingestion stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory holding the per-sheet exports
    pub input_dir: PathBuf,
    /// File extensions (without dot, case-insensitive) that are loaded
    pub extensions: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("raw_tft_files"),
            extensions: vec!["csv".to_string(), "parquet".to_string()],
        }
    }
}

/// Configuration for the clinical classification of TSH values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Column holding the numeric TSH value
    pub column: String,
    /// Values above this are hypothyroid
    pub upper_threshold: f64,
    /// Values below this are hyperthyroid
    pub lower_threshold: f64,
    /// Treatment of values lying exactly on a threshold
    pub boundary_policy: BoundaryPolicy,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            column: crate::schema::TSH_RESULT.to_string(),
            upper_threshold: DEFAULT_UPPER_THRESHOLD,
            lower_threshold: DEFAULT_LOWER_THRESHOLD,
            boundary_policy: BoundaryPolicy::default(),
        }
    }
}

/// Configuration for the statistics stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Column compared between sexes
    pub value_column: String,
    pub t_test: TTestVariant,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            value_column: crate::schema::RESULT.to_string(),
            t_test: TTestVariant::default(),
        }
    }
}

/// Configuration for persisted outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving every output file
    pub output_dir: PathBuf,
    /// File name of the consolidated table
    pub consolidated_file: String,
    /// File name of the JSON statistics report
    pub report_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            consolidated_file: "TFT_DATA_PROCESSED.csv".to_string(),
            report_file: "statistics_report.json".to_string(),
        }
    }
}

/// Configuration for a complete pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub ingest: IngestConfig,
    /// Measurement every paired measurement is aligned to
    pub reference: MeasurementSpec,
    /// Measurements paired with the reference by request number
    pub paired: Vec<MeasurementSpec>,
    /// `Gender` value selecting the male subset
    pub male_code: String,
    /// `Gender` value selecting the female subset
    pub female_code: String,
    /// Fail when a request number repeats within one measurement
    pub validate_unique_requests: bool,
    pub classification: ClassificationConfig,
    pub statistics: StatisticsConfig,
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ingest: IngestConfig::default(),
            reference: MeasurementSpec::tsh(),
            paired: vec![MeasurementSpec::ft4(), MeasurementSpec::ft3()],
            male_code: "M".to_string(),
            female_code: "F".to_string(),
            validate_unique_requests: true,
            classification: ClassificationConfig::default(),
            statistics: StatisticsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "pipeline configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values that cannot produce a sound run
    pub fn validate(&self) -> Result<()> {
        let c = &self.classification;
        if !c.lower_threshold.is_finite() || !c.upper_threshold.is_finite() {
            return Err(PipelineError::Config(
                "Classification thresholds must be finite".to_string(),
            ));
        }
        if c.lower_threshold >= c.upper_threshold {
            return Err(PipelineError::Config(format!(
                "Lower threshold ({}) must be below upper threshold ({})",
                c.lower_threshold, c.upper_threshold
            )));
        }

        if self.paired.is_empty() {
            return Err(PipelineError::Config(
                "At least one paired measurement is required".to_string(),
            ));
        }

        let mut labels = vec![self.reference.label.as_str()];
        labels.extend(self.paired.iter().map(|m| m.label.as_str()));
        if labels.iter().any(|l| l.trim().is_empty()) {
            return Err(PipelineError::Config(
                "Measurement labels must not be empty".to_string(),
            ));
        }
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() != labels.len() {
            return Err(PipelineError::Config(format!(
                "Measurement labels must be distinct: {labels:?}"
            )));
        }

        if self.male_code == self.female_code {
            return Err(PipelineError::Config(format!(
                "Male and female gender codes must differ (both '{}')",
                self.male_code
            )));
        }

        if self.ingest.extensions.is_empty() {
            return Err(PipelineError::Config(
                "At least one input file extension is required".to_string(),
            ));
        }

        Ok(())
    }
}
