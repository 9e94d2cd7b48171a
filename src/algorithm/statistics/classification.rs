//! Clinical classification of TSH values
//!
//! A TSH value above the upper reference limit indicates hypothyroidism,
//! below the lower limit hyperthyroidism, and in between a euthyroid state.
//! Values lying exactly on a limit are placed according to the configured
//! [`BoundaryPolicy`].

use arrow::array::Array;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::algorithm::statistics::descriptive::DescriptiveStats;
use crate::config::{BoundaryPolicy, ClassificationConfig};
use crate::error::Result;
use crate::models::ThyroidStatus;
use crate::utils::arrow::{coerce_numeric, get_column_by_name};

/// Classify a single TSH value
///
/// Every finite value maps to exactly one status. Under the exclusive
/// policy a value equal to either threshold is [`ThyroidStatus::Unclassified`].
#[must_use]
pub fn classify(value: f64, config: &ClassificationConfig) -> ThyroidStatus {
    let (lower, upper) = (config.lower_threshold, config.upper_threshold);

    if value > upper {
        return ThyroidStatus::Hypothyroid;
    }
    if value < lower {
        return ThyroidStatus::Hyperthyroid;
    }
    if value > lower && value < upper {
        return ThyroidStatus::Euthyroid;
    }

    // value sits on a threshold
    match config.boundary_policy {
        BoundaryPolicy::Exclusive => ThyroidStatus::Unclassified,
        BoundaryPolicy::EuthyroidInclusive => ThyroidStatus::Euthyroid,
        BoundaryPolicy::AbnormalInclusive if value >= upper => ThyroidStatus::Hypothyroid,
        BoundaryPolicy::AbnormalInclusive => ThyroidStatus::Hyperthyroid,
    }
}

/// Size and TSH distribution of one clinical category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub status: ThyroidStatus,
    pub count: usize,
    pub stats: DescriptiveStats,
}

/// Clinical breakdown of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThyroidClassification {
    /// Name of the classified table
    pub table: String,
    /// One entry per status, in [`ThyroidStatus::ALL`] order
    pub buckets: Vec<StatusSummary>,
    /// Rows without a numeric TSH value
    pub dropped: usize,
}

impl ThyroidClassification {
    /// Classify the rows of a table and describe each category
    pub fn from_batch(
        table: impl Into<String>,
        batch: &RecordBatch,
        config: &ClassificationConfig,
    ) -> Result<Self> {
        let column = get_column_by_name(batch, &config.column)?;
        let values = coerce_numeric(&column)?;

        let mut grouped: Vec<Vec<f64>> = vec![Vec::new(); ThyroidStatus::ALL.len()];
        for value in values.iter().flatten() {
            let status = classify(value, config);
            grouped[status_index(status)].push(value);
        }

        let buckets = ThyroidStatus::ALL
            .iter()
            .zip(grouped)
            .map(|(&status, values)| StatusSummary {
                status,
                count: values.len(),
                stats: DescriptiveStats::from_values(&values),
            })
            .collect();

        Ok(Self {
            table: table.into(),
            buckets,
            dropped: values.null_count(),
        })
    }

    /// Summary of one category
    #[must_use]
    pub fn bucket(&self, status: ThyroidStatus) -> Option<&StatusSummary> {
        self.buckets.iter().find(|b| b.status == status)
    }

    /// Number of rows in one category
    #[must_use]
    pub fn count(&self, status: ThyroidStatus) -> usize {
        self.bucket(status).map_or(0, |b| b.count)
    }

    /// Number of classified rows, boundary values included
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

fn status_index(status: ThyroidStatus) -> usize {
    ThyroidStatus::ALL
        .iter()
        .position(|s| *s == status)
        .unwrap_or(ThyroidStatus::ALL.len() - 1)
}
