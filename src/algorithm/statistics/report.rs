//! Statistics report over all stratified tables

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;

use crate::algorithm::TableRole;
use crate::algorithm::statistics::classification::ThyroidClassification;
use crate::algorithm::statistics::descriptive::DescriptiveStats;
use crate::algorithm::statistics::ttest::{TTestResult, two_sample_ttest};
use crate::algorithm::stratification::StratifiedTable;
use crate::config::{BoundaryPolicy, PipelineConfig, TTestVariant};
use crate::error::Result;
use crate::models::{Sex, ThyroidStatus};
use crate::utils::arrow::numeric_values;

/// Descriptive statistics of one sex stratum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetSummary {
    /// Output name of the stratum, e.g. `FT4_male`
    pub table: String,
    pub sex: Sex,
    pub column: String,
    pub stats: DescriptiveStats,
    /// Rows whose value was missing or not numeric
    pub dropped: usize,
}

/// Male versus female comparison of one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SexComparison {
    pub table: String,
    pub measurement: String,
    /// Sample `a` is male, sample `b` female
    pub ttest: TTestResult,
}

/// Everything the statistics stage computes
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub generated_at: DateTime<Local>,
    pub upper_threshold: f64,
    pub lower_threshold: f64,
    pub boundary_policy: BoundaryPolicy,
    pub t_test: TTestVariant,
    pub subsets: Vec<SubsetSummary>,
    pub classifications: Vec<ThyroidClassification>,
    pub comparisons: Vec<SexComparison>,
}

/// Describe, classify and compare the stratified tables
///
/// Every stratum gets descriptive statistics of the value column, reference
/// tables additionally get the clinical classification of their TSH values,
/// and each table gets one male versus female t-test.
pub fn summarize(tables: &[StratifiedTable], config: &PipelineConfig) -> Result<StatisticsReport> {
    let value_column = config.statistics.value_column.as_str();

    let mut subsets = Vec::with_capacity(tables.len() * Sex::ALL.len());
    let mut classifications = Vec::new();
    let mut comparisons = Vec::with_capacity(tables.len());

    for table in tables {
        let male = numeric_values(table.strata.get(Sex::Male), value_column)?;
        let female = numeric_values(table.strata.get(Sex::Female), value_column)?;

        for (sex, column) in [(Sex::Male, &male), (Sex::Female, &female)] {
            subsets.push(SubsetSummary {
                table: table.stratum_name(sex),
                sex,
                column: value_column.to_string(),
                stats: DescriptiveStats::from_values(&column.values),
                dropped: column.dropped,
            });
        }

        if table.sorted.role == TableRole::Reference {
            classifications.push(ThyroidClassification::from_batch(
                &table.sorted.name,
                &table.sorted.batch,
                &config.classification,
            )?);
        }

        let ttest = two_sample_ttest(&male.values, &female.values, config.statistics.t_test)?;
        info!(
            "{}: t = {:.4}, p = {:.4} ({} male, {} female)",
            table.sorted.name, ttest.statistic, ttest.p_value, ttest.n_a, ttest.n_b
        );
        comparisons.push(SexComparison {
            table: table.sorted.name.clone(),
            measurement: table.sorted.measurement.clone(),
            ttest,
        });
    }

    Ok(StatisticsReport {
        generated_at: Local::now(),
        upper_threshold: config.classification.upper_threshold,
        lower_threshold: config.classification.lower_threshold,
        boundary_policy: config.classification.boundary_policy,
        t_test: config.statistics.t_test,
        subsets,
        classifications,
        comparisons,
    })
}

impl StatisticsReport {
    /// Find the comparison of a table by name
    #[must_use]
    pub fn comparison(&self, table: &str) -> Option<&SexComparison> {
        self.comparisons.iter().find(|c| c.table == table)
    }

    /// Find the statistics of a stratum by name
    #[must_use]
    pub fn subset(&self, table: &str) -> Option<&SubsetSummary> {
        self.subsets.iter().find(|s| s.table == table)
    }

    /// Human readable rendering of the report
    #[must_use]
    pub fn render(&self) -> String {
        let mut summary = String::new();
        summary.push_str("TFT Statistics Summary:\n");
        let _ = writeln!(summary, "  Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(
            summary,
            "  TSH thresholds: {} / {} ({:?} boundaries)",
            self.lower_threshold, self.upper_threshold, self.boundary_policy
        );

        summary.push_str("\nDescriptive Statistics:\n");
        for subset in &self.subsets {
            let _ = writeln!(summary, "  {}: {}", subset.table, subset.stats);
            if subset.dropped > 0 {
                let _ = writeln!(summary, "    ({} non-numeric values omitted)", subset.dropped);
            }
        }

        for classification in &self.classifications {
            let _ = writeln!(summary, "\nClinical Classification ({}):", classification.table);
            let total = classification.total();
            for bucket in &classification.buckets {
                if bucket.status == ThyroidStatus::Unclassified && bucket.count == 0 {
                    continue;
                }
                let percentage = if total > 0 {
                    (bucket.count as f64 / total as f64) * 100.0
                } else {
                    0.0
                };
                let _ = writeln!(
                    summary,
                    "  {}: {} ({percentage:.1}%)",
                    bucket.status, bucket.count
                );
            }
        }

        let _ = writeln!(summary, "\nSex Comparison ({:?} t-test):", self.t_test);
        for comparison in &self.comparisons {
            let t = &comparison.ttest;
            if t.is_defined() {
                let _ = writeln!(
                    summary,
                    "  {}: t = {:.4}, p = {:.4}, df = {:.1}",
                    comparison.table, t.statistic, t.p_value, t.degrees_of_freedom
                );
            } else {
                let _ = writeln!(
                    summary,
                    "  {}: not enough data ({} male, {} female)",
                    comparison.table, t.n_a, t.n_b
                );
            }
        }

        summary
    }
}
