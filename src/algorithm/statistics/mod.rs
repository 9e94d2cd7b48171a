//! Statistical summary of the stratified tables
//!
//! This module provides descriptive statistics, the clinical classification
//! of TSH values, two-sample t-tests between sexes, and the report that ties
//! them together.

pub mod classification;
pub mod descriptive;
pub mod report;
pub mod ttest;

pub use classification::{StatusSummary, ThyroidClassification, classify};
pub use descriptive::DescriptiveStats;
pub use report::{SexComparison, StatisticsReport, SubsetSummary, summarize};
pub use ttest::{TTestResult, two_sample_ttest};
