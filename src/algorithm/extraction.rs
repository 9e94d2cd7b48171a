//! Measurement extraction and mutual-presence filtering
//!
//! The consolidated table is split by `TestName`. Paired measurements are
//! restricted to requests that also have a reference row, and for every
//! paired measurement a separate copy of the reference rows is restricted to
//! the requests that survived on the paired side. A request therefore only
//! appears in a pair when both measurements exist for it.

use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;

use crate::algorithm::validation::check_unique_requests;
use crate::algorithm::{NamedTable, TableRole};
use crate::config::MeasurementSpec;
use crate::error::Result;
use crate::filter::{BatchFilter, Expr, ExpressionFilter, RequestFilter};
use crate::schema::{REQUEST_NUMBER, TEST_NAME, ensure_columns};

/// Keep the rows whose `TestName` equals `test_name` exactly
pub fn extract_measurement(table: &RecordBatch, test_name: &str) -> Result<RecordBatch> {
    ExpressionFilter::new(Expr::eq(TEST_NAME, test_name)).filter(table)
}

/// A paired measurement and the reference rows aligned to it
#[derive(Debug, Clone)]
pub struct MeasurementPair {
    pub measurement: MeasurementSpec,
    /// Reference rows whose request has a row of this measurement
    pub reference: NamedTable,
    /// Rows of this measurement whose request has a reference row
    pub paired: NamedTable,
}

/// Output of the cross-filtering stage
#[derive(Debug, Clone)]
pub struct CrossFiltered {
    pub reference: MeasurementSpec,
    /// Every reference row, before alignment
    pub reference_rows: RecordBatch,
    pub pairs: Vec<MeasurementPair>,
}

impl CrossFiltered {
    /// All filtered tables, each reference-aligned table followed by its pair
    #[must_use]
    pub fn tables(&self) -> Vec<&NamedTable> {
        self.pairs
            .iter()
            .flat_map(|pair| [&pair.reference, &pair.paired])
            .collect()
    }
}

/// Name of the reference table aligned to `measurement`
#[must_use]
pub fn reference_table_name(reference: &MeasurementSpec, measurement: &MeasurementSpec) -> String {
    format!("{}_for_{}", reference.label, measurement.label)
}

/// Run mutual-presence filtering for every paired measurement
///
/// # Arguments
/// * `table` - The consolidated table
/// * `reference` - Measurement every pair is aligned to
/// * `paired` - Measurements to pair with the reference
/// * `strict_unique` - Fail when a request number repeats within a measurement
pub fn cross_filter(
    table: &RecordBatch,
    reference: &MeasurementSpec,
    paired: &[MeasurementSpec],
    strict_unique: bool,
) -> Result<CrossFiltered> {
    let start = Instant::now();
    ensure_columns(table, &[REQUEST_NUMBER, TEST_NAME])?;

    let reference_rows = extract_measurement(table, &reference.test_name)?;
    check_unique_requests(&reference_rows, &reference.label, strict_unique)?;
    let reference_filter = RequestFilter::from_reference(&reference_rows, REQUEST_NUMBER)?;
    info!(
        "Extracted {} {} rows covering {} requests",
        reference_rows.num_rows(),
        reference.label,
        reference_filter.len()
    );

    let mut pairs = Vec::with_capacity(paired.len());
    for measurement in paired {
        let rows = extract_measurement(table, &measurement.test_name)?;
        check_unique_requests(&rows, &measurement.label, strict_unique)?;

        let paired_rows = reference_filter.filter(&rows)?;
        let aligned_filter = RequestFilter::from_reference(&paired_rows, REQUEST_NUMBER)?;
        let aligned_reference = aligned_filter.filter(&reference_rows)?;

        info!(
            "{}: {} of {} rows have a {} row; {} {} rows aligned",
            measurement.label,
            paired_rows.num_rows(),
            rows.num_rows(),
            reference.label,
            aligned_reference.num_rows(),
            reference.label
        );

        pairs.push(MeasurementPair {
            measurement: measurement.clone(),
            reference: NamedTable::new(
                reference_table_name(reference, measurement),
                reference.label.clone(),
                TableRole::Reference,
                aligned_reference,
            ),
            paired: NamedTable::new(
                measurement.label.clone(),
                measurement.label.clone(),
                TableRole::Paired,
                paired_rows,
            ),
        });
    }

    info!("Cross-filtering finished in {:?}", start.elapsed());
    Ok(CrossFiltered {
        reference: reference.clone(),
        reference_rows,
        pairs,
    })
}
