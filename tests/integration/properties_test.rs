use tft_pipeline::algorithm::stratification::split_by_sex;
use tft_pipeline::config::ClassificationConfig;
use tft_pipeline::filter::{BatchFilter, RequestFilter};
use tft_pipeline::schema::{GENDER, REQUEST_NUMBER, TSH_RESULT};
use tft_pipeline::utils::arrow::{coerce_numeric, get_column_by_name};
use tft_pipeline::{ThyroidStatus, classify, run};

use crate::utils::{Workspace, column_values, fingerprint_set, row_fingerprints};

/// Every filtered and stratified row is a row of the consolidated table
#[test]
fn test_outputs_are_row_subsets_of_consolidated() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let output = run(&ws.config)?;
    let consolidated = fingerprint_set(&output.consolidated);

    for table in &output.stratified {
        for batch in [
            &table.sorted.batch,
            &table.strata.male,
            &table.strata.female,
        ] {
            for row in row_fingerprints(batch) {
                assert!(consolidated.contains(&row), "{row} not in consolidated table");
            }
        }
    }
    Ok(())
}

/// Filtering a filtered table by its own partner changes nothing
#[test]
fn test_mutual_presence_filtering_is_idempotent() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let output = run(&ws.config)?;

    for pair in &output.cross_filtered.pairs {
        let by_reference = RequestFilter::from_reference(&pair.reference.batch, REQUEST_NUMBER)?;
        let again = by_reference.filter(&pair.paired.batch)?;
        assert_eq!(row_fingerprints(&again), row_fingerprints(&pair.paired.batch));

        let by_paired = RequestFilter::from_reference(&pair.paired.batch, REQUEST_NUMBER)?;
        let again = by_paired.filter(&pair.reference.batch)?;
        assert_eq!(row_fingerprints(&again), row_fingerprints(&pair.reference.batch));
    }
    Ok(())
}

/// Strata are disjoint and everything left out has another gender code
#[test]
fn test_sex_strata_partition_sorted_table() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let output = run(&ws.config)?;

    for table in &output.stratified {
        let male = fingerprint_set(&table.strata.male);
        let female = fingerprint_set(&table.strata.female);
        assert!(male.is_disjoint(&female));

        let sorted = fingerprint_set(&table.sorted.batch);
        assert!(male.is_subset(&sorted));
        assert!(female.is_subset(&sorted));

        let others = column_values(&table.sorted.batch, GENDER)
            .into_iter()
            .filter(|g| !matches!(g.as_deref(), Some("M" | "F")))
            .count();
        assert_eq!(others, table.strata.excluded);
        assert_eq!(
            male.len() + female.len() + table.strata.excluded,
            table.sorted.batch.num_rows()
        );
    }

    let repeated = split_by_sex(&output.stratified[0].strata.male, "M", "F")?;
    assert_eq!(repeated.female.num_rows(), 0);
    assert_eq!(repeated.excluded, 0);
    Ok(())
}

/// Each TSH value lands in exactly one category
#[test]
fn test_classification_is_a_partition() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let output = run(&ws.config)?;
    let config = ClassificationConfig::default();

    let column = get_column_by_name(&output.stratified[0].sorted.batch, TSH_RESULT)?;
    let values = coerce_numeric(&column)?;
    for value in values.iter().flatten() {
        let status = classify(value, &config);
        let named = [
            value > config.upper_threshold,
            value < config.lower_threshold,
            value > config.lower_threshold && value < config.upper_threshold,
        ];
        assert!(named.iter().filter(|hit| **hit).count() <= 1);
        if named.iter().any(|hit| *hit) {
            assert_ne!(status, ThyroidStatus::Unclassified);
        } else {
            assert_eq!(status, ThyroidStatus::Unclassified);
        }
    }
    Ok(())
}

/// Re-running on identical input gives identical tables
#[test]
fn test_rerun_is_deterministic() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let first = run(&ws.config)?;
    let second = run(&ws.config)?;

    assert_eq!(
        row_fingerprints(&first.consolidated),
        row_fingerprints(&second.consolidated)
    );
    for (a, b) in first.stratified.iter().zip(&second.stratified) {
        assert_eq!(row_fingerprints(&a.sorted.batch), row_fingerprints(&b.sorted.batch));
    }
    Ok(())
}
