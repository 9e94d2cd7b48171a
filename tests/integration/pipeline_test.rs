use std::fs;

use tft_pipeline::schema::{GENDER, REQUEST_NUMBER, TEST_NAME};
use tft_pipeline::utils::io::read_csv_file;
use tft_pipeline::{PipelineError, ThyroidStatus, run};

use crate::utils::{Workspace, column_values, write_sheet};

fn ids(values: Vec<Option<String>>) -> Vec<String> {
    values.into_iter().map(|v| v.unwrap_or_default()).collect()
}

/// Run the whole pipeline on two sheets and check every output
#[test]
fn test_end_to_end_run() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let output = run(&ws.config)?;

    assert_eq!(output.sources.len(), 2);
    assert_eq!(output.consolidated.num_rows(), 20);

    let names: Vec<&str> = output
        .cross_filtered
        .tables()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["TSH_for_FT4", "FT4", "TSH_for_FT3", "FT3"]);

    let tsh_for_ft4 = &output.stratified[0];
    assert_eq!(
        ids(column_values(&tsh_for_ft4.sorted.batch, REQUEST_NUMBER)),
        vec!["40", "100", "300", "500", "800", "900", "1000"]
    );
    assert_eq!(tsh_for_ft4.strata.male.num_rows(), 3);
    assert_eq!(tsh_for_ft4.strata.female.num_rows(), 3);
    assert_eq!(tsh_for_ft4.strata.excluded, 1);

    // request 700 has FT4 but no TSH
    let ft4 = &output.stratified[1];
    assert_eq!(ft4.sorted.batch.num_rows(), 7);
    assert!(!ids(column_values(&ft4.sorted.batch, REQUEST_NUMBER)).contains(&"700".to_string()));

    assert_eq!(output.stratified[2].sorted.batch.num_rows(), 3);
    assert_eq!(output.stratified[3].sorted.batch.num_rows(), 3);

    // 1 consolidated + 4 extracted + 8 strata + report
    assert_eq!(output.written.len(), 14);
    for path in &output.written {
        assert!(path.is_file(), "missing output {}", path.display());
    }
    for name in [
        "TFT_DATA_PROCESSED.csv",
        "TSH_for_FT4_extracted.csv",
        "FT3_extracted.csv",
        "TSH_for_FT3_male.csv",
        "FT4_female.csv",
        "statistics_report.json",
    ] {
        assert!(ws.output_file(name).is_file(), "missing {name}");
    }

    Ok(())
}

#[test]
fn test_written_tables_match_in_memory_tables() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let output = run(&ws.config)?;

    let consolidated = read_csv_file(&ws.output_file("TFT_DATA_PROCESSED.csv"))?;
    assert_eq!(consolidated.num_rows(), output.consolidated.num_rows());

    let female = read_csv_file(&ws.output_file("FT4_female.csv"))?;
    assert_eq!(
        column_values(&female, REQUEST_NUMBER),
        column_values(&output.stratified[1].strata.female, REQUEST_NUMBER)
    );
    assert!(
        column_values(&female, GENDER)
            .iter()
            .all(|g| g.as_deref() == Some("F"))
    );

    let extracted = read_csv_file(&ws.output_file("FT3_extracted.csv"))?;
    assert!(
        column_values(&extracted, TEST_NAME)
            .iter()
            .all(|t| t.as_deref() == Some("FT3 - THYROXINE FREE (T3)"))
    );

    Ok(())
}

#[test]
fn test_report_contents() -> tft_pipeline::Result<()> {
    let ws = Workspace::with_sample_sheets();
    let report = run(&ws.config)?.report;

    let classes = &report.classifications[0];
    assert_eq!(classes.table, "TSH_for_FT4");
    assert_eq!(classes.count(ThyroidStatus::Hypothyroid), 2);
    assert_eq!(classes.count(ThyroidStatus::Hyperthyroid), 1);
    assert_eq!(classes.count(ThyroidStatus::Euthyroid), 3);
    // 4.78 sits on the upper threshold
    assert_eq!(classes.count(ThyroidStatus::Unclassified), 1);

    let ft4_female = report.subset("FT4_female").expect("FT4_female stats");
    assert_eq!(ft4_female.stats.count, 2);
    assert_eq!(ft4_female.dropped, 1);
    assert!((ft4_female.stats.mean - 1.3).abs() < 1e-12);

    assert!(report.comparison("FT4").expect("FT4 comparison").ttest.is_defined());
    // one male TSH value among the FT3 requests
    assert!(!report.comparison("TSH_for_FT3").expect("TSH_for_FT3").ttest.is_defined());

    let json: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(ws.output_file("statistics_report.json")).expect("report file"),
    )?;
    assert_eq!(json["comparisons"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["upper_threshold"], 4.78);

    Ok(())
}

#[test]
fn test_missing_input_directory_produces_empty_outputs() -> tft_pipeline::Result<()> {
    let mut ws = Workspace::new();
    ws.config.ingest.input_dir = ws.root.path().join("absent");

    let output = run(&ws.config)?;
    assert_eq!(output.consolidated.num_rows(), 0);
    assert!(output.stratified.iter().all(|t| t.sorted.batch.num_rows() == 0));
    assert!(output.report.comparisons.iter().all(|c| !c.ttest.is_defined()));
    assert!(ws.output_file("TSH_for_FT4_male.csv").is_file());

    Ok(())
}

#[test]
fn test_duplicate_request_numbers_fail_by_default() {
    let mut ws = Workspace::new();
    write_sheet(
        ws.input_dir(),
        "dupes.csv",
        &[
            ("100", "TSH", "M", "5.0", "5.0"),
            ("100", "TSH", "M", "5.1", "5.1"),
            ("100", "FT4", "M", "1.1", ""),
        ],
    );

    match run(&ws.config) {
        Err(PipelineError::DuplicateRequestNumber {
            request_number,
            count,
            ..
        }) => {
            assert_eq!(request_number, "100");
            assert_eq!(count, 2);
        }
        other => panic!("expected duplicate request error, got {other:?}"),
    }

    ws.config.validate_unique_requests = false;
    let output = run(&ws.config).expect("lenient run");
    assert_eq!(output.cross_filtered.pairs[0].reference.batch.num_rows(), 2);
}

#[test]
fn test_unwritable_output_is_fatal() {
    let mut ws = Workspace::with_sample_sheets();
    let blocker = ws.root.path().join("not_a_dir");
    fs::write(&blocker, "occupied").expect("write blocker file");
    ws.config.output.output_dir = blocker.join("out");

    assert!(matches!(run(&ws.config), Err(PipelineError::Io { .. })));
}
