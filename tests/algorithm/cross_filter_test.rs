use tft_pipeline::config::MeasurementSpec;
use tft_pipeline::schema::REQUEST_NUMBER;
use tft_pipeline::{consolidate, cross_filter};
use tft_pipeline::utils::io::read_csv_file;

use crate::utils::{Workspace, column_values, write_sheet};

fn ids(batch: &arrow::record_batch::RecordBatch) -> Vec<Option<String>> {
    column_values(batch, REQUEST_NUMBER)
}

#[test]
fn test_pair_survives_and_unmatched_reference_is_dropped() -> tft_pipeline::Result<()> {
    let ws = Workspace::new();
    let path = write_sheet(
        ws.input_dir(),
        "sheet.csv",
        &[
            ("100", "TSH", "M", "5.0", "5.0"),
            ("100", "FT4", "M", "1.1", ""),
            ("200", "TSH", "F", "2.0", "2.0"),
        ],
    );
    let table = consolidate(&[read_csv_file(&path)?])?;

    let filtered = cross_filter(
        &table,
        &MeasurementSpec::tsh(),
        &[MeasurementSpec::ft4()],
        true,
    )?;
    let pair = &filtered.pairs[0];
    assert_eq!(pair.reference.name, "TSH_for_FT4");
    assert_eq!(ids(&pair.reference.batch), vec![Some("100".to_string())]);
    assert_eq!(ids(&pair.paired.batch), vec![Some("100".to_string())]);
    assert_eq!(filtered.reference_rows.num_rows(), 2);
    Ok(())
}

#[test]
fn test_test_name_match_is_exact() -> tft_pipeline::Result<()> {
    let ws = Workspace::new();
    let path = write_sheet(
        ws.input_dir(),
        "sheet.csv",
        &[
            ("1", "TSH", "M", "1.0", "1.0"),
            ("1", "FT3", "M", "4.0", ""),
            ("1", "ft4", "M", "1.0", ""),
            ("2", "TSH", "F", "1.0", "1.0"),
            ("2", "FT3 - THYROXINE FREE (T3)", "F", "4.0", ""),
        ],
    );
    let table = consolidate(&[read_csv_file(&path)?])?;

    let filtered = cross_filter(
        &table,
        &MeasurementSpec::tsh(),
        &[MeasurementSpec::ft4(), MeasurementSpec::ft3()],
        true,
    )?;
    assert_eq!(filtered.pairs[0].paired.batch.num_rows(), 0);
    assert_eq!(filtered.pairs[0].reference.batch.num_rows(), 0);
    assert_eq!(ids(&filtered.pairs[1].paired.batch), vec![Some("2".to_string())]);
    assert_eq!(ids(&filtered.pairs[1].reference.batch), vec![Some("2".to_string())]);
    Ok(())
}

#[test]
fn test_request_numbers_match_across_formats() -> tft_pipeline::Result<()> {
    let ws = Workspace::new();
    let first = write_sheet(
        ws.input_dir(),
        "sheet1.csv",
        &[("100", "TSH", "M", "5.0", "5.0"), ("200", "TSH", "F", "2.0", "2.0")],
    );
    let second = write_sheet(
        ws.input_dir(),
        "sheet2.csv",
        &[
            (" 100", "FT4", "M", "1.1", ""),
            ("0100", "FT3 - THYROXINE FREE (T3)", "M", "4.2", ""),
            ("0200 ", "FT4", "F", "1.4", ""),
        ],
    );
    let table = consolidate(&[read_csv_file(&first)?, read_csv_file(&second)?])?;

    let filtered = cross_filter(
        &table,
        &MeasurementSpec::tsh(),
        &[MeasurementSpec::ft4(), MeasurementSpec::ft3()],
        true,
    )?;

    let ft4 = &filtered.pairs[0];
    assert_eq!(ft4.paired.batch.num_rows(), 2);
    assert_eq!(ft4.reference.batch.num_rows(), 2);

    let ft3 = &filtered.pairs[1];
    assert_eq!(ids(&ft3.paired.batch), vec![Some("0100".to_string())]);
    assert_eq!(ids(&ft3.reference.batch), vec![Some("100".to_string())]);
    Ok(())
}

#[test]
fn test_reformatted_duplicate_request_is_rejected() {
    let ws = Workspace::new();
    let path = write_sheet(
        ws.input_dir(),
        "sheet.csv",
        &[
            ("100", "TSH", "M", "5.0", "5.0"),
            ("0100", "TSH", "M", "5.1", "5.1"),
            ("100", "FT4", "M", "1.1", ""),
        ],
    );
    let table = consolidate(&[read_csv_file(&path).expect("read sheet")]).expect("consolidate");

    let result = cross_filter(&table, &MeasurementSpec::tsh(), &[MeasurementSpec::ft4()], true);
    assert!(matches!(
        result,
        Err(tft_pipeline::PipelineError::DuplicateRequestNumber { count: 2, .. })
    ));
}
