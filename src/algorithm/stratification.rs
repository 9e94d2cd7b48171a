//! Sorting by request number and splitting by sex
//!
//! Filtered tables are sorted so that the tables of a pair line up row by row
//! for a later manual alignment step, then split into male and female
//! subsets. Rows whose `Gender` is neither configured code are left out of
//! both subsets.

use arrow::array::UInt32Array;
use arrow::compute::take_record_batch;
use arrow::record_batch::RecordBatch;
use log::info;

use crate::algorithm::NamedTable;
use crate::error::Result;
use crate::filter::{BatchFilter, Expr, ExpressionFilter};
use crate::models::Sex;
use crate::schema::{GENDER, REQUEST_NUMBER};
use crate::utils::arrow::string_column;

/// Sort key of a request number
///
/// Integer identifiers compare numerically and come first, other identifiers
/// compare as trimmed text, and missing or blank identifiers come last. Two
/// values get equal keys exactly when
/// [`normalize_request_number`](crate::filter::normalize_request_number)
/// maps them to the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RequestKey<'a> {
    Numeric(i64),
    Text(&'a str),
    Missing,
}

impl<'a> RequestKey<'a> {
    fn of(value: Option<&'a str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::Missing,
            Some(text) => text.parse::<i64>().map_or(Self::Text(text), Self::Numeric),
        }
    }
}

/// Sort a table by request number, ascending and stable
pub fn sort_by_request(batch: &RecordBatch) -> Result<RecordBatch> {
    let ids = string_column(batch, REQUEST_NUMBER)?;
    let keys: Vec<RequestKey<'_>> = ids.iter().map(RequestKey::of).collect();

    let mut order: Vec<u32> = (0..keys.len() as u32).collect();
    order.sort_by(|a, b| keys[*a as usize].cmp(&keys[*b as usize]));

    if order.windows(2).all(|w| w[0] < w[1]) {
        return Ok(batch.clone());
    }

    let indices = UInt32Array::from(order);
    Ok(take_record_batch(batch, &indices)?)
}

/// Male and female subsets of one table
#[derive(Debug, Clone)]
pub struct SexStrata {
    pub male: RecordBatch,
    pub female: RecordBatch,
    /// Rows with any other or a missing `Gender` value
    pub excluded: usize,
}

impl SexStrata {
    /// The subset for one sex
    #[must_use]
    pub fn get(&self, sex: Sex) -> &RecordBatch {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}

/// Partition a table by exact match on the `Gender` column
pub fn split_by_sex(batch: &RecordBatch, male_code: &str, female_code: &str) -> Result<SexStrata> {
    let male = ExpressionFilter::new(Expr::eq(GENDER, male_code)).filter(batch)?;
    let female = ExpressionFilter::new(Expr::eq(GENDER, female_code)).filter(batch)?;
    let excluded = batch.num_rows() - male.num_rows() - female.num_rows();

    Ok(SexStrata {
        male,
        female,
        excluded,
    })
}

/// A sorted filtered table and its sex strata
#[derive(Debug, Clone)]
pub struct StratifiedTable {
    /// The filtered table, sorted by request number
    pub sorted: NamedTable,
    pub strata: SexStrata,
}

impl StratifiedTable {
    /// Output file stem of one stratum, e.g. `FT4_female`
    #[must_use]
    pub fn stratum_name(&self, sex: Sex) -> String {
        format!("{}_{}", self.sorted.name, sex.file_suffix())
    }
}

/// Sort a filtered table and split it by sex
pub fn stratify(table: &NamedTable, male_code: &str, female_code: &str) -> Result<StratifiedTable> {
    let sorted = table.with_batch(sort_by_request(&table.batch)?);
    let strata = split_by_sex(&sorted.batch, male_code, female_code)?;

    info!(
        "{}: {} male, {} female, {} without a usable gender code",
        sorted.name,
        strata.male.num_rows(),
        strata.female.num_rows(),
        strata.excluded
    );

    Ok(StratifiedTable { sorted, strata })
}
