//! Pipeline stages operating on consolidated tables
//!
//! - [`extraction`]: per-measurement extraction and mutual-presence filtering
//! - [`validation`]: request-number uniqueness checks
//! - [`stratification`]: sorting by request number and splitting by sex
//! - [`statistics`]: descriptive statistics, classification and t-tests

pub mod extraction;
pub mod statistics;
pub mod stratification;
pub mod validation;

use arrow::record_batch::RecordBatch;

/// Whether a table holds reference rows or rows of a paired measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// Reference measurement rows aligned to one paired measurement
    Reference,
    /// Rows of a paired measurement whose request has a reference row
    Paired,
}

/// A filtered table together with the name used for its output files
#[derive(Debug, Clone)]
pub struct NamedTable {
    /// Base name of output files, e.g. `TSH_for_FT4` or `FT4`
    pub name: String,
    /// Label of the measurement the rows belong to
    pub measurement: String,
    pub role: TableRole,
    pub batch: RecordBatch,
}

impl NamedTable {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        measurement: impl Into<String>,
        role: TableRole,
        batch: RecordBatch,
    ) -> Self {
        Self {
            name: name.into(),
            measurement: measurement.into(),
            role,
            batch,
        }
    }

    /// A copy of this table with different rows
    #[must_use]
    pub fn with_batch(&self, batch: RecordBatch) -> Self {
        Self {
            batch,
            ..self.clone()
        }
    }
}
