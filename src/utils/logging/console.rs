//! Table summaries for the run log
//!
//! A compact overview of a table (row count, columns and how many values each
//! column holds) logged after a table is materialised.

use std::fmt;

use arrow::array::Array;
use arrow::record_batch::RecordBatch;

/// Per-column fill information of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSummary {
    pub name: String,
    pub non_null: usize,
}

/// Shape and fill information of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

impl TableSummary {
    /// Summarise a record batch
    #[must_use]
    pub fn of(name: &str, batch: &RecordBatch) -> Self {
        let schema = batch.schema();
        let columns = schema
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, column)| ColumnSummary {
                name: field.name().clone(),
                non_null: column.len() - column.null_count(),
            })
            .collect();

        Self {
            name: name.to_string(),
            rows: batch.num_rows(),
            columns,
        }
    }
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} rows, {} columns",
            self.name,
            self.rows,
            self.columns.len()
        )?;
        for column in &self.columns {
            writeln!(f, "  - {} ({} non-null)", column.name, column.non_null)?;
        }
        Ok(())
    }
}

/// Log a table summary at info level
pub fn log_table_summary(name: &str, batch: &RecordBatch) -> TableSummary {
    let summary = TableSummary::of(name, batch);
    log::info!("{}", summary.to_string().trim_end());
    summary
}
