//! Expression-based filtering
//!
//! Predicates over the text columns of a table. Comparisons are exact string
//! matches and a null cell never matches.

use arrow::array::{BooleanArray, StringArray};
use arrow::compute::kernels::cmp::eq;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::filter::core::{BatchFilter, filter_record_batch};
use crate::utils::arrow::string_column;

/// Represents a filter expression over text columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Column equals a literal value
    Eq(String, String),
}

impl Expr {
    /// Shorthand for [`Expr::Eq`]
    #[must_use]
    pub fn eq(column: &str, value: &str) -> Self {
        Self::Eq(column.to_string(), value.to_string())
    }

    /// Evaluate the expression against a record batch
    ///
    /// Returns a mask with one entry per row; null cells give null entries.
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<BooleanArray> {
        match self {
            Self::Eq(col, value) => {
                let column = string_column(batch, col)?;
                Ok(eq(&column, &StringArray::new_scalar(value.as_str()))?)
            }
        }
    }
}

/// A filter backed by an [`Expr`]
#[derive(Debug, Clone)]
pub struct ExpressionFilter {
    expr: Expr,
}

impl ExpressionFilter {
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }
}

impl BatchFilter for ExpressionFilter {
    fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let mask = self.expr.evaluate(batch)?;
        filter_record_batch(batch, &mask)
    }
}
