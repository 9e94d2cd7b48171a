//! Arrow data handling utilities
//!
//! Helpers for locating and downcasting columns and for turning the text
//! columns of a consolidated table into numbers.

pub mod array_utils;
pub mod conversion;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, get_column_by_name, string_column};
pub use conversion::{NumericColumn, coerce_numeric, numeric_values};
