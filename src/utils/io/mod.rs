//! IO utilities for file operations
//!
//! This module provides utilities for locating input tables and reading and
//! writing them as CSV or Parquet.

pub mod csv;
pub mod files;
pub mod parquet;

// Re-export commonly used functions for convenience
pub use self::csv::{read_csv_file, write_csv_file};
pub use self::files::{TableFormat, find_table_files, read_table_file};
pub use self::parquet::read_parquet_file;

/// Default batch size for readers
pub const DEFAULT_BATCH_SIZE: usize = 16384;
