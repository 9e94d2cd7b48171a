//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging, table summaries, and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use console::{TableSummary, log_table_summary};
pub use log::{log_rows, log_step_start, log_warning};
pub use progress::{create_main_progress_bar, finish_progress_bar};
