//! Utility functions for error handling
//!
//! These helpers wrap filesystem calls so that every failure carries the path
//! involved and a short note on what the file was needed for.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::open(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("Permission denied while opening file for: {purpose}")
            }
            io::ErrorKind::NotFound => format!("File not found, needed for: {purpose}"),
            _ => format!("Failed to open file for: {purpose}"),
        };
        PipelineError::io(path, message, e)
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let message = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for: {purpose}"),
            };
            Err(PipelineError::io(path, message, e))
        }
    }
}

/// Safely create (or truncate) a file for writing
///
/// Write failures are fatal for the pipeline, so the error names the file and
/// the table that was being persisted.
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    fs::File::create(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("Permission denied while writing {purpose}")
            }
            _ => format!("Failed to create file for: {purpose}"),
        };
        PipelineError::io(path, message, e)
    })
}

/// Make sure an output directory exists, creating it (and parents) if needed
pub fn ensure_output_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .map_err(|e| PipelineError::io(path, "Failed to create output directory", e))
}

/// Check whether a directory can be used as pipeline input
///
/// Returns `Ok(false)` when the directory does not exist, which callers treat
/// as a degenerate but non-fatal case. A path that exists but cannot be read
/// is an error.
pub fn input_directory_available(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    if !path.is_dir() {
        return Err(PipelineError::Config(format!(
            "Input path is not a directory: {}",
            path.display()
        )));
    }

    match fs::read_dir(path) {
        Ok(_) => Ok(true),
        Err(e) => {
            let message = match e.kind() {
                io::ErrorKind::PermissionDenied => {
                    "Permission denied - check directory permissions".to_string()
                }
                _ => "Failed to access input directory".to_string(),
            };
            Err(PipelineError::io(path, message, e))
        }
    }
}
