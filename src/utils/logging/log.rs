//! Run log helpers
//!
//! Every file the pipeline touches is logged with the number of rows (or
//! files) involved, so a run log shows how many records each stage kept.

use std::path::Path;
use std::time::Duration;

/// Log that a step is about to work on `path`
pub fn log_step_start(step: &str, path: &Path) {
    log::info!("{step}: {}", path.display());
}

/// Log how many rows (or files) a step handled at `path`
///
/// `action` is a past-tense verb such as `"read"` or `"wrote"`.
pub fn log_rows(action: &str, path: &Path, count: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!("{action} {count} rows at {} ({duration:.2?})", path.display()),
        None => log::info!("{action} {count} rows at {}", path.display()),
    }
}

/// Log a non-fatal condition, naming the path when there is one
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
