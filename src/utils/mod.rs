//! Shared utilities: Arrow helpers, file IO and logging

pub mod arrow;
pub mod io;
pub mod logging;
