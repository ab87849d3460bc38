//! Input existence check
//!
//! Runs before the output is reset or any task is spawned. A missing input
//! here aborts the whole run, unlike an input that exists but cannot be
//! opened later, which only costs that file its block.

use std::path::PathBuf;

use crate::cli::{Error, Result};

/// Check that every input exists.
///
/// # Returns
/// * `Ok(())` - All inputs exist
/// * `Err(Error::MissingFile)` - First input that does not
pub fn check_files(paths: &[PathBuf]) -> Result<()> {
    match paths.iter().find(|p| !p.exists()) {
        Some(missing) => Err(Error::MissingFile(missing.clone())),
        None => Ok(()),
    }
}
