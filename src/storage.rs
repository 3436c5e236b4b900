//! JSON persistence for the project tree.
//!
//! The on-disk representation is a UTF-8 JSON array of projects with their
//! tasks and subtasks nested inside. Saves go through a temp file + rename
//! so a crash mid-write never truncates the data file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::task::Project;

/// Errors from the persistence layer. Callers log these and carry on; a
/// missing or corrupt data file must not take the tool down.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read or write data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode data file: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Load the project tree from a JSON file.
pub fn load_projects(path: &Path) -> Result<Vec<Project>, StorageError> {
    let data = fs::read_to_string(path)?;
    let projects = serde_json::from_str(&data)?;
    Ok(projects)
}

/// Save the project tree to a JSON file using atomic write (temp + rename).
pub fn save_projects(path: &Path, projects: &[Project]) -> Result<(), StorageError> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_string_pretty(projects)?;
    let mut f = File::create(&tmp)?;
    f.write_all(data.as_bytes())?;
    f.flush()?;
    fs::rename(tmp, path)?;
    Ok(())
}
