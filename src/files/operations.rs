//! File system operations
//!
//! This module handles:
//! - Recursive file listing
//! - Regular-file status checks
//! - Directory creation for sequence destinations

use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Result, SeqError};
use crate::sequence::reduce;
use crate::types::FileSequence;

/// What a path currently refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Regular,
    Other,
    Missing,
}

/// Check what a path refers to, following symlinks
pub fn file_status(path: &Path) -> FileStatus {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => FileStatus::Regular,
        Ok(_) => FileStatus::Other,
        Err(_) => FileStatus::Missing,
    }
}

/// Check if a path is an existing regular file
pub fn is_regular_file(path: &Path) -> bool {
    file_status(path) == FileStatus::Regular
}

/// Recursively list every non-directory entry under `root`
///
/// Paths are returned prefixed with `root` as given. Symlinks are listed but
/// not followed. Paths that are not valid UTF-8 are skipped with a warning.
pub fn walk_files(root: &Path) -> Result<Vec<String>> {
    debug!("walk_files called: root={:?}", root);

    if fs::symlink_metadata(root).is_err() {
        warn!("Root does not exist: {:?}", root);
        return Err(SeqError::NotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut dir_count = 0;

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            warn!("Failed to scan under {:?}: {}", root, e);
            SeqError::from(e)
        })?;

        if entry.file_type().is_dir() {
            dir_count += 1;
            continue;
        }
        match entry.path().to_str() {
            Some(path) => files.push(path.to_string()),
            None => warn!("Skipping non UTF-8 path: {:?}", entry.path()),
        }
    }

    info!(
        "Scanned {:?}: {} files in {} directories",
        root,
        files.len(),
        dir_count
    );

    Ok(files)
}

/// List the sequences found under `root`, sorted by notation
pub fn list_sequences(root: &Path) -> Result<Vec<FileSequence>> {
    let files = walk_files(root)?;
    Ok(reduce(&files))
}

/// Create the parent directory tree of a notation or path
pub fn make_parent_dir(path: &str) -> Result<()> {
    let Some(parent) = Path::new(path).parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }

    debug!("Creating directory: {:?}", parent);
    fs::create_dir_all(parent).map_err(|e| {
        warn!("Failed to create directory {:?}: {}", parent, e);
        SeqError::DirectoryCreationFailure {
            path: parent.to_path_buf(),
            source: e,
        }
    })
}
