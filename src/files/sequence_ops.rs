//! Whole-sequence file operations
//!
//! Copy, move, renumber and delete act on every file of a notation in
//! order. Each checks the full sequence before touching anything; once the
//! per-file loop starts, the first failure stops it and whatever was already
//! done stays done. The one exception is a copy that fails verification,
//! which removes the destination sequence before returning.

use log::{debug, info, warn};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use super::checksum::{self, HashingReader};
use super::operations::{is_regular_file, make_parent_dir};
use crate::config::AppConfig;
use crate::error::{RenumberStage, Result, SeqError};
use crate::sequence::parse_notation;
use crate::types::{ChecksumKind, FileSequence, SequenceOperationResult};

/// Check two sequences can be paired and expand them
///
/// Returns index-aligned source and destination filenames. Sequences with
/// the same template are a renumber in place and skip the existing
/// destination check as if `force` were set.
pub fn format_file_lists(
    source: &FileSequence,
    dest: &FileSequence,
    force: bool,
) -> Result<(Vec<String>, Vec<String>)> {
    if source.len() != dest.len() {
        return Err(SeqError::CountMismatch {
            from: source.notation.clone(),
            to: dest.notation.clone(),
            from_count: source.len(),
            to_count: dest.len(),
        });
    }

    let source_files = source.files();
    if let Some(missing) = source_files
        .iter()
        .find(|f| !is_regular_file(Path::new(f)))
    {
        return Err(SeqError::SourceOffline {
            notation: source.notation.clone(),
            missing: PathBuf::from(missing),
        });
    }

    let dest_files = dest.files();
    let force = force || source.template == dest.template;
    if !force {
        if let Some(existing) = dest_files.iter().find(|f| is_regular_file(Path::new(f))) {
            return Err(SeqError::DestinationExists {
                notation: dest.notation.clone(),
                existing: PathBuf::from(existing),
            });
        }
    }

    Ok((source_files, dest_files))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Removal {
    Permanent,
    Trash,
}

/// Sequence operator
#[derive(Debug, Clone)]
pub struct SequenceOps {
    checksum: ChecksumKind,
    temp_root: PathBuf,
}

impl Default for SequenceOps {
    fn default() -> Self {
        Self::new(ChecksumKind::default(), std::env::temp_dir())
    }
}

impl SequenceOps {
    pub fn new(checksum: ChecksumKind, temp_root: impl Into<PathBuf>) -> Self {
        Self {
            checksum,
            temp_root: temp_root.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let temp_root = config
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        Self::new(config.checksum, temp_root)
    }

    /// Copy one sequence onto another, verifying every file by checksum
    pub fn copy_seq(
        &self,
        source: &str,
        dest: &str,
        force: bool,
    ) -> Result<SequenceOperationResult> {
        info!("copy_seq: from={:?} to={:?} force={}", source, dest, force);
        self.copy_seq_with(source, dest, force, |from, to| self.copy_file(from, to))
    }

    /// Copy loop shared by `copy_seq`; `copy` writes one file and returns the
    /// source and destination digests
    fn copy_seq_with<F>(
        &self,
        source: &str,
        dest: &str,
        force: bool,
        mut copy: F,
    ) -> Result<SequenceOperationResult>
    where
        F: FnMut(&Path, &Path) -> Result<(String, String)>,
    {
        let source_seq = parse_notation(source)?;
        let dest_seq = parse_notation(dest)?;
        let (source_files, dest_files) = format_file_lists(&source_seq, &dest_seq, force)?;

        make_parent_dir(dest)?;

        for (from, to) in source_files.iter().zip(&dest_files) {
            if from == to {
                debug!("{} is already in place", from);
                continue;
            }
            info!("{} -> {}", from, to);

            let (expected, actual) = copy(Path::new(from), Path::new(to))?;
            if expected != actual {
                warn!(
                    "Checksum mismatch for {}: source {} destination {}",
                    to, expected, actual
                );
                if let Err(e) = self.remove_seq(dest, true, Removal::Permanent) {
                    warn!("Rollback of {} incomplete: {}", dest, e);
                }
                return Err(SeqError::IntegrityFailure {
                    from: PathBuf::from(from),
                    to: PathBuf::from(to),
                    expected,
                    actual,
                });
            }
        }

        info!("Successfully copied {} to {}", source, dest);
        Ok(SequenceOperationResult {
            processed: source_files.len(),
            message: format!("Copied {} files to '{}'", source_files.len(), dest),
        })
    }

    /// Stream `from` into a new `to`, returning the source and written digests
    fn copy_file(&self, from: &Path, to: &Path) -> Result<(String, String)> {
        let transfer_err = |path: &Path| {
            let path = path.to_path_buf();
            move |e: io::Error| SeqError::Transfer { path, source: e }
        };

        let input = File::open(from).map_err(transfer_err(from))?;
        let mut reader = HashingReader::new(input, self.checksum);
        let mut output = File::create(to).map_err(transfer_err(to))?;

        io::copy(&mut reader, &mut output).map_err(transfer_err(to))?;
        output.sync_all().map_err(transfer_err(to))?;
        drop(output);

        let expected = reader.finalize();
        let actual = checksum::hash_file(to, self.checksum)?;
        Ok((expected, actual))
    }

    /// Rename one sequence onto another
    pub fn move_seq(
        &self,
        source: &str,
        dest: &str,
        force: bool,
    ) -> Result<SequenceOperationResult> {
        info!("move_seq: from={:?} to={:?} force={}", source, dest, force);

        let source_seq = parse_notation(source)?;
        let dest_seq = parse_notation(dest)?;
        let (source_files, dest_files) = format_file_lists(&source_seq, &dest_seq, force)?;

        make_parent_dir(dest)?;

        for (from, to) in source_files.iter().zip(&dest_files) {
            info!("{} -> {}", from, to);
            fs::rename(from, to).map_err(|e| {
                warn!("Move failed: {:?}", e);
                SeqError::RenameFailure {
                    from: PathBuf::from(from),
                    to: PathBuf::from(to),
                    source: e,
                }
            })?;
        }

        info!("Successfully moved {} to {}", source, dest);
        Ok(SequenceOperationResult {
            processed: source_files.len(),
            message: format!("Moved {} files to '{}'", source_files.len(), dest),
        })
    }

    /// Where a renumber stages its copy of `dest`
    pub fn temp_location(&self, dest: &str) -> PathBuf {
        let name = Path::new(dest)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| dest.into());
        self.temp_root
            .join(format!("fileseq-{}", std::process::id()))
            .join(name)
    }

    /// Renumber a sequence in place
    ///
    /// Copies into a temp location under the new numbers, removes the
    /// originals, then moves the copies back.
    pub fn reseq(&self, source: &str, dest: &str) -> Result<SequenceOperationResult> {
        info!("reseq: from={:?} to={:?}", source, dest);

        let source_seq = parse_notation(source)?;
        let dest_seq = parse_notation(dest)?;
        if source_seq.template != dest_seq.template {
            warn!(
                "Renumber refused: templates differ ({} vs {})",
                source_seq.template, dest_seq.template
            );
            return Err(SeqError::TemplateMismatch {
                from: source.to_string(),
                to: dest.to_string(),
            });
        }

        let temp = self.temp_location(dest);
        let temp_notation = temp.to_string_lossy().to_string();
        let stage_err = |stage: RenumberStage, temp: &Path| {
            let temp = temp.to_path_buf();
            move |e: SeqError| SeqError::Renumber {
                stage,
                temp,
                cause: Box::new(e),
            }
        };
        debug!("Staging renumber in {:?}", temp);

        self.copy_seq(source, &temp_notation, true)
            .map_err(stage_err(RenumberStage::Copy, &temp))?;
        self.delete_seq(source, true)
            .map_err(stage_err(RenumberStage::Delete, &temp))?;
        let result = self
            .move_seq(&temp_notation, dest, false)
            .map_err(stage_err(RenumberStage::Move, &temp))?;

        if let Some(staging) = temp.parent() {
            if let Err(e) = fs::remove_dir(staging) {
                debug!("Left staging directory {:?}: {}", staging, e);
            }
        }

        info!("Successfully renumbered {} to {}", source, dest);
        Ok(SequenceOperationResult {
            processed: result.processed,
            message: format!("Renumbered {} files to '{}'", result.processed, dest),
        })
    }

    /// Permanently delete every file of a sequence
    pub fn delete_seq(&self, source: &str, force: bool) -> Result<SequenceOperationResult> {
        self.remove_seq(source, force, Removal::Permanent)
    }

    /// Send every file of a sequence to the platform trash
    pub fn trash_seq(&self, source: &str, force: bool) -> Result<SequenceOperationResult> {
        self.remove_seq(source, force, Removal::Trash)
    }

    fn remove_seq(
        &self,
        source: &str,
        force: bool,
        removal: Removal,
    ) -> Result<SequenceOperationResult> {
        info!(
            "remove_seq: source={:?} force={} removal={:?}",
            source, force, removal
        );

        let seq = parse_notation(source)?;
        let files = seq.files();

        if !force {
            if let Some(missing) = files.iter().find(|f| !is_regular_file(Path::new(f))) {
                warn!("Delete refused: {} is offline", missing);
                return Err(SeqError::SourceOffline {
                    notation: seq.notation.clone(),
                    missing: PathBuf::from(missing),
                });
            }
        }

        for file in &files {
            info!("deleting {}", file);
            match removal {
                Removal::Permanent => fs::remove_file(file).map_err(|e| {
                    warn!("Failed to delete file {:?}: {}", file, e);
                    SeqError::RemovalFailure {
                        path: PathBuf::from(file),
                        source: e,
                    }
                })?,
                Removal::Trash => trash::delete(file).map_err(|e| {
                    warn!("Failed to move {:?} to trash: {}", file, e);
                    SeqError::Trash {
                        path: PathBuf::from(file),
                        message: e.to_string(),
                    }
                })?,
            }
        }

        let verb = match removal {
            Removal::Permanent => "Deleted",
            Removal::Trash => "Moved to trash",
        };
        Ok(SequenceOperationResult {
            processed: files.len(),
            message: format!("{} {} files of '{}'", verb, files.len(), seq.notation),
        })
    }
}
