//! Error types for sequence parsing and manipulation

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the sequence core
pub type Result<T> = std::result::Result<T, SeqError>;

/// Stage of a renumber that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenumberStage {
    Copy,
    Delete,
    Move,
}

impl fmt::Display for RenumberStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            RenumberStage::Copy => "copying to temp location",
            RenumberStage::Delete => "removing original files",
            RenumberStage::Move => "moving renumbered files back to original location",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, Error)]
pub enum SeqError {
    #[error("invalid notation '{notation}': {reason}")]
    InvalidNotation { notation: String, reason: String },

    #[error("{} is not a file or sequence of files (not found)", .0.display())]
    NotFound(PathBuf),

    #[error("{} is not a file or sequence of files (not a regular file)", .0.display())]
    NotRegularFile(PathBuf),

    #[error("{from} and {to} do not contain the same number of files ({from_count} vs {to_count})")]
    CountMismatch {
        from: String,
        to: String,
        from_count: usize,
        to_count: usize,
    },

    #[error("{notation} is not completely online, missing {}", .missing.display())]
    SourceOffline { notation: String, missing: PathBuf },

    #[error("{notation}: some or all destination files already exist ({})", .existing.display())]
    DestinationExists { notation: String, existing: PathBuf },

    #[error(
        "checksum mismatch copying {} to {} (source {expected}, destination {actual}), \
         backed out of copy; check the destination is writable and has free space",
        .from.display(),
        .to.display()
    )]
    IntegrityFailure {
        from: PathBuf,
        to: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("failed to rename {} to {}: {source}", .from.display(), .to.display())]
    RenameFailure {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    RemovalFailure { path: PathBuf, source: io::Error },

    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailure { path: PathBuf, source: io::Error },

    #[error(
        "source {from} and destination {to} must share the same name and location; \
         renumbering only changes numbers in place, use copy or move instead"
    )]
    TemplateMismatch { from: String, to: String },

    #[error("failed to transfer {}: {source}", .path.display())]
    Transfer { path: PathBuf, source: io::Error },

    #[error("failed to move {} to trash: {message}", .path.display())]
    Trash { path: PathBuf, message: String },

    #[error("failed to scan directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("renumber failed while {stage}: {cause}; files may be recovered from {}", .temp.display())]
    Renumber {
        stage: RenumberStage,
        temp: PathBuf,
        #[source]
        cause: Box<SeqError>,
    },
}

impl SeqError {
    pub(crate) fn invalid(notation: &str, reason: impl Into<String>) -> Self {
        SeqError::InvalidNotation {
            notation: notation.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_mismatch_message() {
        let err = SeqError::CountMismatch {
            from: "a.[1-3].jpg".to_string(),
            to: "b.[1-2].jpg".to_string(),
            from_count: 3,
            to_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "a.[1-3].jpg and b.[1-2].jpg do not contain the same number of files (3 vs 2)"
        );
    }

    #[test]
    fn test_renumber_keeps_cause() {
        let err = SeqError::Renumber {
            stage: RenumberStage::Move,
            temp: PathBuf::from("/tmp/fileseq-1/a.[1-2].jpg"),
            cause: Box::new(SeqError::NotFound(PathBuf::from("x.jpg"))),
        };
        let message = err.to_string();
        assert!(message.contains("moving renumbered files back"));
        assert!(message.contains("/tmp/fileseq-1/a.[1-2].jpg"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
