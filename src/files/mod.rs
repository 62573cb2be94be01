//! File system operations module
//!
//! This module handles file system operations including:
//! - Recursive file enumeration under a root
//! - Regular-file checks for online/offline status
//! - Streaming checksums for verified copies
//! - Sequence copy, move, renumber, delete and trash

pub mod checksum;
mod operations;
pub mod sequence_ops;

pub use operations::{
    file_status, is_regular_file, list_sequences, make_parent_dir, walk_files, FileStatus,
};
pub use sequence_ops::{format_file_lists, SequenceOps};
