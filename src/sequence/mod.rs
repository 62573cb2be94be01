//! File sequence notation
//!
//! This module handles:
//! - Detecting the number component of a filename
//! - Reducing file lists to `name.[001-010].ext` notation
//! - Parsing notation back into sequences and expanding them to filenames

pub mod parser;
pub mod pattern;
pub mod range;
pub mod reducer;

pub use parser::{expand, expand_with_status, parse_notation};
pub use pattern::{match_brackets, match_number};
pub use reducer::{format_notation, group_by_template, reduce};
