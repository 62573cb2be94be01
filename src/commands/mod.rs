//! CLI commands module
//!
//! Commands are organized by domain:
//! - Sequence operations (list, expand, copy, move, renumber, delete)
//! - Settings (listing root resolution)

mod files;
mod settings;

pub use files::*;
pub use settings::*;
