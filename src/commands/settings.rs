//! Path settings for CLI commands
//!
//! Resolves the listing root: explicit path with `~` expanded, otherwise the
//! current directory.

use std::path::PathBuf;

/// Resolve the directory a listing runs from
pub fn resolve_root(path: Option<&str>) -> Result<PathBuf, String> {
    match path {
        Some(p) if !p.trim().is_empty() => {
            let expanded = expand_tilde(p.trim());
            let trimmed = expanded.trim_end_matches('/');
            // "/" trims to empty
            if trimmed.is_empty() {
                Ok(PathBuf::from("/"))
            } else {
                Ok(PathBuf::from(trimmed))
            }
        }
        _ => std::env::current_dir().map_err(|e| format!("Cannot read current directory: {}", e)),
    }
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
