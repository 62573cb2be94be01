//! Notation parsing and expansion

use log::debug;
use std::path::Path;

use super::pattern::match_brackets;
use super::range::parse_body;
use crate::error::{Result, SeqError};
use crate::files::{file_status, is_regular_file, FileStatus};
use crate::types::{ExpandedFile, FileSequence, NumberSet, Template};

/// Parse a notation such as `shot.[001-010,012].jpg` into a sequence
///
/// Input without a bracketed range is taken as a literal filename, which
/// must name an existing regular file.
pub fn parse_notation(notation: &str) -> Result<FileSequence> {
    let Some(site) = match_brackets(notation) else {
        return parse_literal(notation);
    };

    let numbers = parse_body(site.body).map_err(|reason| SeqError::invalid(notation, reason))?;
    let template = Template::numbered(
        &notation[..site.span.start],
        &notation[site.span.end..],
    );
    debug!(
        "Parsed {:?}: template={} numbers={}",
        notation,
        template,
        numbers.len()
    );

    Ok(FileSequence {
        template,
        numbers,
        notation: notation.to_string(),
    })
}

fn parse_literal(notation: &str) -> Result<FileSequence> {
    let path = Path::new(notation);
    match file_status(path) {
        FileStatus::Regular => {}
        FileStatus::Missing => return Err(SeqError::NotFound(path.to_path_buf())),
        FileStatus::Other => return Err(SeqError::NotRegularFile(path.to_path_buf())),
    }

    let mut numbers = NumberSet::new();
    numbers.insert(0, "0");
    Ok(FileSequence {
        template: Template::literal(notation),
        numbers,
        notation: notation.to_string(),
    })
}

/// Literal filenames of a sequence, in number order
pub fn expand(sequence: &FileSequence) -> Vec<String> {
    sequence.files()
}

/// Expand and check each file against the filesystem
pub fn expand_with_status(sequence: &FileSequence) -> Vec<ExpandedFile> {
    sequence
        .files()
        .into_iter()
        .map(|path| {
            let online = is_regular_file(Path::new(&path));
            ExpandedFile { path, online }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::reducer::{format_notation, reduce};
    use std::fs;
    use tempfile::TempDir;

    // ========== parse_notation tests ==========

    #[test]
    fn test_parse_example_notation() {
        let seq = parse_notation("a.[001-002,004].jpg").unwrap();
        assert_eq!(seq.template, Template::numbered("a.", ".jpg"));
        assert_eq!(seq.numbers.values(), vec![1, 2, 4]);
        assert_eq!(seq.notation, "a.[001-002,004].jpg");
        assert_eq!(expand(&seq), vec!["a.001.jpg", "a.002.jpg", "a.004.jpg"]);
    }

    #[test]
    fn test_parse_keeps_caller_notation() {
        let seq = parse_notation("a.[3,1-2].jpg").unwrap();
        assert_eq!(seq.notation, "a.[3,1-2].jpg");
        assert_eq!(expand(&seq), vec!["a.3.jpg", "a.1.jpg", "a.2.jpg"]);
        assert_eq!(format_notation(&seq.template, &seq.numbers), "a.[1-3].jpg");
    }

    #[test]
    fn test_parse_directory_separator_site() {
        let seq = parse_notation("plates/[08-10].png").unwrap();
        assert_eq!(
            expand(&seq),
            vec!["plates/08.png", "plates/09.png", "plates/10.png"]
        );
    }

    #[test]
    fn test_parse_malformed_body_is_invalid() {
        let err = parse_notation("a.[1--3].jpg").unwrap_err();
        assert!(matches!(err, SeqError::InvalidNotation { .. }));

        let err = parse_notation("a.[3-1].jpg").unwrap_err();
        assert!(matches!(err, SeqError::InvalidNotation { .. }));
    }

    #[test]
    fn test_parse_missing_literal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.jpg");
        let err = parse_notation(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SeqError::NotFound(_)));
        assert!(err.to_string().contains("not a file or sequence"));
    }

    #[test]
    fn test_parse_directory_literal() {
        let dir = TempDir::new().unwrap();
        let err = parse_notation(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, SeqError::NotRegularFile(_)));
    }

    #[test]
    fn test_parse_existing_literal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.jpg");
        fs::write(&path, b"x").unwrap();
        let name = path.to_str().unwrap();

        let seq = parse_notation(name).unwrap();
        assert!(seq.template.is_literal());
        assert_eq!(seq.numbers.render_of(0), Some("0"));
        assert_eq!(seq.notation, name);
        assert_eq!(expand(&seq), vec![name.to_string()]);
    }

    // ========== round trip tests ==========

    #[test]
    fn test_reduced_notation_parses_back() {
        let files = ["s_0001.dpx", "s_0002.dpx", "s_0003.dpx", "s_0010.dpx"];
        let reduced = reduce(files);
        assert_eq!(reduced[0].notation, "s_[0001-0003,0010].dpx");

        let parsed = parse_notation(&reduced[0].notation).unwrap();
        assert_eq!(expand(&parsed), files.to_vec());
        assert_eq!(
            format_notation(&parsed.template, &parsed.numbers),
            reduced[0].notation
        );
    }

    // ========== expand_with_status tests ==========

    #[test]
    fn test_expand_with_status_marks_offline() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f.1.jpg"), b"1").unwrap();
        fs::write(dir.path().join("f.3.jpg"), b"3").unwrap();
        let notation = format!("{}/f.[1-3].jpg", dir.path().display());

        let seq = parse_notation(&notation).unwrap();
        let online: Vec<bool> = expand_with_status(&seq).iter().map(|f| f.online).collect();
        assert_eq!(online, vec![true, false, true]);
    }
}
