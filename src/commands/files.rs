//! Sequence commands
//!
//! Each command runs one library operation and renders its outcome. Output
//! and input streams are passed in so the prompts and listings can be
//! exercised without a terminal.

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use log::debug;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::SeqError;
use crate::files::{self, SequenceOps};
use crate::sequence::{expand_with_status, parse_notation};
use crate::types::SequenceOperationResult;

/// Separator between source and destination of pair operations
pub const PAIR_DELIMITER: &str = "::";

/// How listings are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Plain,
    Color,
    Json,
}

/// Split `source::dest`; any other number of delimiters is an error
pub fn split_pair(pair: &str) -> Result<(&str, &str), SeqError> {
    let parts: Vec<&str> = pair.split(PAIR_DELIMITER).collect();
    match parts.as_slice() {
        [source, dest] => Ok((*source, *dest)),
        _ => Err(SeqError::invalid(
            pair,
            format!(
                "expected two sequences separated by '{}', found {} part(s)",
                PAIR_DELIMITER,
                parts.len()
            ),
        )),
    }
}

/// Print every sequence under `root`, sorted by notation
pub fn list<W: Write>(root: &Path, style: OutputStyle, out: &mut W) -> Result<()> {
    let sequences = files::list_sequences(root)
        .with_context(|| format!("Unable to list sequences under {}", root.display()))?;
    debug!("Listing {} sequences", sequences.len());

    if style == OutputStyle::Json {
        serde_json::to_writer_pretty(&mut *out, &sequences)?;
        writeln!(out)?;
        return Ok(());
    }

    for seq in &sequences {
        writeln!(out, "{}", seq.notation)?;
    }
    Ok(())
}

/// Print the files of a notation, marking offline ones
pub fn expand<W: Write>(notation: &str, style: OutputStyle, out: &mut W) -> Result<()> {
    let sequence = parse_notation(notation)
        .with_context(|| format!("Unable to create sequence from {}", notation))?;
    let files = expand_with_status(&sequence);

    match style {
        OutputStyle::Json => {
            serde_json::to_writer_pretty(&mut *out, &files)?;
            writeln!(out)?;
        }
        OutputStyle::Color => {
            for file in &files {
                if file.online {
                    writeln!(out, "{}", file.path)?;
                } else {
                    writeln!(out, "{}", file.path.as_str().red().bold())?;
                }
            }
        }
        OutputStyle::Plain => {
            for file in &files {
                writeln!(out, "{}", file.path)?;
            }
        }
    }
    Ok(())
}

pub fn copy(ops: &SequenceOps, pair: &str, force: bool) -> Result<SequenceOperationResult> {
    let (source, dest) = split_pair(pair)?;
    ops.copy_seq(source, dest, force).context("Unable to copy files")
}

pub fn move_files(ops: &SequenceOps, pair: &str, force: bool) -> Result<SequenceOperationResult> {
    let (source, dest) = split_pair(pair)?;
    ops.move_seq(source, dest, force).context("Unable to move files")
}

pub fn reseq(ops: &SequenceOps, pair: &str) -> Result<SequenceOperationResult> {
    let (source, dest) = split_pair(pair)?;
    ops.reseq(source, dest).context("Unable to resequence files")
}

/// Ask before removing data; only an answer of `y` continues
pub fn confirm_delete<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<bool> {
    writeln!(out, "This will remove your data, are you sure? [y/n]: ")?;
    out.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

/// Delete (or trash) a sequence, prompting first unless forced
///
/// Returns `None` when the prompt was declined.
pub fn delete<R: BufRead, W: Write>(
    ops: &SequenceOps,
    notation: &str,
    force: bool,
    to_trash: bool,
    input: &mut R,
    out: &mut W,
) -> Result<Option<SequenceOperationResult>> {
    if !force && !confirm_delete(input, out)? {
        writeln!(out, "Not continuing with delete, response was not 'y'")?;
        return Ok(None);
    }

    let result = if to_trash {
        ops.trash_seq(notation, force)
    } else {
        ops.delete_seq(notation, force)
    };
    result.map(Some).context("Unable to delete files")
}
