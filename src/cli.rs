//! Command-line arguments

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fileseq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Condense sequences of files into a compact format, e.g. shot.[001-010].jpg")]
#[command(long_about = "\
Condense sequences of files into a compact format, e.g. fseq1.[1-10].jpg.

Runs from the current directory, or a directory given with -p, recursively
gathering all files and reducing them to sequences where possible. It also
copies, moves, renumbers or deletes whole sequences.

A reverse lookup (-r) takes a compact sequence and lists its files, marking
files that are offline in red.

Sequences are detected from files ending in '.#.ext', '_#.ext', ' #.ext' or
'/#.ext'. Consecutive numbers are joined with '-', others with ','.")]
pub struct Args {
    /// Directory to search
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<String>,

    /// Expand a sequence to its list of files (offline files are marked)
    #[arg(short = 'r', long, value_name = "SEQUENCE")]
    pub reverse: Option<String>,

    /// Copy one sequence to another, e.g. a.[01-10].jpg::b.[01-10].jpg
    #[arg(short = 'c', long, value_name = "SRC::DST")]
    pub copy: Option<String>,

    /// Move one sequence to another; source files no longer exist afterwards
    #[arg(short = 'm', long = "move", value_name = "SRC::DST")]
    pub move_pair: Option<String>,

    /// Renumber a sequence in place, e.g. a.[001-009].jpg::a.[101-109].jpg
    #[arg(short = 'q', long, value_name = "SRC::DST")]
    pub reseq: Option<String>,

    /// Remove all files in a sequence
    #[arg(short = 'd', long, value_name = "SEQUENCE")]
    pub delete: Option<String>,

    /// With --delete, move files to the trash instead of removing them
    #[arg(long, requires = "delete")]
    pub trash: bool,

    /// Allow overwriting existing files and skip the delete prompt
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Do not color output
    #[arg(short = 'n', long)]
    pub no_color: bool,

    /// Print listings as JSON
    #[arg(long)]
    pub json: bool,

    /// Log each file as it is processed (-vv for debug output)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (defaults to <config dir>/fileseq/config.json)
    #[arg(long, env = "FILESEQ_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Reverse(String),
    Copy(String),
    Move(String),
    Reseq(String),
    Delete(String),
}

impl Args {
    /// The requested action; the first given of reverse, copy, move,
    /// reseq, delete wins, otherwise a listing
    pub fn action(&self) -> Action {
        if let Some(n) = &self.reverse {
            Action::Reverse(n.clone())
        } else if let Some(p) = &self.copy {
            Action::Copy(p.clone())
        } else if let Some(p) = &self.move_pair {
            Action::Move(p.clone())
        } else if let Some(p) = &self.reseq {
            Action::Reseq(p.clone())
        } else if let Some(n) = &self.delete {
            Action::Delete(n.clone())
        } else {
            Action::List
        }
    }

    /// Log filter implied by -v, if any
    pub fn verbosity_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            _ => Some("debug"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fileseq").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_is_listing() {
        let args = parse(&[]);
        assert_eq!(args.action(), Action::List);
        assert_eq!(args.verbosity_level(), None);
    }

    #[test]
    fn test_reverse_takes_precedence() {
        let args = parse(&["-r", "a.[1-2].jpg", "-d", "b.[1-2].jpg"]);
        assert_eq!(args.action(), Action::Reverse("a.[1-2].jpg".to_string()));
    }

    #[test]
    fn test_flags() {
        let args = parse(&["-m", "a.[1-2].jpg::b.[1-2].jpg", "-f", "-n", "-vv"]);
        assert_eq!(
            args.action(),
            Action::Move("a.[1-2].jpg::b.[1-2].jpg".to_string())
        );
        assert!(args.force);
        assert!(args.no_color);
        assert_eq!(args.verbosity_level(), Some("debug"));
    }

    #[test]
    fn test_trash_requires_delete() {
        let result = Args::try_parse_from(["fileseq", "--trash"]);
        assert!(result.is_err());
        let args = parse(&["-d", "a.[1-2].jpg", "--trash"]);
        assert!(args.trash);
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
