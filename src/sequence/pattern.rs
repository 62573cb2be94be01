//! Number detection in filenames
//!
//! A sequence number is a run of digits right after one of `.`, `_`, ` `,
//! `/` or `\` and right before a 2-4 character extension at the end of the
//! name, e.g. `plate.0101.exr`, `take_07.wav`, `frames/0001.png`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Digits before the extension. Greedy `.*` keeps only the last qualifying run.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*[._ /\\]([0-9]+)\.\w{2,4}$").expect("number pattern is valid"));

/// Same anchoring as `NUMBER_PATTERN` with a bracketed body in place of the digits
static BRACKET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*[._ /\\](\[[0-9,\-]+\])\.\w{2,4}$").expect("bracket pattern is valid")
});

/// The number component found in a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberMatch<'a> {
    /// Digits exactly as written, leading zeros included
    pub digits: &'a str,
    pub value: u64,
    /// Byte span of `digits` in the input
    pub span: Range<usize>,
}

/// The bracketed body of a notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketMatch<'a> {
    /// Text between the brackets
    pub body: &'a str,
    /// Byte span of the whole `[...]` in the input
    pub span: Range<usize>,
}

/// Find the sequence number of `path`, if it has one
///
/// A digit run too long for `u64` is not treated as a number.
pub fn match_number(path: &str) -> Option<NumberMatch<'_>> {
    let digits = NUMBER_PATTERN.captures(path)?.get(1)?;
    let value = digits.as_str().parse::<u64>().ok()?;
    Some(NumberMatch {
        digits: digits.as_str(),
        value,
        span: digits.range(),
    })
}

/// Find the `[...]` range site of a notation, if it has one
pub fn match_brackets(notation: &str) -> Option<BracketMatch<'_>> {
    let site = BRACKET_PATTERN.captures(notation)?.get(1)?;
    let span = site.range();
    Some(BracketMatch {
        body: &notation[span.start + 1..span.end - 1],
        span,
    })
}
