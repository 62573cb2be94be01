//! Range bodies: the text between the brackets of a notation
//!
//! Formatting collapses consecutive numbers into `start-end` runs and
//! separates everything else with commas: {1,2,4,6,7,8} -> `[1-2,4,6-8]`.
//! Parsing reads the same grammar back:
//!
//! ```text
//! body  := item ("," item)*
//! item  := digits | digits "-" digits
//! ```

use crate::types::{NumberEntry, NumberSet};

/// Most numbers a single body may expand to
pub const MAX_NUMBERS: usize = 1_000_000;

/// Format entries (ascending by value) as a notation body
///
/// One entry renders bare, without brackets.
pub fn format_body(sorted: &[&NumberEntry]) -> String {
    let Some((first, rest)) = sorted.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return first.render.clone();
    }

    let mut body = String::from("[");
    body.push_str(&first.render);

    let mut previous = first.value;
    let mut pending: Option<&str> = None;
    for entry in rest {
        if previous.checked_add(1) == Some(entry.value) {
            pending = Some(entry.render.as_str());
        } else {
            if let Some(end) = pending.take() {
                body.push('-');
                body.push_str(end);
            }
            body.push(',');
            body.push_str(&entry.render);
        }
        previous = entry.value;
    }
    if let Some(end) = pending {
        body.push('-');
        body.push_str(end);
    }

    body.push(']');
    body
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Comma,
    Dash,
}

fn tokenize(body: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            ',' => tokens.push(Token::Comma),
            '-' => tokens.push(Token::Dash),
            '0'..='9' => {
                let mut end = start + 1;
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + 1;
                    chars.next();
                }
                tokens.push(Token::Digits(&body[start..end]));
            }
            other => return Err(format!("unexpected character '{}' at {}", other, start)),
        }
    }

    Ok(tokens)
}

fn to_number(digits: &str) -> Result<u64, String> {
    digits
        .parse::<u64>()
        .map_err(|_| format!("number '{}' is too large", digits))
}

/// Parse a notation body (without brackets) into numbers in token order
///
/// Numbers filled in between range ends are zero-padded to the width of the
/// body's first number; numbers written out keep their own text.
pub fn parse_body(body: &str) -> Result<NumberSet, String> {
    let tokens = tokenize(body)?;
    let width = match tokens.first() {
        Some(Token::Digits(d)) => d.len(),
        Some(_) => return Err("must start with a number".to_string()),
        None => return Err("empty range".to_string()),
    };

    let mut numbers = NumberSet::new();
    let mut iter = tokens.into_iter().peekable();

    loop {
        let start_digits = match iter.next() {
            Some(Token::Digits(d)) => d,
            Some(_) => return Err("expected a number after ','".to_string()),
            None => return Err("trailing ','".to_string()),
        };
        let start = to_number(start_digits)?;
        numbers.insert(start, start_digits);

        if iter.peek() == Some(&Token::Dash) {
            iter.next();
            let end_digits = match iter.next() {
                Some(Token::Digits(d)) => d,
                _ => return Err(format!("range starting at {} has no end", start_digits)),
            };
            let end = to_number(end_digits)?;
            if end < start {
                return Err(format!("descending range {}-{}", start_digits, end_digits));
            }
            if (numbers.len() as u64).saturating_add(end - start) > MAX_NUMBERS as u64 {
                return Err(format!(
                    "range {}-{} exceeds {} numbers",
                    start_digits, end_digits, MAX_NUMBERS
                ));
            }
            for n in start.saturating_add(1)..end {
                numbers.insert(n, format!("{:0width$}", n, width = width));
            }
            numbers.insert(end, end_digits);
        }

        match iter.next() {
            None => break,
            Some(Token::Comma) => continue,
            Some(Token::Dash) => return Err("a range may only have one '-'".to_string()),
            Some(Token::Digits(d)) => return Err(format!("missing ',' before {}", d)),
        }
    }

    Ok(numbers)
}
