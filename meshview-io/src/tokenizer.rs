//! Line normalization and directive splitting shared by the OBJ and MTL parsers
//!
//! Both formats are line oriented: each logical line is blank, a comment, or a
//! keyword followed by whitespace separated arguments. This module handles:
//! - `\n` and `\r\n` line endings
//! - `\` line continuations (joined with a single space)
//! - `#` comments, whole-line or trailing
//! - numeric argument parsing with line-numbered errors

use meshview_core::{Error, Result};
use std::borrow::Cow;
use std::iter::Enumerate;
use std::ops::RangeInclusive;
use std::str::Lines;

/// Iterator over logical lines, yielding the 1-based number of the first
/// physical line and the joined text
pub struct LogicalLines<'a> {
    lines: Enumerate<Lines<'a>>,
}

/// Split `source` into logical lines, skipping a leading byte-order mark
pub fn logical_lines(source: &str) -> LogicalLines<'_> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    LogicalLines {
        lines: source.lines().enumerate(),
    }
}

/// The line with its trailing `\` removed, if it continues onto the next line
fn continued(line: &str) -> Option<&str> {
    line.trim_end().strip_suffix('\\')
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = (usize, Cow<'a, str>);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, first) = self.lines.next()?;
        let line = index + 1;

        let Some(head) = continued(first) else {
            return Some((line, Cow::Borrowed(first)));
        };

        let mut joined = head.to_string();
        for (_, next) in self.lines.by_ref() {
            joined.push(' ');
            match continued(next) {
                Some(head) => joined.push_str(head),
                None => {
                    joined.push_str(next);
                    break;
                }
            }
        }

        Some((line, Cow::Owned(joined)))
    }
}

/// A keyword and its arguments from one logical line
#[derive(Debug, Clone, PartialEq)]
pub struct Directive<'a> {
    pub line: usize,
    pub keyword: &'a str,
    pub args: Vec<&'a str>,
    raw: &'a str,
}

impl<'a> Directive<'a> {
    /// Tokenize a logical line; `None` for blank and comment-only lines
    pub fn parse(line: usize, text: &'a str) -> Option<Self> {
        let content = match text.find('#') {
            Some(start) => &text[..start],
            None => text,
        };

        let mut tokens = content.split_whitespace();
        let keyword = tokens.next()?;

        Some(Self {
            line,
            keyword,
            args: tokens.collect(),
            raw: text.trim(),
        })
    }

    /// A `MalformedDirective` error pointing at this line
    pub fn malformed(&self) -> Error {
        Error::MalformedDirective {
            line: self.line,
            raw: self.raw.to_string(),
        }
    }

    /// Fail unless the argument count is in `allowed`
    pub fn expect_args(&self, allowed: RangeInclusive<usize>) -> Result<()> {
        if allowed.contains(&self.args.len()) {
            Ok(())
        } else {
            Err(self.malformed())
        }
    }

    /// Parse argument `index` as a finite float
    pub fn float_at(&self, index: usize) -> Result<f32> {
        self.args
            .get(index)
            .and_then(|token| parse_f32(token))
            .ok_or_else(|| self.malformed())
    }

    /// Parse every argument as a finite float
    pub fn floats(&self) -> Result<Vec<f32>> {
        self.args
            .iter()
            .map(|token| parse_f32(token).ok_or_else(|| self.malformed()))
            .collect()
    }

    /// All arguments joined by single spaces, `None` when there are none
    pub fn rest(&self) -> Option<String> {
        if self.args.is_empty() {
            None
        } else {
            Some(self.args.join(" "))
        }
    }
}

/// Parse a float, rejecting NaN and infinities
pub fn parse_f32(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|value| value.is_finite())
}

/// Parse a signed face index
pub fn parse_index(token: &str) -> Option<i64> {
    token.parse::<i64>().ok()
}
