//! Hierarchical account codes.
//!
//! Codes look like `"4.1.2"`. They drive both display order and indentation:
//! the level of a row is the number of dot-separated segments minus one,
//! whatever its actual parent link says.

use std::cmp::Ordering;

/// Display depth of a code (`"4"` is 0, `"4.1.2"` is 2).
#[must_use]
pub fn code_level(code: &str) -> usize {
    code.split('.').count().saturating_sub(1)
}

/// Numeric-aware comparison of two codes.
///
/// Runs of ASCII digits compare by numeric value, everything else compares
/// case-insensitively, so `"1.9" < "1.10"` and `"A2" < "a10"`. Codes that
/// only differ by leading zeros or letter case fall back to a plain byte
/// comparison so the order stays total.
#[must_use]
pub fn compare_codes(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = compare_chunks(l, r);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn compare_chunks(l: &str, r: &str) -> Ordering {
    let l_digits = l.as_bytes()[0].is_ascii_digit();
    let r_digits = r.as_bytes()[0].is_ascii_digit();

    match (l_digits, r_digits) {
        (true, true) => {
            let l = l.trim_start_matches('0');
            let r = r.trim_start_matches('0');
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        }
        // digits sort before punctuation and letters
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => l
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(r.chars().flat_map(char::to_lowercase)),
    }
}

/// Splits a code into alternating digit and non-digit runs.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    const fn new(code: &'a str) -> Self {
        Self { rest: code }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}
