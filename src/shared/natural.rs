//! Natural ordering for spot labels ("A2" sorts before "A10").
//!
//! Labels are split into alternating runs of ASCII digits and non-digits.
//! Digit runs compare by numeric value without parsing, so runs of any length
//! are safe. When the runs at the same position are of different kinds, their
//! text is compared directly. A label whose runs are a strict prefix of
//! another's sorts first.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> Run<'a> {
    fn as_str(&self) -> &'a str {
        match self {
            Run::Digits(s) | Run::Text(s) => s,
        }
    }
}

/// Iterator over the digit / non-digit runs of a label
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits { Run::Digits(run) } else { Run::Text(run) })
    }
}

fn runs(label: &str) -> Runs<'_> {
    Runs { rest: label }
}

/// Compare two digit strings by value
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_run(a: Run<'_>, b: Run<'_>) -> Ordering {
    match (a, b) {
        (Run::Digits(x), Run::Digits(y)) => cmp_digits(x, y),
        (Run::Text(x), Run::Text(y)) => x.cmp(y),
        _ => a.as_str().cmp(b.as_str()),
    }
}

/// Total order over labels used wherever spots are listed
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = runs(a);
    let mut right = runs(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_run(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Sort a slice of labels in place
pub fn sort_labels<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}
