// src/extractors/matcher.rs
//
// One parameterised cell matcher: a label predicate decides which cell
// names a concept, a value policy decides where its value sits.

use once_cell::sync::Lazy;
use regex::Regex;

use super::sheet::Sheet;

// A bare bracketed footnote marker such as "[3]".
static FOOTNOTE_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d+\]$").expect("Failed to compile FOOTNOTE_CELL_RE"));

// Any value opening with a footnote marker, e.g. "[3] adjusted".
static FOOTNOTE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d+\]").expect("Failed to compile FOOTNOTE_PREFIX_RE"));

/// Decides whether a cell labels the concept. All text tests are case-insensitive.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Substring test; the needle is stored lowercased.
    Contains(String),
    Regex(Regex),
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn contains(phrase: &str) -> Self {
        Predicate::Contains(phrase.to_lowercase())
    }

    pub fn any_of(phrases: &[&str]) -> Self {
        Predicate::Any(phrases.iter().map(|p| Predicate::contains(p)).collect())
    }

    pub fn all_of(phrases: &[&str]) -> Self {
        Predicate::All(phrases.iter().map(|p| Predicate::contains(p)).collect())
    }

    /// Case-insensitive regex. Panics on an invalid pattern, so only use
    /// it with literals.
    pub fn regex(pattern: &str) -> Self {
        let re = Regex::new(&format!("(?i){}", pattern))
            .unwrap_or_else(|e| panic!("invalid label pattern '{}': {}", pattern, e));
        Predicate::Regex(re)
    }

    pub fn and_not(self, other: Predicate) -> Self {
        Predicate::All(vec![self, Predicate::Not(Box::new(other))])
    }

    pub fn matches(&self, cell: &str) -> bool {
        match self {
            Predicate::Contains(needle) => cell.to_lowercase().contains(needle.as_str()),
            Predicate::Regex(re) => re.is_match(cell),
            Predicate::All(parts) => parts.iter().all(|p| p.matches(cell)),
            Predicate::Any(parts) => parts.iter().any(|p| p.matches(cell)),
            Predicate::Not(inner) => !inner.matches(cell),
        }
    }
}

/// Where the value of a matched label is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePolicy {
    /// First cell to the right that is non-empty and not a bare footnote marker.
    ScanRight,
    /// Only the next column. Must be non-empty; optionally rejects values
    /// that open with a footnote marker. An unusable value moves the search
    /// on to the next matching column.
    Adjacent { reject_footnote_prefix: bool },
    /// Only the next column of the first matching column; the search ends
    /// there either way.
    AdjacentCommit,
    /// Fixed column of the first row (in row order) with a matching cell.
    FixedColumn(usize),
}

#[derive(Debug, Clone)]
pub struct Matcher {
    pub predicate: Predicate,
    pub policy: ValuePolicy,
}

impl Matcher {
    pub fn new(predicate: Predicate, policy: ValuePolicy) -> Self {
        Self { predicate, policy }
    }

    /// Runs the matcher over one sheet. `None` means the concept was not found.
    pub fn find(&self, sheet: &Sheet) -> Option<String> {
        if let ValuePolicy::FixedColumn(col) = self.policy {
            let row = (0..sheet.height())
                .find(|&r| sheet.row(r).iter().any(|cell| self.predicate.matches(cell)))?;
            return non_empty(sheet.cell(row, col));
        }

        for col in 0..sheet.width() {
            let Some(row) = (0..sheet.height()).find(|&r| self.predicate.matches(sheet.cell(r, col))) else {
                continue;
            };
            tracing::trace!("'{}' matched label '{}' at ({}, {})", sheet.name, sheet.cell(row, col), row, col);

            let value = match self.policy {
                ValuePolicy::ScanRight => scan_right(sheet, row, col),
                ValuePolicy::Adjacent { reject_footnote_prefix } => non_empty(sheet.cell(row, col + 1))
                    .filter(|v| !(reject_footnote_prefix && FOOTNOTE_PREFIX_RE.is_match(v))),
                ValuePolicy::AdjacentCommit => return non_empty(sheet.cell(row, col + 1)),
                ValuePolicy::FixedColumn(_) => unreachable!("handled above"),
            };
            if value.is_some() {
                return value;
            }
        }
        None
    }
}

fn scan_right(sheet: &Sheet, row: usize, col: usize) -> Option<String> {
    (col + 1..sheet.width())
        .filter_map(|c| non_empty(sheet.cell(row, c)))
        .find(|v| !FOOTNOTE_CELL_RE.is_match(v))
}

fn non_empty(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
