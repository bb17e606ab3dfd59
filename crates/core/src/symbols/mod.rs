//! Function-record extraction and symbol-listing comparison.
//!
//! Symbol listings are large generated text files, one record per line. Only
//! `FUNC` records matter here, and only minimally: a linkage scope and a
//! canonical name. Every other record kind is skipped, as are `FUNC` lines
//! that do not follow the expected field convention.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Linkage scope of a function record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionScope {
    /// Visible only inside its compilation unit.
    FileStatic,
    /// Externally visible.
    External,
}

/// A function record extracted from one listing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub scope: FunctionScope,
    pub name: String,
}

/// Outcome of inspecting a single listing line.
///
/// `NotAFunction` and `Malformed` are distinct so callers can tell "some
/// other record kind" apart from "claimed to be a FUNC record but did not
/// parse". Both are excluded from extraction without raising an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRecord {
    NotAFunction,
    Malformed,
    Function(FunctionRecord),
}

/// Parse one listing line as a function record.
///
/// The expected shape is `FUNC [m] <address> <size> <param_size> [static] <name>`,
/// where the optional `m` field marks records merged from multiple
/// compilation units. The canonical name is the remaining tokens joined and
/// truncated before the first `(` or `<`.
pub fn parse_line(line: &str) -> LineRecord {
    let mut tokens = line.split_whitespace().peekable();
    if tokens.next() != Some("FUNC") {
        return LineRecord::NotAFunction;
    }
    if tokens.peek() == Some(&"m") {
        tokens.next();
    }
    // Three positional fields: address, size, parameter size.
    for _ in 0..3 {
        if tokens.next().is_none() {
            return LineRecord::Malformed;
        }
    }
    let scope = if tokens.peek() == Some(&"static") {
        tokens.next();
        FunctionScope::FileStatic
    } else {
        FunctionScope::External
    };
    let rest = tokens.collect::<Vec<_>>().join(" ");
    let name = rest.split(['(', '<']).next().unwrap_or("").trim();
    if name.is_empty() {
        return LineRecord::Malformed;
    }
    LineRecord::Function(FunctionRecord { scope, name: name.to_string() })
}

/// True iff any line contains the marker substring (case-sensitive).
///
/// This is a pure substring test, not a structured parse; the marker is a
/// function signature known to exist only in the regressed builds.
pub fn contains_marker(lines: &[String], marker: &str) -> bool {
    lines.iter().any(|line| line.contains(marker))
}

/// Canonical names of the file-static function records in a listing.
pub fn static_names(lines: &[String]) -> BTreeSet<String> {
    names_with_scope(lines, FunctionScope::FileStatic)
}

/// Canonical names of the externally visible function records in a listing.
pub fn external_names(lines: &[String]) -> BTreeSet<String> {
    names_with_scope(lines, FunctionScope::External)
}

fn names_with_scope(lines: &[String], scope: FunctionScope) -> BTreeSet<String> {
    lines
        .iter()
        .filter_map(|line| match parse_line(line) {
            LineRecord::Function(func) if func.scope == scope => Some(func.name),
            _ => None,
        })
        .collect()
}

/// Candidate functions for a linkage-visibility regression: names that are
/// file-static in the `bad` listing but externally visible in the `good`
/// one. A name that is file-static in both listings is not a candidate.
///
/// Either listing being empty (or containing no function records) yields an
/// empty set.
pub fn visibility_diff(bad: &[String], good: &[String]) -> BTreeSet<String> {
    let static_bad = static_names(bad);
    let visible_good = external_names(good);
    static_bad.intersection(&visible_good).cloned().collect()
}
