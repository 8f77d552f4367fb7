//! Line-oriented trace parser.
//!
//! The trace format is deliberately small:
//!
//! ```text
//! # comment lines start with '#'
//! PUT user:1 alice
//! GET user:1
//!
//! PUT user:2 bob smith      # value is the remainder of the line
//! ```
//!
//! Lines are split on `\n` and trimmed of surrounding whitespace (which also
//! strips a trailing `\r`). Blank lines and comments are skipped. Errors are
//! collected per line as data rather than raised, and a failing parse still
//! returns the operations that did parse, though the driver is not meant to
//! run on one.

use crate::step::OpKind;

/// One parsed trace operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOp {
    pub kind: OpKind,
    pub key: String,
    /// Empty for GET.
    pub value: String,
}

impl TraceOp {
    pub fn get(key: impl Into<String>) -> Self {
        Self {
            kind: OpKind::Get,
            key: key.into(),
            value: String::new(),
        }
    }

    pub fn put(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: OpKind::Put,
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result of parsing a trace: the operations, the per-line error messages
/// (`"Line N: <reason>"`, 1-based), and whether the parse was clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub operations: Vec<TraceOp>,
    pub errors: Vec<String>,
    pub success: bool,
}

/// Parses a trace text into operations.
///
/// # Example
///
/// ```
/// use cachesim::trace::parse_trace;
///
/// let outcome = parse_trace("PUT a 1\n# warm it up\nGET a\n");
/// assert!(outcome.success);
/// assert_eq!(outcome.operations.len(), 2);
///
/// let bad = parse_trace("GET a extra");
/// assert!(!bad.success);
/// assert_eq!(bad.errors, vec!["Line 1: GET should not have a value"]);
/// ```
pub fn parse_trace(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome {
        success: true,
        ..Default::default()
    };

    for (i, raw) in text.split('\n').enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(op) => outcome.operations.push(op),
            Err(msg) => {
                outcome.errors.push(format!("Line {}: {msg}", i + 1));
                outcome.success = false;
            }
        }
    }

    outcome
}

fn parse_line(line: &str) -> Result<TraceOp, String> {
    let (op, rest) = split_token(line);
    match op {
        "GET" => {
            let (key, extra) = split_token(rest);
            if key.is_empty() {
                Err("GET requires a key".to_string())
            } else if !extra.trim().is_empty() {
                Err("GET should not have a value".to_string())
            } else {
                Ok(TraceOp::get(key))
            }
        }
        "PUT" => {
            let (key, value) = split_token(rest);
            let value = value.trim();
            if key.is_empty() {
                Err("PUT requires a key".to_string())
            } else if value.is_empty() {
                Err("PUT requires a value".to_string())
            } else {
                Ok(TraceOp::put(key, value))
            }
        }
        other => Err(format!("Unknown operation: {other} (expected GET or PUT)")),
    }
}

/// Splits off the first whitespace-delimited token; the remainder keeps its
/// internal spacing.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(pos) => (&s[..pos], &s[pos..]),
        None => (s, ""),
    }
}
