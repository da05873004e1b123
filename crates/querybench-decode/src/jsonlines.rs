//! Decoder for the client's primary JSON-lines output.
//!
//! The client prints one JSON message per logical line, but the terminal
//! transport wraps long messages across printed lines and interleaves them
//! with progress noise and control bytes. Candidates are reassembled with a
//! line-level brace heuristic: a `{`-leading line opens a candidate, later
//! lines append to it, and the candidate is complete once its text ends
//! with `}`. Known limitation: this is not a JSON tokenizer, so a line that
//! ends with `}` inside a string value terminates a candidate early and both
//! halves are then dropped as unparseable.

use crate::messages::StreamMessage;
use querybench_core::{ResultSet, Value};
use serde_json::Value as Json;
use tracing::debug;

/// Lines with these prefixes are client-side metadata, not payload.
pub const METADATA_PREFIXES: &[&str] = &["Time:", "Request Id:"];

/// Decode the raw client output into a result set.
///
/// Best-effort throughout: malformed candidates and rows with the wrong
/// arity are dropped, and missing schema or zero data rows yields the empty
/// set rather than an error. Callers distinguish "decode failed" from
/// "zero rows" with the runner's exit status, not here.
pub fn decode(raw: &str) -> ResultSet {
    let cleaned = sanitize(raw);
    let candidates = reassemble(&cleaned);

    let mut columns: Vec<String> = Vec::new();
    let mut data_rows: Vec<Vec<Json>> = Vec::new();
    let mut skipped = 0usize;

    for candidate in &candidates {
        match serde_json::from_str::<StreamMessage>(candidate) {
            Ok(StreamMessage::Start { result_columns }) => {
                columns = result_columns.into_iter().map(|c| c.name).collect();
            }
            Ok(StreamMessage::Data { data }) => data_rows.extend(data),
            Ok(StreamMessage::FinishSuccessfully) | Ok(StreamMessage::FinishWithErrors) => {}
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        debug!(skipped, total = candidates.len(), "dropped unparseable candidates");
    }

    if columns.is_empty() || data_rows.is_empty() {
        return ResultSet::empty();
    }

    let mut set = ResultSet::new(columns);
    let mut dropped = 0usize;
    for row in data_rows {
        let values: Vec<Value> = row.iter().map(scalar_from_json).collect();
        if !set.push_row(values) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped rows with mismatched arity");
    }
    if set.is_empty() {
        return ResultSet::empty();
    }
    set
}

/// Strip bytes outside printable ASCII, keeping newline, carriage return and
/// tab, to remove terminal control sequences.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|&c| (' '..='~').contains(&c) || c == '\n' || c == '\r' || c == '\t')
        .collect()
}

/// Rebuild JSON candidates that were wrapped across printed lines.
fn reassemble(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || is_metadata(line) {
            continue;
        }

        if line.starts_with('{') {
            if !current.is_empty() {
                candidates.push(std::mem::take(&mut current));
            }
            current.push_str(line);
        } else {
            current.push_str(line);
        }

        if !current.is_empty() && current.ends_with('}') {
            candidates.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        candidates.push(current);
    }
    candidates
}

fn is_metadata(line: &str) -> bool {
    METADATA_PREFIXES.iter().any(|p| line.starts_with(p))
}

fn scalar_from_json(value: &Json) -> Value {
    match value {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::Text(s.clone()),
        // Nested structures are not tabular; keep them as rendered text.
        other => Value::Text(other.to_string()),
    }
}
