//! Fallback decoder for the client's delimited text format.
//!
//! Used when the JSON-lines decode comes back empty for output that clearly
//! was not. First surviving line is the header; fields may be double-quoted
//! with `""` as the escaped quote.

use crate::jsonlines::{sanitize, METADATA_PREFIXES};
use querybench_core::{ResultSet, Value};
use tracing::debug;

pub fn decode(raw: &str, delimiter: char) -> ResultSet {
    let cleaned = sanitize(raw);
    let mut lines = cleaned
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !METADATA_PREFIXES.iter().any(|p| l.starts_with(p)));

    let header = match lines.next() {
        Some(h) => split_fields(h, delimiter),
        None => return ResultSet::empty(),
    };
    if header.is_empty() {
        return ResultSet::empty();
    }

    let mut set = ResultSet::new(header);
    let mut dropped = 0usize;
    for line in lines {
        let values: Vec<Value> = split_fields(line, delimiter)
            .into_iter()
            .map(|f| coerce(&f))
            .collect();
        if !set.push_row(values) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        debug!(dropped, "dropped delimited rows with mismatched arity");
    }

    if set.is_empty() {
        return ResultSet::empty();
    }
    set
}

/// Split one line on the delimiter, honoring double-quoted fields.
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

fn coerce(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(x) = trimmed.parse::<f64>() {
        return Value::Float(x);
    }
    Value::Text(trimmed.to_string())
}
